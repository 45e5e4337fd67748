//! Donut chart of category shares.

use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::palette::{self, INK, SET2};
use super::{Area, DrawResult, label_font, no_data, px, title_font};
use crate::algorithm::ValueCount;

/// Radius of the hole as a share of the outer radius
pub const HOLE: f64 = 0.4;

const ARC_STEP: f64 = 0.02;

/// Slices run clockwise from twelve o'clock, each labelled with its name and percentage
pub fn donut(root: &Area<'_>, title: &str, data: &[ValueCount]) -> DrawResult {
    let total: usize = data.iter().map(|v| v.count).sum();
    if total == 0 {
        return no_data(root, title);
    }
    let area = root.titled(title, title_font())?;
    let (w, h) = area.dim_in_pixel();
    let center = (f64::from(px(w)) / 2.0, f64::from(px(h)) / 2.0);
    let outer = (f64::from(px(w.min(h))) / 2.0 - 20.0).max(10.0);
    let inner = outer * HOLE;

    let point = |radius: f64, angle: f64| {
        #[allow(clippy::cast_possible_truncation)]
        let p = (
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 + radius * angle.sin()).round() as i32,
        );
        p
    };

    let mut start = -FRAC_PI_2;
    for (i, slice) in data.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let sweep = TAU * slice.count as f64 / total as f64;
        let end = start + sweep;
        let color = palette::cycle(&SET2, i);

        let outline = wedge(start, end)
            .map(|a| point(outer, a))
            .chain(wedge(start, end).rev().map(|a| point(inner, a)))
            .collect::<Vec<_>>();
        area.draw(&Polygon::new(outline.clone(), color.filled()))?;
        let mut closed = outline;
        if let Some(&first) = closed.first() {
            closed.push(first);
        }
        area.draw(&PathElement::new(closed, WHITE.stroke_width(2)))?;

        let mid = start + sweep / 2.0;
        let (x, y) = point((outer + inner) / 2.0, mid);
        let style = label_font(12)
            .color(&INK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(slice.value.clone(), (x, y - 8), style.clone()))?;
        area.draw(&Text::new(
            format!("{:.1}%", slice.percent),
            (x, y + 8),
            style,
        ))?;

        start = end;
    }
    Ok(())
}

/// Angles from `start` to `end` inclusive, at most `ARC_STEP` apart
fn wedge(start: f64, end: f64) -> impl DoubleEndedIterator<Item = f64> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (((end - start) / ARC_STEP).ceil() as usize).max(1);
    #[allow(clippy::cast_precision_loss)]
    (0..=steps).map(move |k| start + (end - start) * k as f64 / steps as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_hits_both_ends() {
        let angles: Vec<f64> = wedge(0.0, 1.0).collect();
        assert!((angles[0]).abs() < 1e-12);
        assert!((angles[angles.len() - 1] - 1.0).abs() < 1e-12);
        assert!(angles.windows(2).all(|w| w[1] - w[0] <= ARC_STEP + 1e-12));
    }
}
