//! Annotated correlation heatmap, laid out directly in pixels.

use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::palette::{INK, contrasting_text, red_yellow_green};
use super::{Area, DrawResult, label_font, no_data, px, title_font};
use crate::algorithm::CorrelationMatrix;

const ROW_LABEL_WIDTH: i32 = 150;
const COLUMN_LABEL_HEIGHT: i32 = 110;
const COLOR_BAR_WIDTH: i32 = 70;
const COLOR_BAR_STEPS: i32 = 40;

/// Square cells coloured red (-1) through yellow (0) to green (1), each
/// annotated with its coefficient
pub fn correlation_heatmap(root: &Area<'_>, title: &str, data: &CorrelationMatrix) -> DrawResult {
    if data.is_empty() {
        return no_data(root, title);
    }
    let area = root.titled(title, title_font())?;
    let (w, h) = area.dim_in_pixel();
    let n = i32::try_from(data.len())?;

    let cell = ((px(w) - ROW_LABEL_WIDTH - COLOR_BAR_WIDTH) / n)
        .min((px(h) - COLUMN_LABEL_HEIGHT - 10) / n)
        .max(8);
    let (left, top) = (ROW_LABEL_WIDTH, 10);
    let annotation = label_font(if cell >= 40 { 12 } else { 9 });

    for (i, row) in data.values.iter().enumerate() {
        let y0 = top + cell * i32::try_from(i)?;
        for (j, &value) in row.iter().enumerate() {
            let x0 = left + cell * i32::try_from(j)?;
            let fill = red_yellow_green(value);
            area.draw(&Rectangle::new([(x0, y0), (x0 + cell, y0 + cell)], fill.filled()))?;
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell, y0 + cell)],
                WHITE.stroke_width(1),
            ))?;

            let label = if value.is_nan() {
                String::from("n/a")
            } else {
                format!("{value:.2}")
            };
            area.draw(&Text::new(
                label,
                (x0 + cell / 2, y0 + cell / 2),
                annotation
                    .color(&contrasting_text(fill))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
        }
    }

    let axis_style = label_font(11).color(&INK);
    let grid_bottom = top + cell * n;
    for (i, name) in data.columns.iter().enumerate() {
        let offset = cell * i32::try_from(i)? + cell / 2;
        area.draw(&Text::new(
            name.clone(),
            (left - 6, top + offset),
            axis_style.pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
        area.draw(&Text::new(
            name.clone(),
            (left + offset, grid_bottom + 6),
            axis_style
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }

    draw_color_bar(&area, left + cell * n + 20, top, cell * n)
}

/// Vertical gradient legend from 1 at the top to -1 at the bottom
fn draw_color_bar(area: &Area<'_>, x: i32, top: i32, height: i32) -> DrawResult {
    let step = (height / COLOR_BAR_STEPS).max(1);
    for k in 0..COLOR_BAR_STEPS {
        let value = 1.0 - 2.0 * f64::from(k) / f64::from(COLOR_BAR_STEPS - 1);
        let y0 = top + step * k;
        area.draw(&Rectangle::new(
            [(x, y0), (x + 14, y0 + step)],
            red_yellow_green(value).filled(),
        ))?;
    }

    let style = label_font(10)
        .color(&INK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let bottom = top + step * COLOR_BAR_STEPS;
    for (label, y) in [("1.0", top), ("0.0", (top + bottom) / 2), ("-1.0", bottom)] {
        area.draw(&Text::new(label, (x + 18, y), style.clone()))?;
    }
    Ok(())
}
