//! Cartesian charts: line, bars, histogram, box plot, scatter and stacked bars.

use chrono::Duration;
use plotters::prelude::*;

use super::palette::{self, INK, PASTEL, PASTEL2, SET2, SKY_BLUE, STEEL_BLUE};
use super::{Area, ChartText, DrawResult, label_font, no_data, title_font};
use crate::algorithm::{BoxStats, DailyCount, GroupTotal, Histogram, PivotTable, ScatterSeries};
use crate::schema::DateFormatConfig;

const GRID: RGBColor = RGBColor(230, 230, 230);

/// Upper bound of a value axis with some headroom
fn headroom(max: f64, factor: f64) -> f64 {
    if max > 0.0 { max * factor } else { 1.0 }
}

/// Index of the category centred on `x` when categories sit at `i + 0.5`
fn category_at(x: f64) -> Option<usize> {
    let shifted = x - 0.5;
    if shifted < -1e-6 || (shifted - shifted.round()).abs() > 1e-6 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(shifted.round() as usize)
}

#[allow(clippy::cast_precision_loss)]
pub fn daily_counts(
    root: &Area<'_>,
    text: ChartText<'_>,
    dates: &DateFormatConfig,
    data: &[DailyCount],
) -> DrawResult {
    let (Some(first), Some(last)) = (data.first(), data.last()) else {
        return no_data(root, text.title);
    };
    let start = first.date;
    let span = (last.date - start).num_days().max(1);
    let max = data.iter().map(|d| d.count).max().unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(text.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0_i64..span, 0.0..headroom(max, 1.1))?;

    let date_label = |offset: &i64| dates.format(start + Duration::days(*offset));
    chart
        .configure_mesh()
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .x_labels(6)
        .x_label_formatter(&date_label)
        .light_line_style(&GRID)
        .label_style(label_font(12))
        .draw()?;

    chart.draw_series(LineSeries::new(
        data.iter()
            .map(|d| ((d.date - start).num_days(), d.count as f64)),
        STEEL_BLUE.stroke_width(2),
    ))?;
    Ok(())
}

/// One horizontal bar per group, drawn bottom-up in the given order
pub fn horizontal_bars(root: &Area<'_>, text: ChartText<'_>, data: &[GroupTotal]) -> DrawResult {
    if data.is_empty() {
        return no_data(root, text.title);
    }
    #[allow(clippy::cast_precision_loss)]
    let n = data.len() as f64;
    let max = data.iter().map(|g| g.value).fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(root)
        .caption(text.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(170)
        .build_cartesian_2d(0.0..headroom(max, 1.1), 0.0..n)?;

    let group_label =
        |y: &f64| category_at(*y).and_then(|i| data.get(i)).map(|g| g.key.clone()).unwrap_or_default();
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .y_labels(2 * data.len() + 1)
        .y_label_formatter(&group_label)
        .light_line_style(&GRID)
        .label_style(label_font(12))
        .draw()?;

    chart.draw_series(data.iter().enumerate().map(|(i, group)| {
        #[allow(clippy::cast_precision_loss)]
        let y = i as f64;
        let color = palette::cycle(&PASTEL, i);
        Rectangle::new([(0.0, y + 0.15), (group.value, y + 0.85)], color.filled())
    }))?;
    Ok(())
}

/// Count bars with the density curve on top
pub fn histogram_with_density(root: &Area<'_>, text: ChartText<'_>, data: &Histogram) -> DrawResult {
    let (Some(&lo), Some(&hi)) = (data.edges.first(), data.edges.last()) else {
        return no_data(root, text.title);
    };
    if data.total() == 0 {
        return no_data(root, text.title);
    }
    #[allow(clippy::cast_precision_loss)]
    let max_count = data.max_count() as f64;
    let max_density = data.density.iter().map(|p| p.1).fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(root)
        .caption(text.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(lo..hi, 0.0..headroom(max_count.max(max_density), 1.1))?;

    chart
        .configure_mesh()
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .light_line_style(&GRID)
        .label_style(label_font(12))
        .draw()?;

    chart.draw_series(data.counts.iter().enumerate().map(|(i, &count)| {
        #[allow(clippy::cast_precision_loss)]
        let height = count as f64;
        Rectangle::new(
            [(data.edges[i], 0.0), (data.edges[i + 1], height)],
            SKY_BLUE.filled(),
        )
    }))?;
    chart.draw_series(data.counts.iter().enumerate().map(|(i, &count)| {
        #[allow(clippy::cast_precision_loss)]
        let height = count as f64;
        Rectangle::new(
            [(data.edges[i], 0.0), (data.edges[i + 1], height)],
            WHITE.stroke_width(1),
        )
    }))?;
    chart.draw_series(LineSeries::new(
        data.density.iter().copied(),
        STEEL_BLUE.stroke_width(2),
    ))?;
    Ok(())
}

/// Boxes from Q1 to Q3 with a median bar, whiskers and outlier markers
pub fn box_plot(root: &Area<'_>, text: ChartText<'_>, data: &[BoxStats]) -> DrawResult {
    if data.is_empty() {
        return no_data(root, text.title);
    }
    let (low, high) = data
        .iter()
        .flat_map(|b| {
            b.outliers
                .iter()
                .copied()
                .chain([b.lower_whisker, b.upper_whisker])
        })
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let pad = ((high - low) * 0.08).max(1.0);
    #[allow(clippy::cast_precision_loss)]
    let n = data.len() as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(text.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..n, (low - pad)..(high + pad))?;

    let group_label =
        |x: &f64| category_at(*x).and_then(|i| data.get(i)).map(|b| b.group.clone()).unwrap_or_default();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .x_labels(2 * data.len() + 1)
        .x_label_formatter(&group_label)
        .light_line_style(&GRID)
        .label_style(label_font(12))
        .draw()?;

    let slot = |i: usize| {
        #[allow(clippy::cast_precision_loss)]
        let x = i as f64;
        (x + 0.25, x + 0.5, x + 0.75)
    };

    chart.draw_series(data.iter().enumerate().map(|(i, b)| {
        let (left, _, right) = slot(i);
        Rectangle::new([(left, b.q1), (right, b.q3)], palette::cycle(&SET2, i).filled())
    }))?;
    chart.draw_series(data.iter().enumerate().map(|(i, b)| {
        let (left, _, right) = slot(i);
        Rectangle::new([(left, b.q1), (right, b.q3)], INK.stroke_width(1))
    }))?;

    // Median, whiskers and caps
    chart.draw_series(data.iter().enumerate().flat_map(|(i, b)| {
        let (left, center, right) = slot(i);
        let cap = (right - left) / 4.0;
        [
            PathElement::new(vec![(left, b.median), (right, b.median)], INK.stroke_width(2)),
            PathElement::new(vec![(center, b.q3), (center, b.upper_whisker)], INK.stroke_width(1)),
            PathElement::new(vec![(center, b.q1), (center, b.lower_whisker)], INK.stroke_width(1)),
            PathElement::new(
                vec![(center - cap, b.upper_whisker), (center + cap, b.upper_whisker)],
                INK.stroke_width(1),
            ),
            PathElement::new(
                vec![(center - cap, b.lower_whisker), (center + cap, b.lower_whisker)],
                INK.stroke_width(1),
            ),
        ]
    }))?;

    chart.draw_series(data.iter().enumerate().flat_map(|(i, b)| {
        let (_, center, _) = slot(i);
        b.outliers
            .iter()
            .map(move |&v| Circle::new((center, v), 3, INK.stroke_width(1)))
    }))?;
    Ok(())
}

pub fn scatter(root: &Area<'_>, text: ChartText<'_>, data: &ScatterSeries) -> DrawResult {
    let Some(((x0, x1), (y0, y1))) = data.bounds() else {
        return no_data(root, text.title);
    };
    let x_pad = ((x1 - x0) * 0.05).max(0.5);
    let y_pad = ((y1 - y0) * 0.05).max(0.5);

    let mut chart = ChartBuilder::on(root)
        .caption(text.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d((x0 - x_pad)..(x1 + x_pad), (y0 - y_pad)..(y1 + y_pad))?;

    chart
        .configure_mesh()
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .light_line_style(&GRID)
        .label_style(label_font(12))
        .draw()?;

    chart.draw_series(
        data.points
            .iter()
            .map(|&point| Circle::new(point, 3, STEEL_BLUE.mix(0.7).filled())),
    )?;
    Ok(())
}

/// One bar per pivot row, stacked by pivot column, with a legend
pub fn stacked_bars(
    root: &Area<'_>,
    text: ChartText<'_>,
    legend_title: &str,
    data: &PivotTable,
) -> DrawResult {
    if data.row_labels.is_empty() || data.column_labels.is_empty() {
        return no_data(root, text.title);
    }
    let max = (0..data.row_labels.len())
        .map(|r| data.row_total(r))
        .fold(0.0, f64::max);
    #[allow(clippy::cast_precision_loss)]
    let n = data.row_labels.len() as f64;

    // Room above the tallest bar keeps the legend clear of the data
    let mut chart = ChartBuilder::on(root)
        .caption(text.title, title_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..n, 0.0..headroom(max, 1.6))?;

    let row_label = |x: &f64| {
        category_at(*x)
            .and_then(|i| data.row_labels.get(i))
            .cloned()
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .x_labels(2 * data.row_labels.len() + 1)
        .x_label_formatter(&row_label)
        .light_line_style(&GRID)
        .label_style(label_font(12))
        .draw()?;

    let mut base = vec![0.0; data.row_labels.len()];
    for (c, column) in data.column_labels.iter().enumerate() {
        let color = palette::cycle(&PASTEL2, c);
        let segments = data
            .values
            .iter()
            .enumerate()
            .map(|(r, cells)| {
                let bottom = base[r];
                let top = bottom + cells[c];
                #[allow(clippy::cast_precision_loss)]
                let x = r as f64;
                ((x + 0.2, bottom), (x + 0.8, top))
            })
            .collect::<Vec<_>>();
        for (r, cells) in data.values.iter().enumerate() {
            base[r] += cells[c];
        }

        chart
            .draw_series(
                segments
                    .into_iter()
                    .map(|(a, b)| Rectangle::new([a, b], color.filled())),
            )?
            .label(column.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.9))
        .border_style(&INK)
        .label_font(label_font(11))
        .draw()?;

    // Legend heading sits just left of the legend box
    let (width, _) = root.dim_in_pixel();
    root.draw(&Text::new(
        legend_title.to_string(),
        (super::px(width) - 220, 30),
        label_font(12).color(&INK),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_sit_at_half_steps() {
        assert_eq!(category_at(0.5), Some(0));
        assert_eq!(category_at(2.5), Some(2));
        assert_eq!(category_at(1.0), None);
        assert_eq!(category_at(0.0), None);
    }

    #[test]
    fn headroom_handles_zero() {
        assert!((headroom(0.0, 1.1) - 1.0).abs() < f64::EPSILON);
        assert!((headroom(10.0, 1.5) - 15.0).abs() < 1e-12);
    }
}
