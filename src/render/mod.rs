//! SVG chart rendering
//!
//! Every panel summary is drawn with plotters onto an in-memory SVG
//! document. Cartesian charts live in `charts`, the annotated correlation
//! heatmap in `heatmap` and the payment donut in `donut`.

pub mod charts;
pub mod donut;
pub mod heatmap;
pub mod palette;

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::algorithm::{
    BoxStats, CorrelationMatrix, DailyCount, GroupTotal, Histogram, PivotTable, ScatterSeries,
    ValueCount,
};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::schema::DateFormatConfig;

/// Outcome of a drawing routine; plotters errors are boxed until the renderer maps them
pub type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// The SVG drawing area every chart is drawn on
pub type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

pub(crate) const FONT: &str = "sans-serif";

/// Title and axis descriptions of one chart
#[derive(Debug, Clone, Copy)]
pub struct ChartText<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

impl<'a> ChartText<'a> {
    #[must_use]
    pub const fn new(title: &'a str, x_desc: &'a str, y_desc: &'a str) -> Self {
        Self {
            title,
            x_desc,
            y_desc,
        }
    }
}

/// Renders panel summaries to SVG documents of a fixed size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRenderer {
    size: (u32, u32),
    /// Display format of date axis labels
    dates: DateFormatConfig,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(DashboardConfig::default().chart_size)
    }
}

impl ChartRenderer {
    #[must_use]
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            dates: DateFormatConfig::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.chart_size).with_date_format_config(config.date_format_config.clone())
    }

    /// Label dates with `dates.default_format`
    #[must_use]
    pub fn with_date_format_config(mut self, dates: DateFormatConfig) -> Self {
        self.dates = dates;
        self
    }

    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Draw onto a white canvas and return the SVG text
    pub fn render<F>(&self, draw: F) -> Result<String>
    where
        F: FnOnce(&Area<'_>) -> DrawResult,
    {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(DashboardError::render)?;
            draw(&root).map_err(DashboardError::render)?;
            root.present().map_err(DashboardError::render)?;
        }
        Ok(svg)
    }

    pub fn daily_counts(&self, text: ChartText<'_>, data: &[DailyCount]) -> Result<String> {
        self.render(|root| charts::daily_counts(root, text, &self.dates, data))
    }

    pub fn revenue_bars(&self, text: ChartText<'_>, data: &[GroupTotal]) -> Result<String> {
        self.render(|root| charts::horizontal_bars(root, text, data))
    }

    pub fn histogram(&self, text: ChartText<'_>, data: &Histogram) -> Result<String> {
        self.render(|root| charts::histogram_with_density(root, text, data))
    }

    pub fn box_plot(&self, text: ChartText<'_>, data: &[BoxStats]) -> Result<String> {
        self.render(|root| charts::box_plot(root, text, data))
    }

    pub fn scatter(&self, text: ChartText<'_>, data: &ScatterSeries) -> Result<String> {
        self.render(|root| charts::scatter(root, text, data))
    }

    /// Stacked bars; `legend_title` heads the legend of the pivot columns
    pub fn stacked_bars(
        &self,
        text: ChartText<'_>,
        legend_title: &str,
        data: &PivotTable,
    ) -> Result<String> {
        self.render(|root| charts::stacked_bars(root, text, legend_title, data))
    }

    pub fn heatmap(&self, title: &str, data: &CorrelationMatrix) -> Result<String> {
        self.render(|root| heatmap::correlation_heatmap(root, title, data))
    }

    pub fn donut(&self, title: &str, data: &[ValueCount]) -> Result<String> {
        self.render(|root| donut::donut(root, title, data))
    }
}

/// Write an SVG document to `path`
pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg)?;
    log::debug!("Wrote chart {}", path.display());
    Ok(())
}

pub(crate) fn title_font() -> FontDesc<'static> {
    (FONT, 20).into_font()
}

pub(crate) fn label_font(size: u32) -> FontDesc<'static> {
    (FONT, size).into_font()
}

/// Pixel coordinate from a drawing area dimension
pub(crate) fn px(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Title plus a centred notice, used when a summary has nothing to show
pub(crate) fn no_data(root: &Area<'_>, title: &str) -> DrawResult {
    let area = root.titled(title, title_font())?;
    let (w, h) = area.dim_in_pixel();
    let style = TextStyle::from(label_font(14))
        .color(&palette::INK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        "No data for the current selection",
        (px(w) / 2, px(h) / 2),
        style,
    ))?;
    Ok(())
}
