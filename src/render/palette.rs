//! Colour palettes shared by the charts.

use plotters::style::RGBColor;

/// Soft qualitative palette for the revenue bars
pub const PASTEL: [RGBColor; 10] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
    RGBColor(208, 187, 255),
    RGBColor(222, 187, 155),
    RGBColor(250, 176, 228),
    RGBColor(207, 207, 207),
    RGBColor(255, 254, 163),
    RGBColor(185, 242, 240),
];

/// Qualitative palette for the box plot and the donut
pub const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

/// Lighter qualitative palette for the stacked bars
pub const PASTEL2: [RGBColor; 8] = [
    RGBColor(179, 226, 205),
    RGBColor(253, 205, 172),
    RGBColor(203, 213, 232),
    RGBColor(244, 202, 228),
    RGBColor(230, 245, 201),
    RGBColor(255, 242, 174),
    RGBColor(241, 226, 204),
    RGBColor(204, 204, 204),
];

/// Histogram bar colour
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
/// Line and marker colour
pub const STEEL_BLUE: RGBColor = RGBColor(31, 119, 180);
/// Dark text and outlines
pub const INK: RGBColor = RGBColor(40, 40, 40);

const RED: (f64, f64, f64) = (215.0, 48.0, 39.0);
const YELLOW: (f64, f64, f64) = (255.0, 255.0, 191.0);
const GREEN: (f64, f64, f64) = (26.0, 152.0, 80.0);

/// Colour `index` of a qualitative palette, cycling when it runs out
#[must_use]
pub fn cycle(palette: &[RGBColor], index: usize) -> RGBColor {
    palette[index % palette.len()]
}

/// Diverging red-yellow-green colour for a correlation in [-1, 1]
///
/// `NaN` maps to light grey.
#[must_use]
pub fn red_yellow_green(value: f64) -> RGBColor {
    if value.is_nan() {
        return RGBColor(220, 220, 220);
    }
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (RED, YELLOW, v + 1.0)
    } else {
        (YELLOW, GREEN, v)
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Text colour that stays readable on `background`
#[must_use]
pub fn contrasting_text(background: RGBColor) -> RGBColor {
    let luminance = 0.299 * f64::from(background.0)
        + 0.587 * f64::from(background.1)
        + 0.114 * f64::from(background.2);
    if luminance > 140.0 {
        INK
    } else {
        RGBColor(255, 255, 255)
    }
}
