//! Equal-width histogram with a Gaussian kernel density overlay.

use serde::Serialize;

/// Number of points the density curve is evaluated at
const DENSITY_POINTS: usize = 200;

/// Binned distribution of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `bins + 1` ascending edges; the last bin includes its right edge
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Kernel density estimate scaled to counts per bin, as (x, y) points
    pub density: Vec<(f64, f64)>,
}

impl Histogram {
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bin `values` into `bins` equal-width bins spanning their range
///
/// Non-finite values are ignored. A constant sample spans `value ± 0.5`.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    let (lo, hi) = match finite.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some(range) => range,
    };

    #[allow(clippy::cast_precision_loss)]
    let width = (hi - lo) / bins as f64;
    #[allow(clippy::cast_precision_loss)]
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0_usize; bins];
    for v in &finite {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let density = kde_curve(&finite, lo, hi, width);
    Histogram {
        edges,
        counts,
        density,
    }
}

/// Gaussian KDE with Scott's bandwidth, scaled by `n * bin_width`
fn kde_curve(values: &[f64], lo: f64, hi: f64, bin_width: f64) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }
    #[allow(clippy::cast_precision_loss)]
    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nf - 1.0);
    let std = variance.sqrt();
    if std == 0.0 {
        return Vec::new();
    }

    let bandwidth = std * nf.powf(-0.2);
    let norm = 1.0 / (nf * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = nf * bin_width;

    #[allow(clippy::cast_precision_loss)]
    let step = (hi - lo) / (DENSITY_POINTS - 1) as f64;
    (0..DENSITY_POINTS)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = lo + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect()
}
