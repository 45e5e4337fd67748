//! Configuration for the dashboard.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::schema::DateFormatConfig;

/// Default location of the sales table, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "data.csv";

/// Default directory the rendered dashboard is written to
pub const DEFAULT_OUTPUT_DIR: &str = "dashboard";

/// Configuration for loading, filtering and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path of the CSV or Parquet source
    pub data_path: PathBuf,
    /// Directory receiving `index.html`, the SVG charts and `summary.json`
    pub output_dir: PathBuf,
    /// Field delimiter of the CSV source
    pub delimiter: char,
    /// Number of CSV records sampled for schema inference
    pub schema_infer_records: usize,
    /// Rows per Arrow batch while reading
    pub batch_size: usize,
    /// Date parsing configuration for the `Date` column
    pub date_format_config: DateFormatConfig,
    /// Number of histogram bins for the rating distribution
    pub histogram_bins: usize,
    /// Width and height of every chart, in pixels
    pub chart_size: (u32, u32),
    /// Render every panel from the filtered table instead of only the
    /// revenue, scatter and branch panels
    pub filter_all_panels: bool,
    /// Tax rate used by the total consistency check
    pub tax_rate: f64,
    /// Absolute tolerance of the total consistency check
    pub total_tolerance: f64,
    /// Write `summary.json` next to the charts
    pub write_summary: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            delimiter: ',',
            schema_infer_records: 1000,
            batch_size: 8192,
            date_format_config: DateFormatConfig::default(),
            histogram_bins: 20,
            chart_size: (800, 450),
            filter_all_panels: false,
            tax_rate: 0.05,
            total_tolerance: 0.01,
            write_summary: true,
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = crate::error::util::safe_open_file(path, "dashboard configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the dashboard meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(DashboardError::config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if self.histogram_bins == 0 {
            return Err(DashboardError::config("histogram_bins must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(DashboardError::config("batch_size must be at least 1"));
        }
        if self.chart_size.0 < 100 || self.chart_size.1 < 100 {
            return Err(DashboardError::config(format!(
                "chart_size {:?} is too small (minimum 100x100)",
                self.chart_size
            )));
        }
        if self.date_format_config.date_formats.is_empty()
            && !self.date_format_config.enable_format_detection
        {
            return Err(DashboardError::config(
                "no date formats configured and format detection is disabled",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_date_format_config(mut self, config: DateFormatConfig) -> Self {
        self.date_format_config = config;
        self
    }

    #[must_use]
    pub const fn with_filter_all_panels(mut self, enabled: bool) -> Self {
        self.filter_all_panels = enabled;
        self
    }

    #[must_use]
    pub const fn with_write_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    /// Delimiter as the byte the Arrow CSV reader expects
    #[must_use]
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(u32::from(self.delimiter)).unwrap_or(b',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.data_path, PathBuf::from("data.csv"));
        assert_eq!(config.delimiter_byte(), b',');
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "histogram_bins": 10, "delimiter": ";" }"#).unwrap();
        assert_eq!(config.histogram_bins, 10);
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.chart_size, (800, 450));
        assert_eq!(
            config.date_format_config.date_formats,
            DateFormatConfig::default().date_formats
        );
    }

    #[test]
    fn zero_bins_rejected() {
        let config = DashboardConfig {
            histogram_bins: 0,
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));
    }

    #[test]
    fn no_date_strategy_rejected() {
        let config = DashboardConfig::default()
            .with_date_format_config(DateFormatConfig::default().with_formats(Vec::<String>::new()));
        assert!(config.validate().is_err());
    }
}
