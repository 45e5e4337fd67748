//! The render cycle
//!
//! A cycle takes the current product-line selection, filters the cached
//! table, computes every panel summary and writes the charts, the page and
//! the JSON summary into the output directory. An empty selection stops the
//! cycle after writing a page that only carries the prompt.

pub mod model;
pub mod page;
pub mod panels;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

pub use model::DashboardModel;
pub use panels::{DataScope, Panel, Section};

use crate::config::DashboardConfig;
use crate::error::util::ensure_directory;
use crate::error::Result;
use crate::filter::{FilterOutcome, ProductLineSelection, apply_selection};
use crate::models::SalesTable;
use crate::reader::DatasetCache;
use crate::render::{ChartRenderer, ChartText, write_svg};
use crate::utils::logging::{
    create_panel_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
    log_selection,
};
use page::{PageBody, render_page};

/// Prompt shown when no product line is selected
pub const NO_SELECTION_MESSAGE: &str = "Select at least one product line.";

/// Name of the page inside the output directory
pub const INDEX_FILE: &str = "index.html";

/// Name of the JSON summary inside the output directory
pub const SUMMARY_FILE: &str = "summary.json";

/// One rendered chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelOutput {
    pub panel: Panel,
    pub number: u8,
    pub section: Section,
    pub title: String,
    pub caption: String,
    pub scope: DataScope,
    /// File name relative to the output directory
    pub file_name: String,
    pub svg_path: PathBuf,
}

/// Everything a completed cycle produced
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub selection: ProductLineSelection,
    pub index_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub panels: Vec<PanelOutput>,
    pub model: DashboardModel,
}

/// Result of one render cycle
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// The selection was empty; only the prompt page was written
    NoSelection { message: String, index_path: PathBuf },
    /// All eight panels were rendered
    Rendered(Box<DashboardReport>),
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    selection: String,
    panels: &'a [PanelOutput],
    model: &'a DashboardModel,
}

/// Loads the table once and renders it on every cycle
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    cache: DatasetCache,
    renderer: ChartRenderer,
    show_progress: bool,
}

impl Dashboard {
    /// Create a dashboard after validating `config`
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            renderer: ChartRenderer::from_config(&config),
            config,
            cache: DatasetCache::new(),
            show_progress: false,
        })
    }

    /// Draw a progress bar on stderr while panels render
    #[must_use]
    pub const fn with_progress(mut self, visible: bool) -> Self {
        self.show_progress = visible;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub const fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// The session table, read from disk on first use only
    pub fn table(&self) -> Result<Arc<SalesTable>> {
        self.cache.get_or_load(&self.config.data_path, &self.config)
    }

    /// The sidebar options: distinct product lines in order of appearance
    pub fn product_lines(&self) -> Result<Vec<String>> {
        self.table()?.product_lines()
    }

    /// Run one render cycle for `selection`
    pub fn run_cycle(&self, selection: &ProductLineSelection) -> Result<CycleOutcome> {
        let start = Instant::now();
        let table = self.table()?;
        let catalog = table.product_lines()?;
        let out_dir = &self.config.output_dir;
        ensure_directory(out_dir)?;
        let index_path = out_dir.join(INDEX_FILE);
        log_selection(selection, &catalog);

        let filtered = match apply_selection(&table, selection)? {
            FilterOutcome::Filtered(filtered) => filtered,
            FilterOutcome::NoSelection => {
                self.remove_stale_outputs()?;
                let html = render_page(&catalog, selection, PageBody::Message(NO_SELECTION_MESSAGE));
                std::fs::write(&index_path, html)?;
                return Ok(CycleOutcome::NoSelection {
                    message: NO_SELECTION_MESSAGE.to_string(),
                    index_path,
                });
            }
        };

        log_operation_start("Rendering dashboard into", out_dir);
        let model = DashboardModel::build(&table, &filtered, &self.config)?;

        let pb = create_panel_progress_bar(Panel::ALL.len() as u64, self.show_progress);
        let mut panels = Vec::with_capacity(Panel::ALL.len());
        for panel in Panel::ALL {
            pb.set_message(panel.title());
            let svg = self.render_panel(panel, &model)?;
            let file_name = panel.file_name();
            let svg_path = out_dir.join(&file_name);
            write_svg(&svg_path, &svg)?;
            panels.push(PanelOutput {
                panel,
                number: panel.number(),
                section: panel.section(),
                title: panel.title().to_string(),
                caption: panel.caption().to_string(),
                scope: panel.scope(self.config.filter_all_panels),
                file_name,
                svg_path,
            });
            pb.inc(1);
        }
        finish_progress_bar(&pb, Some("Panels rendered"));

        std::fs::write(&index_path, render_page(&catalog, selection, PageBody::Panels(&panels)))?;

        let summary_path = if self.config.write_summary {
            let path = out_dir.join(SUMMARY_FILE);
            write_summary(&path, selection, &panels, &model)?;
            Some(path)
        } else {
            None
        };

        log_operation_complete("rendered", out_dir, panels.len(), Some(start.elapsed()));
        Ok(CycleOutcome::Rendered(Box::new(DashboardReport {
            selection: selection.clone(),
            index_path,
            summary_path,
            panels,
            model,
        })))
    }

    fn render_panel(&self, panel: Panel, model: &DashboardModel) -> Result<String> {
        let (x_desc, y_desc) = panel.axes();
        let text = ChartText::new(panel.title(), x_desc, y_desc);
        let r = &self.renderer;
        match panel {
            Panel::SalesOverTime => r.daily_counts(text, &model.daily_counts),
            Panel::RevenueByProductLine => r.revenue_bars(text, &model.revenue_by_product_line),
            Panel::RatingDistribution => r.histogram(text, &model.rating_histogram),
            Panel::SpendByCustomerType => r.box_plot(text, &model.spend_by_customer_type),
            Panel::CostVsGrossIncome => r.scatter(text, &model.cost_vs_gross_income),
            Panel::GrossIncomeByBranch => {
                r.stacked_bars(text, "Product line", &model.gross_income_by_branch)
            }
            Panel::Correlation => r.heatmap(panel.title(), &model.correlation),
            Panel::PaymentMethods => r.donut(panel.title(), &model.payment_methods),
        }
    }

    /// Remove charts and summary of an earlier cycle
    fn remove_stale_outputs(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        let stale = Panel::ALL
            .iter()
            .map(|p| dir.join(p.file_name()))
            .chain(std::iter::once(dir.join(SUMMARY_FILE)));
        for path in stale {
            if path.is_file() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

fn write_summary(
    path: &Path,
    selection: &ProductLineSelection,
    panels: &[PanelOutput],
    model: &DashboardModel,
) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    let summary = SummaryFile {
        selection: selection.to_string(),
        panels,
        model,
    };
    serde_json::to_writer_pretty(writer, &summary)?;
    log::debug!("Wrote summary {}", path.display());
    Ok(())
}
