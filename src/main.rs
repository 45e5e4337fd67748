//! Command line entry point for the sales dashboard.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::utils::logging::console::{
    print_cycle_outcome, print_product_lines, print_table_summary,
};
use sales_dashboard::utils::sample::{generate_records, write_csv};
use sales_dashboard::{Dashboard, ProductLineSelection};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Supermarket sales dashboard",
    long_about = "Loads a supermarket sales table, filters it by product line and renders \
                  eight charts with captions into a static HTML page.\n\n\
                  EXAMPLES:\n  \
                  sales-dashboard render --data data.csv --out dashboard\n  \
                  sales-dashboard render -p \"Health and beauty,Sports and travel\"\n  \
                  sales-dashboard generate --rows 1000 --out data.csv"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Where the data comes from and how it is parsed
#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Sales table, CSV or Parquet
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Date format for the Date column (chrono syntax), tried in the given order
    #[arg(long = "date-format")]
    date_formats: Vec<String>,

    /// Guess the date format from the shape of the values if no format matches
    #[arg(long)]
    detect_date_format: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the dashboard once
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory for the page, charts and summary
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Comma separated product lines, "*" for all, "" for none; quote a
        /// line that contains a comma, e.g. '"Food, beverages",Sports and travel'
        #[arg(short, long, default_value = "*")]
        product_lines: String,

        /// Apply the selection to every panel instead of only the revenue,
        /// scatter and branch panels
        #[arg(long)]
        filter_all_panels: bool,

        /// Do not write summary.json
        #[arg(long)]
        no_summary: bool,

        /// Show a progress bar while rendering
        #[arg(long)]
        progress: bool,
    },
    /// Read one selection per line from stdin and re-render after each
    Interactive {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory for the page, charts and summary
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write a synthetic sales table
    Generate {
        /// Number of rows
        #[arg(short, long, default_value_t = 1000)]
        rows: usize,

        /// Random seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Output CSV path
        #[arg(short, long, default_value = "data.csv")]
        out: PathBuf,

        /// Date format written to the Date column
        #[arg(long, default_value = "%m/%d/%Y")]
        date_format: String,
    },
    /// List the product lines found in the data
    ProductLines {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn build_config(source: &SourceArgs, out: Option<&PathBuf>) -> Result<DashboardConfig> {
    let mut config = match &source.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = &source.data {
        config = config.with_data_path(data);
    }
    if let Some(out) = out {
        config = config.with_output_dir(out);
    }
    if !source.date_formats.is_empty() {
        let dates = config
            .date_format_config
            .clone()
            .with_formats(source.date_formats.iter().cloned());
        config = config.with_date_format_config(dates);
    }
    if source.detect_date_format {
        let dates = config.date_format_config.clone().with_detection(true);
        config = config.with_date_format_config(dates);
    }
    config.validate()?;
    Ok(config)
}

fn render(dashboard: &Dashboard, selection: &ProductLineSelection) -> Result<()> {
    let outcome = dashboard
        .run_cycle(selection)
        .context("Failed to render the dashboard")?;
    print_cycle_outcome(&outcome);
    Ok(())
}

fn interactive(dashboard: &Dashboard) -> Result<()> {
    let catalog = dashboard.product_lines()?;
    print_product_lines(&catalog, &ProductLineSelection::All);
    render(dashboard, &ProductLineSelection::All)?;

    println!(
        "Enter product lines separated by commas (quote names containing a comma), \"*\" for all, an empty line for none, \"q\" to quit."
    );
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        let selection: ProductLineSelection = line.parse()?;
        print_product_lines(&catalog, &selection);
        render(dashboard, &selection)?;
    }
    info!(
        "Interactive session finished after {} data load(s)",
        dashboard.cache().load_count()
    );
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            source,
            out,
            product_lines,
            filter_all_panels,
            no_summary,
            progress,
        } => {
            let mut config = build_config(&source, out.as_ref())?;
            if filter_all_panels {
                config = config.with_filter_all_panels(true);
            }
            if no_summary {
                config = config.with_write_summary(false);
            }
            let dashboard = Dashboard::new(config)?.with_progress(progress);
            let selection: ProductLineSelection = product_lines.parse()?;
            render(&dashboard, &selection)?;
        }
        Command::Interactive { source, out } => {
            let dashboard = Dashboard::new(build_config(&source, out.as_ref())?)?;
            interactive(&dashboard)?;
        }
        Command::Generate {
            rows,
            seed,
            out,
            date_format,
        } => {
            let records = generate_records(rows, seed);
            write_csv(&out, &records, &date_format)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Wrote {rows} rows to {}", out.display());
        }
        Command::ProductLines { source } => {
            let dashboard = Dashboard::new(build_config(&source, None)?)?;
            let table = dashboard.table()?;
            print_table_summary(&table);
            print_product_lines(&table.product_lines()?, &ProductLineSelection::All);
        }
    }
    Ok(())
}
