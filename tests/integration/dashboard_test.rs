use sales_dashboard::dashboard::page::escape_html;
use sales_dashboard::dashboard::{INDEX_FILE, SUMMARY_FILE, Section};
use sales_dashboard::schema;
use sales_dashboard::{
    CycleOutcome, Dashboard, DashboardReport, NO_SELECTION_MESSAGE, Panel, ProductLineSelection,
};

use crate::utils::{SAMPLE_ROWS, rows_in, sample_csv, sample_records, test_config};

fn rendered(outcome: CycleOutcome) -> DashboardReport {
    match outcome {
        CycleOutcome::Rendered(report) => *report,
        CycleOutcome::NoSelection { .. } => panic!("expected a rendered dashboard"),
    }
}

#[test]
fn full_render_writes_page_charts_and_summary() -> sales_dashboard::Result<()> {
    let data = sample_csv("dash_full")?;
    let dashboard = Dashboard::new(test_config(&data, "dash_full"))?;
    let report = rendered(dashboard.run_cycle(&ProductLineSelection::All)?);

    assert_eq!(report.panels.len(), 8);
    for output in &report.panels {
        let svg = std::fs::read_to_string(&output.svg_path)?;
        assert!(svg.starts_with("<svg"), "{} is not an svg", output.file_name);
    }

    let html = std::fs::read_to_string(&report.index_path)?;
    for section in Section::ALL {
        assert!(html.contains(section.title()));
    }
    for panel in Panel::ALL {
        assert!(html.contains(&panel.file_name()));
        assert!(html.contains(&escape_html(panel.caption())));
    }

    let summary_path = report.summary_path.expect("summary is written by default");
    assert!(summary_path.ends_with(SUMMARY_FILE));
    let summary: serde_json::Value = serde_json::from_reader(std::fs::File::open(&summary_path)?)?;
    assert_eq!(summary["selection"], "*");
    assert_eq!(summary["panels"].as_array().map(Vec::len), Some(8));
    assert_eq!(summary["model"]["total_rows"], SAMPLE_ROWS);
    assert_eq!(summary["model"]["selected_rows"], SAMPLE_ROWS);
    Ok(())
}

#[test]
fn only_filtered_panels_follow_the_selection() -> sales_dashboard::Result<()> {
    let data = sample_csv("dash_scope")?;
    let dashboard = Dashboard::new(test_config(&data, "dash_scope"))?;
    let all = rendered(dashboard.run_cycle(&ProductLineSelection::All)?).model;
    let chosen = ["Electronic accessories"];
    let one = rendered(dashboard.run_cycle(&ProductLineSelection::only(chosen))?).model;

    assert_eq!(one.selected_rows, rows_in(&sample_records(), &chosen));
    assert_eq!(one.selected_product_lines, vec!["Electronic accessories"]);

    // Full-table panels
    assert_eq!(all.daily_counts, one.daily_counts);
    assert_eq!(all.rating_histogram, one.rating_histogram);
    assert_eq!(all.spend_by_customer_type, one.spend_by_customer_type);
    assert_eq!(all.correlation, one.correlation);
    assert_eq!(all.payment_methods, one.payment_methods);

    // Filtered panels
    assert_eq!(one.revenue_by_product_line.len(), 1);
    assert_eq!(one.cost_vs_gross_income.points.len(), one.selected_rows);
    assert_eq!(
        one.gross_income_by_branch.column_labels,
        vec!["Electronic accessories"]
    );
    assert!(all.revenue_by_product_line.len() > 1);
    Ok(())
}

#[test]
fn filter_all_panels_applies_the_selection_everywhere() -> sales_dashboard::Result<()> {
    let data = sample_csv("dash_filter_all")?;
    let config = test_config(&data, "dash_filter_all").with_filter_all_panels(true);
    let dashboard = Dashboard::new(config)?;
    let chosen = ["Food and beverages", "Fashion accessories"];
    let report = rendered(dashboard.run_cycle(&ProductLineSelection::only(chosen))?);

    let expected = rows_in(&sample_records(), &chosen);
    let counted: usize = report.model.daily_counts.iter().map(|d| d.count).sum();
    assert_eq!(counted, expected);
    assert_eq!(report.model.rating_histogram.total(), expected);
    // Consistency always covers the loaded table
    assert_eq!(report.model.consistency.checked, SAMPLE_ROWS);
    Ok(())
}

#[test]
fn empty_selection_writes_only_the_prompt() -> sales_dashboard::Result<()> {
    let data = sample_csv("dash_empty")?;
    let config = test_config(&data, "dash_empty");
    let out = config.output_dir.clone();
    let dashboard = Dashboard::new(config)?;

    rendered(dashboard.run_cycle(&ProductLineSelection::All)?);
    assert!(out.join(Panel::SalesOverTime.file_name()).is_file());

    match dashboard.run_cycle(&ProductLineSelection::none())? {
        CycleOutcome::NoSelection {
            message,
            index_path,
        } => {
            assert_eq!(message, NO_SELECTION_MESSAGE);
            assert!(index_path.ends_with(INDEX_FILE));
            let html = std::fs::read_to_string(&index_path)?;
            assert!(html.contains(NO_SELECTION_MESSAGE));
            assert!(!html.contains("<figure"));
        }
        CycleOutcome::Rendered(_) => panic!("empty selection must not render charts"),
    }
    for panel in Panel::ALL {
        assert!(!out.join(panel.file_name()).exists());
    }
    assert!(!out.join(SUMMARY_FILE).exists());
    Ok(())
}

#[test]
fn data_is_loaded_once_per_session() -> sales_dashboard::Result<()> {
    let data = sample_csv("dash_cache")?;
    let dashboard = Dashboard::new(test_config(&data, "dash_cache"))?;

    let catalog = dashboard.product_lines()?;
    for line in &catalog {
        rendered(dashboard.run_cycle(&ProductLineSelection::only([line.as_str()]))?);
    }
    dashboard.run_cycle(&ProductLineSelection::none())?;
    rendered(dashboard.run_cycle(&ProductLineSelection::All)?);

    assert_eq!(dashboard.cache().load_count(), 1);
    Ok(())
}

#[test]
fn correlation_is_symmetric_over_measures() -> sales_dashboard::Result<()> {
    let data = sample_csv("dash_corr")?;
    let dashboard = Dashboard::new(test_config(&data, "dash_corr"))?;
    let matrix = rendered(dashboard.run_cycle(&ProductLineSelection::All)?)
        .model
        .correlation;

    assert!(matrix.columns.iter().any(|c| c == schema::RATING));
    assert!(matrix.columns.iter().any(|c| c == schema::TOTAL));
    for excluded in [schema::INVOICE_ID, schema::PRODUCT_LINE] {
        assert!(!matrix.columns.iter().any(|c| c == excluded));
    }
    for a in &matrix.columns {
        assert!((matrix.get(a, a).unwrap_or(f64::NAN) - 1.0).abs() < 1e-9);
        for b in &matrix.columns {
            let ab = matrix.get(a, b).unwrap_or(f64::NAN);
            let ba = matrix.get(b, a).unwrap_or(f64::NAN);
            assert!((ab - ba).abs() < 1e-12, "{a} / {b} not symmetric");
            assert!((-1.0..=1.0).contains(&ab));
        }
    }
    Ok(())
}

#[test]
fn payment_shares_add_up() -> sales_dashboard::Result<()> {
    let data = sample_csv("dash_payment")?;
    let dashboard = Dashboard::new(test_config(&data, "dash_payment"))?;
    let payments = rendered(dashboard.run_cycle(&ProductLineSelection::All)?)
        .model
        .payment_methods;

    let percent: f64 = payments.iter().map(|p| p.percent).sum();
    let count: usize = payments.iter().map(|p| p.count).sum();
    assert!((percent - 100.0).abs() < 1e-9);
    assert_eq!(count, SAMPLE_ROWS);
    assert!(payments.windows(2).all(|w| w[0].count >= w[1].count));
    Ok(())
}
