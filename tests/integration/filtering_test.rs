use sales_dashboard::filter::FilterOutcome;
use sales_dashboard::{
    DashboardConfig, ProductLineSelection, apply_selection, load_sales_table,
};

use crate::utils::{SAMPLE_ROWS, rows_in, sample_csv, sample_records};

#[test]
fn subset_keeps_exactly_the_selected_rows() -> sales_dashboard::Result<()> {
    let table = load_sales_table(&sample_csv("filter_subset")?, &DashboardConfig::default())?;
    let chosen = ["Health and beauty", "Sports and travel"];

    let filtered = apply_selection(&table, &ProductLineSelection::only(chosen))?
        .into_table()
        .expect("non-empty selection yields a table");

    assert_eq!(filtered.num_rows(), rows_in(&sample_records(), &chosen));
    let mut lines = filtered.product_lines()?;
    lines.sort();
    assert_eq!(lines, vec!["Health and beauty", "Sports and travel"]);
    Ok(())
}

#[test]
fn all_selection_is_the_identity() -> sales_dashboard::Result<()> {
    let table = load_sales_table(&sample_csv("filter_all")?, &DashboardConfig::default())?;
    let filtered = apply_selection(&table, &ProductLineSelection::All)?
        .into_table()
        .expect("the full selection yields a table");

    assert_eq!(filtered.num_rows(), SAMPLE_ROWS);
    assert_eq!(filtered.batch(), table.batch());
    Ok(())
}

#[test]
fn selecting_every_line_explicitly_matches_all() -> sales_dashboard::Result<()> {
    let table = load_sales_table(&sample_csv("filter_every")?, &DashboardConfig::default())?;
    let every = ProductLineSelection::only(table.product_lines()?);
    let filtered = apply_selection(&table, &every)?
        .into_table()
        .expect("non-empty selection yields a table");
    assert_eq!(filtered.num_rows(), table.num_rows());
    Ok(())
}

#[test]
fn empty_selection_renders_nothing() -> sales_dashboard::Result<()> {
    let table = load_sales_table(&sample_csv("filter_empty")?, &DashboardConfig::default())?;
    let outcome = apply_selection(&table, &"".parse()?)?;
    assert!(matches!(outcome, FilterOutcome::NoSelection));
    Ok(())
}

#[test]
fn unknown_line_matches_no_rows() -> sales_dashboard::Result<()> {
    let table = load_sales_table(&sample_csv("filter_unknown")?, &DashboardConfig::default())?;
    let filtered = apply_selection(&table, &ProductLineSelection::only(["Groceries"]))?
        .into_table()
        .expect("non-empty selection yields a table");
    assert!(filtered.is_empty());
    Ok(())
}
