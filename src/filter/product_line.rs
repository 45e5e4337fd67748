//! Product-line selection
//!
//! The sidebar multi-select of the dashboard: every product line is selected
//! by default, any subset may be chosen, and an empty selection stops the
//! render cycle.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use arrow::array::{BooleanArray, StringArray};
use arrow::compute::kernels::cmp::eq;
use arrow::compute::or;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::{DashboardError, Result};
use crate::filter::core::BatchFilter;
use crate::models::SalesTable;
use crate::schema;
use crate::utils::logging::log_warning;

/// The user's product-line choice
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductLineSelection {
    /// Every product line (the default state of the multi-select)
    #[default]
    All,
    /// Exactly these product lines; may be empty
    Only(Vec<String>),
}

impl ProductLineSelection {
    /// Selection of the given lines, duplicates removed, order kept
    pub fn only<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(lines.into_iter().map(Into::into).unique().collect())
    }

    /// The cleared multi-select
    #[must_use]
    pub const fn none() -> Self {
        Self::Only(Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Only(lines) if lines.is_empty())
    }

    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(lines) => lines.iter().any(|l| l == line),
        }
    }

    /// Selected lines out of `catalog`, in catalog order
    #[must_use]
    pub fn resolve(&self, catalog: &[String]) -> Vec<String> {
        catalog
            .iter()
            .filter(|line| self.contains(line))
            .cloned()
            .collect()
    }
}

impl FromStr for ProductLineSelection {
    type Err = DashboardError;

    /// `*` selects everything, otherwise a comma separated list; an empty
    /// string is the cleared selection. Entries holding a comma are written in
    /// double quotes, `""` inside quotes is a literal quote.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "*" {
            return Ok(Self::All);
        }
        Ok(Self::only(
            split_entries(s)?
                .into_iter()
                .filter(|part| !part.is_empty()),
        ))
    }
}

/// Split a comma separated list, honouring double-quoted entries
fn split_entries(s: &str) -> Result<Vec<String>> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => quoted = !quoted,
            ',' if !quoted => entries.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    if quoted {
        return Err(DashboardError::config(format!(
            "Unterminated quote in product line selection: {s}"
        )));
    }
    entries.push(current.trim().to_string());
    Ok(entries)
}

impl fmt::Display for ProductLineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Only(lines) => {
                let entries = lines
                    .iter()
                    .map(|line| {
                        if line.contains(',') || line.contains('"') {
                            format!("\"{}\"", line.replace('"', "\"\""))
                        } else {
                            line.clone()
                        }
                    })
                    .collect::<Vec<_>>();
                f.write_str(&entries.join(","))
            }
        }
    }
}

/// Keeps rows whose product line is in a fixed set
#[derive(Debug, Clone)]
pub struct ProductLineFilter {
    lines: Vec<String>,
}

impl ProductLineFilter {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

impl BatchFilter for ProductLineFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let column = batch
            .column_by_name(schema::PRODUCT_LINE)
            .ok_or_else(|| DashboardError::MissingColumn(schema::PRODUCT_LINE.to_string()))?;

        let mut mask = BooleanArray::from(vec![false; batch.num_rows()]);
        for line in &self.lines {
            let matches = eq(column, &StringArray::new_scalar(line.as_str()))?;
            mask = or(&mask, &matches)?;
        }
        Ok(mask)
    }

    fn required_columns(&self) -> HashSet<String> {
        HashSet::from([schema::PRODUCT_LINE.to_string()])
    }
}

/// Result of applying a selection to the table
#[derive(Debug, Clone)]
pub enum FilterOutcome {
    /// The rows whose product line is selected
    Filtered(SalesTable),
    /// The selection was empty; nothing may be rendered this cycle
    NoSelection,
}

impl FilterOutcome {
    #[must_use]
    pub fn into_table(self) -> Option<SalesTable> {
        match self {
            Self::Filtered(table) => Some(table),
            Self::NoSelection => None,
        }
    }
}

/// Restrict `table` to the selected product lines
pub fn apply_selection(
    table: &SalesTable,
    selection: &ProductLineSelection,
) -> Result<FilterOutcome> {
    let lines = match selection {
        ProductLineSelection::All => return Ok(FilterOutcome::Filtered(table.clone())),
        ProductLineSelection::Only(lines) if lines.is_empty() => {
            log::info!("Empty product line selection, nothing to render");
            return Ok(FilterOutcome::NoSelection);
        }
        ProductLineSelection::Only(lines) => lines,
    };

    let catalog = table.product_lines()?;
    for unknown in lines.iter().filter(|l| !catalog.contains(l)) {
        log_warning(
            &format!("Selected product line '{unknown}' does not occur in the data"),
            None,
        );
    }

    let filter = ProductLineFilter::new(lines.clone());
    let batch = filter.filter(table.batch())?;
    log::debug!(
        "Product line filter kept {} of {} rows",
        batch.num_rows(),
        table.num_rows()
    );
    Ok(FilterOutcome::Filtered(SalesTable::try_new(batch)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test::small_table;

    #[test]
    fn parse_selection_strings() {
        assert_eq!(
            "*".parse::<ProductLineSelection>().unwrap(),
            ProductLineSelection::All
        );
        assert!("".parse::<ProductLineSelection>().unwrap().is_empty());
        assert!(" , ".parse::<ProductLineSelection>().unwrap().is_empty());
        assert_eq!(
            "Health and beauty, Home and lifestyle,Health and beauty"
                .parse::<ProductLineSelection>()
                .unwrap(),
            ProductLineSelection::only(["Health and beauty", "Home and lifestyle"])
        );
    }

    #[test]
    fn subset_keeps_exactly_matching_rows() {
        let table = small_table();
        let selection = ProductLineSelection::only(["Health and beauty"]);
        let filtered = apply_selection(&table, &selection)
            .unwrap()
            .into_table()
            .unwrap();

        assert_eq!(filtered.num_rows(), 2);
        let lines = filtered.utf8_column(schema::PRODUCT_LINE).unwrap();
        assert!(lines.iter().all(|l| l == Some("Health and beauty")));
    }

    #[test]
    fn all_returns_every_row() {
        let table = small_table();
        let filtered = apply_selection(&table, &ProductLineSelection::All)
            .unwrap()
            .into_table()
            .unwrap();
        assert_eq!(filtered.num_rows(), table.num_rows());
    }

    #[test]
    fn empty_selection_is_terminal() {
        let table = small_table();
        let outcome = apply_selection(&table, &ProductLineSelection::none()).unwrap();
        assert!(matches!(outcome, FilterOutcome::NoSelection));
    }

    #[test]
    fn unknown_line_matches_nothing() {
        let table = small_table();
        let selection = ProductLineSelection::only(["Toys"]);
        let filtered = apply_selection(&table, &selection)
            .unwrap()
            .into_table()
            .unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn resolve_follows_catalog_order() {
        let catalog = small_table().product_lines().unwrap();
        let selection = ProductLineSelection::only(["Home and lifestyle", "Health and beauty"]);
        assert_eq!(
            selection.resolve(&catalog),
            vec!["Health and beauty", "Home and lifestyle"]
        );
        assert_eq!(ProductLineSelection::All.resolve(&catalog), catalog);
    }

    #[test]
    fn filter_needs_the_product_line_column() {
        let filter = ProductLineFilter::new(vec!["Health and beauty".to_string()]);
        assert_eq!(
            filter.required_columns(),
            HashSet::from([schema::PRODUCT_LINE.to_string()])
        );
    }

    #[test]
    fn quoted_entries_may_hold_commas() {
        let selection: ProductLineSelection =
            r#""Food, beverages", Sports and travel"#.parse().unwrap();
        assert_eq!(
            selection,
            ProductLineSelection::only(["Food, beverages", "Sports and travel"])
        );
        assert_eq!(
            selection.to_string().parse::<ProductLineSelection>().unwrap(),
            selection
        );
        assert!(r#""Food, beverages"#.parse::<ProductLineSelection>().is_err());
    }
}
