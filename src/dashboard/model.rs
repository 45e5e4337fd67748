//! All panel summaries of one render cycle.

use serde::Serialize;

use crate::algorithm::{
    BoxStats, ConsistencyReport, CorrelationMatrix, DailyCount, GroupTotal, Histogram,
    PivotTable, ScatterSeries, ValueCount, box_stats_by, check_totals, correlation_matrix,
    histogram, pivot_sum, revenue_by_product_line, scatter_points, transactions_per_day,
    value_counts,
};
use crate::config::DashboardConfig;
use crate::dashboard::panels::{DataScope, Panel};
use crate::error::Result;
use crate::models::SalesTable;
use crate::schema;

/// Summaries behind the eight panels, computed from the full and the filtered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardModel {
    /// Rows in the loaded table
    pub total_rows: usize,
    /// Rows left after the product-line filter
    pub selected_rows: usize,
    /// Product lines present in the filtered rows
    pub selected_product_lines: Vec<String>,
    pub daily_counts: Vec<DailyCount>,
    pub revenue_by_product_line: Vec<GroupTotal>,
    pub rating_histogram: Histogram,
    pub spend_by_customer_type: Vec<BoxStats>,
    pub cost_vs_gross_income: ScatterSeries,
    pub gross_income_by_branch: PivotTable,
    pub correlation: CorrelationMatrix,
    pub payment_methods: Vec<ValueCount>,
    /// Total consistency of the loaded table
    pub consistency: ConsistencyReport,
}

impl DashboardModel {
    /// Run every panel aggregation on the table its scope selects
    pub fn build(
        full: &SalesTable,
        filtered: &SalesTable,
        config: &DashboardConfig,
    ) -> Result<Self> {
        let table_for = |panel: Panel| match panel.scope(config.filter_all_panels) {
            DataScope::Full => full,
            DataScope::Filtered => filtered,
        };

        let ratings = table_for(Panel::RatingDistribution).f64_values(schema::RATING)?;

        Ok(Self {
            total_rows: full.num_rows(),
            selected_rows: filtered.num_rows(),
            selected_product_lines: filtered.product_lines()?,
            daily_counts: transactions_per_day(table_for(Panel::SalesOverTime))?,
            revenue_by_product_line: revenue_by_product_line(table_for(
                Panel::RevenueByProductLine,
            ))?,
            rating_histogram: histogram(&ratings, config.histogram_bins),
            spend_by_customer_type: box_stats_by(
                table_for(Panel::SpendByCustomerType),
                schema::CUSTOMER_TYPE,
                schema::TOTAL,
            )?,
            cost_vs_gross_income: scatter_points(
                table_for(Panel::CostVsGrossIncome),
                schema::COGS,
                schema::GROSS_INCOME,
            )?,
            gross_income_by_branch: pivot_sum(
                table_for(Panel::GrossIncomeByBranch),
                schema::BRANCH,
                schema::PRODUCT_LINE,
                schema::GROSS_INCOME,
            )?,
            correlation: correlation_matrix(table_for(Panel::Correlation))?,
            payment_methods: value_counts(table_for(Panel::PaymentMethods), schema::PAYMENT)?,
            consistency: check_totals(full, config.tax_rate, config.total_tolerance)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{ProductLineSelection, apply_selection};
    use crate::utils::sample::sample_table;

    fn filtered(table: &SalesTable, lines: &[&str]) -> SalesTable {
        apply_selection(table, &ProductLineSelection::only(lines.iter().copied()))
            .unwrap()
            .into_table()
            .unwrap()
    }

    #[test]
    fn default_scopes_mix_full_and_filtered() {
        let full = sample_table(300, 21).unwrap();
        let part = filtered(&full, &["Sports and travel"]);
        let model = DashboardModel::build(&full, &part, &DashboardConfig::default()).unwrap();

        assert_eq!(model.total_rows, 300);
        assert_eq!(model.selected_rows, part.num_rows());
        // Full-table panels ignore the selection
        assert_eq!(model.daily_counts.iter().map(|d| d.count).sum::<usize>(), 300);
        assert_eq!(model.rating_histogram.total(), 300);
        assert_eq!(model.payment_methods.iter().map(|v| v.count).sum::<usize>(), 300);
        // Filtered panels only see the chosen line
        assert_eq!(model.revenue_by_product_line.len(), 1);
        assert_eq!(model.cost_vs_gross_income.points.len(), part.num_rows());
        assert_eq!(
            model.gross_income_by_branch.column_labels,
            vec!["Sports and travel".to_string()]
        );
    }

    #[test]
    fn filter_all_panels_restricts_every_summary() {
        let full = sample_table(300, 21).unwrap();
        let part = filtered(&full, &["Food and beverages", "Fashion accessories"]);
        let config = DashboardConfig::default().with_filter_all_panels(true);
        let model = DashboardModel::build(&full, &part, &config).unwrap();

        let rows = part.num_rows();
        assert_eq!(model.daily_counts.iter().map(|d| d.count).sum::<usize>(), rows);
        assert_eq!(model.rating_histogram.total(), rows);
        assert_eq!(
            model.spend_by_customer_type.iter().map(|b| b.count).sum::<usize>(),
            rows
        );
        assert_eq!(model.payment_methods.iter().map(|v| v.count).sum::<usize>(), rows);
    }

    #[test]
    fn histogram_uses_configured_bins() {
        let full = sample_table(50, 4).unwrap();
        let model = DashboardModel::build(&full, &full, &DashboardConfig::default()).unwrap();
        assert_eq!(model.rating_histogram.counts.len(), 20);
        assert!(model.consistency.is_consistent());
    }
}
