//! The eight dashboard panels and the sections they are grouped in.

use serde::Serialize;

/// Which table a panel aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataScope {
    /// Every loaded row, whatever the selection
    Full,
    /// Only rows of the selected product lines
    Filtered,
}

/// Thematic row of the page; each holds two panels side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    SalesOverTime,
    CustomerBehaviour,
    GrossIncomeBehaviour,
    CorrelationAndPayments,
}

impl Section {
    pub const ALL: [Self; 4] = [
        Self::SalesOverTime,
        Self::CustomerBehaviour,
        Self::GrossIncomeBehaviour,
        Self::CorrelationAndPayments,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SalesOverTime => "Sales over time",
            Self::CustomerBehaviour => "Customer behaviour",
            Self::GrossIncomeBehaviour => "Gross income behaviour",
            Self::CorrelationAndPayments => "Correlation and payment methods",
        }
    }

    /// Left and right panel of the section
    #[must_use]
    pub const fn panels(self) -> [Panel; 2] {
        match self {
            Self::SalesOverTime => [Panel::SalesOverTime, Panel::RevenueByProductLine],
            Self::CustomerBehaviour => [Panel::RatingDistribution, Panel::SpendByCustomerType],
            Self::GrossIncomeBehaviour => [Panel::CostVsGrossIncome, Panel::GrossIncomeByBranch],
            Self::CorrelationAndPayments => [Panel::Correlation, Panel::PaymentMethods],
        }
    }
}

/// One chart with its caption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    SalesOverTime,
    RevenueByProductLine,
    RatingDistribution,
    SpendByCustomerType,
    CostVsGrossIncome,
    GrossIncomeByBranch,
    Correlation,
    PaymentMethods,
}

impl Panel {
    /// Panels in page order
    pub const ALL: [Self; 8] = [
        Self::SalesOverTime,
        Self::RevenueByProductLine,
        Self::RatingDistribution,
        Self::SpendByCustomerType,
        Self::CostVsGrossIncome,
        Self::GrossIncomeByBranch,
        Self::Correlation,
        Self::PaymentMethods,
    ];

    /// 1-based position on the page
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::SalesOverTime => 1,
            Self::RevenueByProductLine => 2,
            Self::RatingDistribution => 3,
            Self::SpendByCustomerType => 4,
            Self::CostVsGrossIncome => 5,
            Self::GrossIncomeByBranch => 6,
            Self::Correlation => 7,
            Self::PaymentMethods => 8,
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SalesOverTime => "sales_over_time",
            Self::RevenueByProductLine => "revenue_by_product_line",
            Self::RatingDistribution => "rating_distribution",
            Self::SpendByCustomerType => "spend_by_customer_type",
            Self::CostVsGrossIncome => "cost_vs_gross_income",
            Self::GrossIncomeByBranch => "gross_income_by_branch",
            Self::Correlation => "correlation_matrix",
            Self::PaymentMethods => "payment_methods",
        }
    }

    /// File name of the rendered chart inside the output directory
    #[must_use]
    pub fn file_name(self) -> String {
        format!("panel_{}_{}.svg", self.number(), self.slug())
    }

    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::SalesOverTime | Self::RevenueByProductLine => Section::SalesOverTime,
            Self::RatingDistribution | Self::SpendByCustomerType => Section::CustomerBehaviour,
            Self::CostVsGrossIncome | Self::GrossIncomeByBranch => Section::GrossIncomeBehaviour,
            Self::Correlation | Self::PaymentMethods => Section::CorrelationAndPayments,
        }
    }

    /// Table the panel reads unless every panel is switched to the filtered rows
    #[must_use]
    pub const fn default_scope(self) -> DataScope {
        match self {
            Self::RevenueByProductLine | Self::CostVsGrossIncome | Self::GrossIncomeByBranch => {
                DataScope::Filtered
            }
            _ => DataScope::Full,
        }
    }

    #[must_use]
    pub const fn scope(self, filter_all_panels: bool) -> DataScope {
        if filter_all_panels {
            DataScope::Filtered
        } else {
            self.default_scope()
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SalesOverTime => "Total sales over time",
            Self::RevenueByProductLine => "Revenue by product line",
            Self::RatingDistribution => "Distribution of customer ratings",
            Self::SpendByCustomerType => "Spend by customer type",
            Self::CostVsGrossIncome => "Cost of goods sold vs gross income",
            Self::GrossIncomeByBranch => "Gross income by branch and product line",
            Self::Correlation => "Correlation matrix of numeric variables",
            Self::PaymentMethods => "Payment method distribution",
        }
    }

    /// Axis descriptions (x, y); empty for the charts without axes
    #[must_use]
    pub const fn axes(self) -> (&'static str, &'static str) {
        match self {
            Self::SalesOverTime => ("Date", "Number of sales"),
            Self::RevenueByProductLine => ("Total sold (USD)", "Product line"),
            Self::RatingDistribution => ("Rating", "Frequency"),
            Self::SpendByCustomerType => ("Customer type", "Total sold (USD)"),
            Self::CostVsGrossIncome => ("Cost of goods sold", "Gross income"),
            Self::GrossIncomeByBranch => ("Branch", "Gross income (USD)"),
            Self::Correlation | Self::PaymentMethods => ("", ""),
        }
    }

    /// Fixed narrative shown under the chart
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::SalesOverTime => {
                "Daily sales show no sustained upward or downward trend, which points to \
                 fairly stable demand over the period. Several marked peaks stand out, \
                 especially in February and March. They may come from promotions, special \
                 events or busy days such as weekends and holidays, and each is followed \
                 by a short dip, as is usual after days of heavy trading."
            }
            Self::RevenueByProductLine => {
                "Food and beverages brings in the highest total revenue, while Health and \
                 beauty brings in the lowest. This matters when setting commercial \
                 strategy: effort can go to the most profitable lines, or to reinforcing \
                 the weaker ones to balance supply and demand."
            }
            Self::RatingDistribution => {
                "Most customer ratings fall between 6 and 8. The top score is rarely given, \
                 yet the overall perception of service and products is positive, which \
                 leaves room to improve the customer experience and lift satisfaction \
                 towards the upper range."
            }
            Self::SpendByCustomerType => {
                "Members tend to spend more on average than Normal customers. Both groups \
                 show high outliers, so Normal customers also make large purchases. This \
                 is useful when designing loyalty campaigns aimed at either segment."
            }
            Self::CostVsGrossIncome => {
                "Cost of goods sold and gross income follow a positive linear relationship: \
                 income grows in proportion to cost. No meaningful deviations from the line \
                 appear, so income can be taken as proportional to cost."
            }
            Self::GrossIncomeByBranch => {
                "Branch C generates the highest total gross income. Each branch has its \
                 own leading product lines: Home and lifestyle and Sports and travel in \
                 branch A, Health and beauty and Sports and travel in branch B, and a more \
                 even spread in branch C. These differences may reflect the demographics \
                 or buying habits of the areas the branches serve."
            }
            Self::Correlation => {
                "Total, cogs and gross income are almost perfectly correlated, as expected: \
                 the sale total is price times quantity, and both cost and gross income \
                 derive directly from those values. Rating shows practically no correlation \
                 with the other variables, so the customer's score is unrelated to the \
                 amount spent or the number of items bought, being a subjective \
                 judgement of the customer."
            }
            Self::PaymentMethods => {
                "E-wallets are the most used payment method, followed by cash and then \
                 credit cards. This is useful when planning promotions tied to the payment \
                 methods customers prefer."
            }
        }
    }
}
