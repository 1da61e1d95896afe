//! # Dashboard Metrics
//!
//! Derived metrics for an inventory dashboard. The library takes the JSON
//! records a dashboard already fetched (expenses, sales and purchase
//! summaries, popular products) and turns them into chart-ready views.
//!
//! ## Core Concepts
//!
//! - **Category breakdown**: expenses grouped by category in first-seen order,
//!   optionally filtered by category and an inclusive date range
//! - **Trend summary**: total, average change, last point and highest point of
//!   a sales or purchase series
//! - **Anomalies**: amounts or dates that fail to parse are skipped and
//!   reported, never raised
//! - **Sources**: data arrives through a [`MetricsSource`], never from
//!   ambient state
//!
//! ## Example
//!
//! ```rust,ignore
//! use dashboard_metrics::*;
//!
//! let records = vec![
//!     ExpenseRecord {
//!         category: "Office".to_string(),
//!         amount: "100".to_string(),
//!         date: "2024-01-05".to_string(),
//!     },
//!     ExpenseRecord {
//!         category: "Office".to_string(),
//!         amount: "50".to_string(),
//!         date: "2024-02-01".to_string(),
//!     },
//! ];
//!
//! let filter = ExpenseFilter::from_inputs("Office", "2024-01-01", "2024-01-31").unwrap();
//! let breakdown = aggregate_by_category(&records, &filter, &AggregationOptions::default());
//! assert_eq!(breakdown.totals[0].value, 100.0);
//! ```

pub mod aggregator;
pub mod amount;
pub mod cards;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod schema;
pub mod source;
pub mod trend;
pub mod utils;

pub use aggregator::{
    aggregate_by_category, AnomalyField, CategoryAggregator, CategoryBreakdown, CategoryFilter,
    CategoryTotal, ExpenseFilter, ParseAnomaly, ALL_CATEGORIES,
};
pub use amount::{parse_amount, AmountParsing};
pub use cards::{
    build_expense_card, build_popular_products, build_purchase_card, build_sales_card,
    ExpenseCard, ProductCard, PurchaseCard, SalesCard,
};
pub use color::{card_palette_color, category_color};
pub use config::AggregationOptions;
pub use error::{DashboardMetricsError, Result};
pub use schema::{
    expenses_from_json, DashboardMetrics, ExpenseRecord, ExpenseSummary, Product, PurchasePoint,
    SalesPoint,
};
pub use source::{InMemorySource, JsonDocumentSource, MetricsSource};
pub use trend::{summarize_trend, TrendDirection, TrendPoint, TrendSummary};
pub use utils::{parse_date_part, DateRange};

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Every card of the dashboard page, derived from one metrics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub popular_products: Vec<ProductCard>,
    pub sales: SalesCard,
    pub purchases: PurchaseCard,
    pub expenses: ExpenseCard,
}

pub struct DashboardProcessor;

impl DashboardProcessor {
    pub fn process(metrics: &DashboardMetrics, options: &AggregationOptions) -> Result<DashboardView> {
        options.validate()?;

        info!("Building dashboard view");
        debug!(
            "Payload contains {} products, {} sales points, {} purchase points and {} expense records",
            metrics.popular_products.len(),
            metrics.sales_summary.len(),
            metrics.purchase_summary.len(),
            metrics.expense_by_category_summary.len()
        );

        let view = DashboardView {
            popular_products: build_popular_products(&metrics.popular_products),
            sales: build_sales_card(&metrics.sales_summary),
            purchases: build_purchase_card(&metrics.purchase_summary),
            expenses: build_expense_card(metrics, options),
        };

        if !view.expenses.anomalies.is_empty() {
            debug!(
                "Expense card skipped {} unparsable values",
                view.expenses.anomalies.len()
            );
        }

        Ok(view)
    }

    pub fn process_source(
        source: &dyn MetricsSource,
        options: &AggregationOptions,
    ) -> Result<DashboardView> {
        let metrics = source.dashboard_metrics()?;
        Self::process(&metrics, options)
    }

    /// Category breakdown behind the expenses page.
    pub fn explore_expenses(
        source: &dyn MetricsSource,
        filter: &ExpenseFilter,
        options: &AggregationOptions,
    ) -> Result<CategoryBreakdown> {
        options.validate()?;

        let expenses = source.expenses_by_category()?;
        info!(
            "Aggregating {} expense records (category: {:?}, range: {:?})",
            expenses.len(),
            filter.category,
            filter.date_range
        );

        Ok(aggregate_by_category(&expenses, filter, options))
    }
}

pub fn process_dashboard(
    source: &dyn MetricsSource,
    options: &AggregationOptions,
) -> Result<DashboardView> {
    DashboardProcessor::process_source(source, options)
}

pub fn explore_expenses(
    source: &dyn MetricsSource,
    filter: &ExpenseFilter,
    options: &AggregationOptions,
) -> Result<CategoryBreakdown> {
    DashboardProcessor::explore_expenses(source, filter, options)
}
