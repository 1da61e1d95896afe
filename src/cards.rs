use crate::aggregator::{aggregate_by_category, CategoryTotal, ExpenseFilter, ParseAnomaly};
use crate::color::card_palette_color;
use crate::config::AggregationOptions;
use crate::format::{
    format_axis_date, format_axis_millions, format_compact_currency, format_fixed, format_millions,
    format_percentage, format_point_date, format_units_sold,
};
use crate::schema::{DashboardMetrics, ExpenseSummary, Product, PurchasePoint, SalesPoint};
use crate::trend::{summarize_trend, TrendDirection, TrendSummary};
use crate::utils::parse_date_part;
use serde::{Deserialize, Serialize};

/// Suffix the expense card appends to every category label.
pub const EXPENSE_LABEL_SUFFIX: &str = "Expenses";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCard {
    pub categories: Vec<CategoryTotal>,
    pub total: f64,
    pub formatted_total: String,
    pub headline: Option<ExpenseSummary>,
    pub anomalies: Vec<ParseAnomaly>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesCard {
    pub summary: TrendSummary<SalesPoint>,
    pub total_label: String,
    pub average_change_label: String,
    pub highest_value_date_label: String,
    /// Footer count of the plotted points, e.g. `12 days`.
    pub period_count_label: String,
    /// X-axis ticks, one per point. Empty when the point's date does not parse.
    pub axis_date_labels: Vec<String>,
    /// Y-axis ticks in whole millions, one per point.
    pub axis_value_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCard {
    pub summary: TrendSummary<PurchasePoint>,
    pub last_value_label: String,
    pub direction: Option<TrendDirection>,
    /// Magnitude of the last change, e.g. `4.5%`. Absent without a change value.
    pub change_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub rating: Option<f64>,
    pub sold_label: String,
}

/// Expense pie of the dashboard: every category, no filters, colored by
/// position from the card palette.
pub fn build_expense_card(metrics: &DashboardMetrics, options: &AggregationOptions) -> ExpenseCard {
    let breakdown = aggregate_by_category(
        &metrics.expense_by_category_summary,
        &ExpenseFilter::all(),
        options,
    );

    let categories = breakdown
        .totals
        .into_iter()
        .enumerate()
        .map(|(index, total)| CategoryTotal {
            name: format!("{}{}", total.name, EXPENSE_LABEL_SUFFIX),
            value: total.value,
            color: Some(card_palette_color(index).to_string()),
        })
        .collect();

    ExpenseCard {
        categories,
        total: breakdown.total,
        formatted_total: format_fixed(breakdown.total),
        headline: metrics.expense_summary.first().cloned(),
        anomalies: breakdown.anomalies,
    }
}

pub fn build_sales_card(points: &[SalesPoint]) -> SalesCard {
    let summary = summarize_trend(points);

    SalesCard {
        total_label: format_millions(summary.total),
        average_change_label: format_percentage(summary.average_change_percentage),
        highest_value_date_label: format_point_date(summary.highest_value_point.as_ref()),
        period_count_label: format!("{} days", points.len()),
        axis_date_labels: points
            .iter()
            .map(|point| {
                parse_date_part(&point.date)
                    .map(format_axis_date)
                    .unwrap_or_default()
            })
            .collect(),
        axis_value_labels: points
            .iter()
            .map(|point| format_axis_millions(point.total_value))
            .collect(),
        summary,
    }
}

pub fn build_purchase_card(points: &[PurchasePoint]) -> PurchaseCard {
    let summary = summarize_trend(points);

    let last_value_label = match &summary.last_point {
        Some(point) => format_compact_currency(point.total_purchased),
        None => "0".to_string(),
    };

    let change_label = summary
        .last_point
        .as_ref()
        .and_then(|point| point.change_percentage)
        .map(|change| format!("{}%", change.abs()));

    PurchaseCard {
        last_value_label,
        direction: summary.last_direction(),
        change_label,
        summary,
    }
}

pub fn build_popular_products(products: &[Product]) -> Vec<ProductCard> {
    products
        .iter()
        .map(|product| ProductCard {
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            price: product.price,
            rating: product.rating,
            sold_label: format_units_sold(product.stock_quantity),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExpenseRecord;

    fn expense(category: &str, amount: &str) -> ExpenseRecord {
        ExpenseRecord {
            category: category.to_string(),
            amount: amount.to_string(),
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_expense_card_labels_and_colors() {
        let metrics = DashboardMetrics {
            expense_by_category_summary: vec![
                expense("Salaries", "1000"),
                expense("Office", "250.50"),
                expense("Professional", "300"),
                expense("Marketing", "49.50"),
                expense("Salaries", "500"),
            ],
            expense_summary: vec![ExpenseSummary {
                expense_summary_id: "s1".to_string(),
                total_expenses: 2100.0,
                date: "2024-01-31".to_string(),
            }],
            ..DashboardMetrics::default()
        };

        let card = build_expense_card(&metrics, &AggregationOptions::default());

        let names: Vec<&str> = card.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "SalariesExpenses",
                "OfficeExpenses",
                "ProfessionalExpenses",
                "MarketingExpenses"
            ]
        );
        assert_eq!(card.categories[0].value, 1500.0);
        assert_eq!(card.categories[0].color.as_deref(), Some("#00CA9F"));
        assert_eq!(card.categories[3].color.as_deref(), Some("#00CA9F"));
        assert_eq!(card.formatted_total, "2100.00");
        assert_eq!(card.headline.unwrap().total_expenses, 2100.0);
    }

    #[test]
    fn test_expense_card_without_data() {
        let card = build_expense_card(&DashboardMetrics::default(), &AggregationOptions::default());
        assert!(card.categories.is_empty());
        assert_eq!(card.formatted_total, "0.00");
        assert!(card.headline.is_none());
    }

    #[test]
    fn test_sales_card() {
        let points = vec![
            SalesPoint {
                date: "2024-01-01".to_string(),
                total_value: 1_000_000.0,
                change_percentage: Some(5.0),
            },
            SalesPoint {
                date: "2024-01-08".to_string(),
                total_value: 1_500_000.0,
                change_percentage: Some(-2.0),
            },
        ];

        let card = build_sales_card(&points);
        assert_eq!(card.total_label, "$2.5m");
        assert_eq!(card.average_change_label, "1.50%");
        assert_eq!(card.highest_value_date_label, "1/8/24");
        assert_eq!(card.period_count_label, "2 days");
        assert_eq!(card.axis_date_labels, vec!["1/1", "1/8"]);
        assert_eq!(card.axis_value_labels, vec!["$1m", "$2m"]);
    }

    #[test]
    fn test_sales_card_axis_skips_unparsable_date() {
        let points = vec![
            SalesPoint {
                date: "2024-03-19T00:00:00Z".to_string(),
                total_value: 3_000_000.0,
                change_percentage: None,
            },
            SalesPoint {
                date: "someday".to_string(),
                total_value: 12_000_000.0,
                change_percentage: None,
            },
        ];

        let card = build_sales_card(&points);
        assert_eq!(card.axis_date_labels, vec!["3/19".to_string(), String::new()]);
        assert_eq!(card.axis_value_labels, vec!["$3m", "$12m"]);
        assert_eq!(card.period_count_label, "2 days");
    }

    #[test]
    fn test_sales_card_empty() {
        let card = build_sales_card(&[]);
        assert_eq!(card.total_label, "$0m");
        assert_eq!(card.average_change_label, "0.00%");
        assert_eq!(card.highest_value_date_label, "N/A");
        assert_eq!(card.period_count_label, "0 days");
        assert!(card.axis_date_labels.is_empty());
        assert!(card.axis_value_labels.is_empty());
    }

    #[test]
    fn test_purchase_card() {
        let points = vec![
            PurchasePoint {
                date: "2024-01-01".to_string(),
                total_purchased: 800.0,
                change_percentage: None,
            },
            PurchasePoint {
                date: "2024-01-08".to_string(),
                total_purchased: 12_500.0,
                change_percentage: Some(-4.5),
            },
        ];

        let card = build_purchase_card(&points);
        assert_eq!(card.last_value_label, "$12.50k");
        assert_eq!(card.direction, Some(TrendDirection::Down));
        assert_eq!(card.change_label.as_deref(), Some("4.5%"));
    }

    #[test]
    fn test_purchase_card_empty() {
        let card = build_purchase_card(&[]);
        assert_eq!(card.last_value_label, "0");
        assert_eq!(card.direction, None);
        assert_eq!(card.change_label, None);
    }

    #[test]
    fn test_popular_products() {
        let products = vec![
            Product {
                product_id: "p1".to_string(),
                name: "Desk Lamp".to_string(),
                price: 39.99,
                rating: Some(4.5),
                stock_quantity: 2_400,
            },
            Product {
                product_id: "p2".to_string(),
                name: "Stapler".to_string(),
                price: 9.5,
                rating: None,
                stock_quantity: 320,
            },
        ];

        let cards = build_popular_products(&products);
        assert_eq!(cards[0].sold_label, "2.4k Sold");
        assert_eq!(cards[1].sold_label, "320 Sold");
        assert_eq!(cards[1].rating, None);
    }
}
