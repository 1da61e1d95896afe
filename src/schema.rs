use crate::error::{DashboardMetricsError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys of the dashboard payload that must hold arrays when present.
const COLLECTION_KEYS: [&str; 5] = [
    "popularProducts",
    "salesSummary",
    "purchaseSummary",
    "expenseSummary",
    "expenseByCategorySummary",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[schemars(description = "Expense category name as entered by the user (e.g. 'Office', 'Salaries')")]
    pub category: String,

    #[schemars(
        description = "Monetary amount as decimal text (e.g. '1520.75'). Parsed before summing; unparsable text is reported and skipped."
    )]
    pub amount: String,

    #[schemars(description = "ISO-8601 date or date-time. Only the date part is used for filtering.")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    #[schemars(description = "ISO-8601 date of the period this point summarizes")]
    pub date: String,

    #[schemars(description = "Total sales value for the period")]
    pub total_value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Percentage change against the previous period, if known")]
    pub change_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePoint {
    #[schemars(description = "ISO-8601 date of the period this point summarizes")]
    pub date: String,

    #[schemars(description = "Total purchased value for the period")]
    pub total_purchased: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Percentage change against the previous period, if known")]
    pub change_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Average customer rating (0-5). Absent for unrated products.")]
    pub rating: Option<f64>,

    pub stock_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub expense_summary_id: String,
    pub total_expenses: f64,
    pub date: String,
}

/// Everything the dashboard page needs, as delivered by the metrics endpoint.
/// Missing or `null` collections are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[serde(default)]
    pub popular_products: Vec<Product>,

    #[serde(default)]
    pub sales_summary: Vec<SalesPoint>,

    #[serde(default)]
    pub purchase_summary: Vec<PurchasePoint>,

    #[serde(default)]
    pub expense_summary: Vec<ExpenseSummary>,

    #[serde(default)]
    pub expense_by_category_summary: Vec<ExpenseRecord>,
}

impl DashboardMetrics {
    /// Parses a dashboard payload. A collection key holding anything other
    /// than an array (or `null`) is rejected with an error naming that key.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(json)?;
        let kind = json_kind(&value);

        let object = value
            .as_object_mut()
            .ok_or_else(|| DashboardMetricsError::InvalidInput {
                argument: "dashboardMetrics".to_string(),
                details: format!("expected an object, got {}", kind),
            })?;

        for key in COLLECTION_KEYS {
            match object.get(key).map(json_kind) {
                None | Some("an array") => {}
                Some("null") => {
                    object.remove(key);
                }
                Some(other) => {
                    return Err(DashboardMetricsError::InvalidInput {
                        argument: key.to_string(),
                        details: format!("expected an array, got {}", other),
                    });
                }
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DashboardMetrics)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Parses the expenses-by-category endpoint, which returns a bare array.
pub fn expenses_from_json(json: &str) -> Result<Vec<ExpenseRecord>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Null => Ok(Vec::new()),
        other => Err(DashboardMetricsError::InvalidInput {
            argument: "expenses".to_string(),
            details: format!("expected an array, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
