use crate::amount::parse_amount;
use crate::config::AggregationOptions;
use crate::error::Result;
use crate::schema::ExpenseRecord;
use crate::utils::{parse_date_part, DateRange};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel the category selector uses for "no category filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: CategoryFilter,
    pub date_range: Option<DateRange>,
}

impl ExpenseFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a filter from the raw values of the expenses page controls.
    pub fn from_inputs(category: &str, start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            category: CategoryFilter::from(category),
            date_range: DateRange::from_inputs(start, end)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnomalyField {
    Amount,
    Date,
}

/// A record value that could not be parsed. The record contributed nothing
/// to the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseAnomaly {
    pub index: usize,
    pub category: String,
    pub field: AnomalyField,
    pub raw_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// One entry per category, in first-seen order.
    pub totals: Vec<CategoryTotal>,
    pub total: f64,
    pub anomalies: Vec<ParseAnomaly>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTotal> {
        self.totals.iter().find(|t| t.name == category)
    }
}

pub struct CategoryAggregator<'a> {
    options: &'a AggregationOptions,
}

impl<'a> CategoryAggregator<'a> {
    pub fn new(options: &'a AggregationOptions) -> Self {
        Self { options }
    }

    pub fn aggregate(&self, records: &[ExpenseRecord], filter: &ExpenseFilter) -> CategoryBreakdown {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut anomalies = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if !filter.category.matches(&record.category) {
                continue;
            }

            if let Some(range) = &filter.date_range {
                match parse_date_part(&record.date) {
                    Ok(date) if range.contains(date) => {}
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Skipping expense #{} ({}): {}", index, record.category, e);
                        anomalies.push(ParseAnomaly {
                            index,
                            category: record.category.clone(),
                            field: AnomalyField::Date,
                            raw_value: record.date.clone(),
                        });
                        continue;
                    }
                }
            }

            let slot = *positions.entry(record.category.as_str()).or_insert_with(|| {
                totals.push(CategoryTotal {
                    name: record.category.clone(),
                    value: 0.0,
                    color: self.options.color_for(&record.category),
                });
                totals.len() - 1
            });

            match parse_amount(&record.amount, self.options.amount_parsing) {
                Some(amount) => totals[slot].value += amount,
                None => {
                    warn!(
                        "Expense #{} ({}) has unparsable amount '{}'; counted as 0",
                        index, record.category, record.amount
                    );
                    anomalies.push(ParseAnomaly {
                        index,
                        category: record.category.clone(),
                        field: AnomalyField::Amount,
                        raw_value: record.amount.clone(),
                    });
                }
            }
        }

        let total = totals.iter().fold(0.0, |acc, t| acc + t.value);

        debug!(
            "Aggregated {} expense records into {} categories ({} anomalies)",
            records.len(),
            totals.len(),
            anomalies.len()
        );

        CategoryBreakdown {
            totals,
            total,
            anomalies,
        }
    }
}

pub fn aggregate_by_category(
    records: &[ExpenseRecord],
    filter: &ExpenseFilter,
    options: &AggregationOptions,
) -> CategoryBreakdown {
    CategoryAggregator::new(options).aggregate(records, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::AmountParsing;

    fn expense(category: &str, amount: &str, date: &str) -> ExpenseRecord {
        ExpenseRecord {
            category: category.to_string(),
            amount: amount.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_category_and_range_filter() {
        let records = vec![
            expense("Office", "100", "2024-01-05"),
            expense("Office", "50", "2024-02-01"),
        ];
        let filter = ExpenseFilter::from_inputs("Office", "2024-01-01", "2024-01-31").unwrap();

        let breakdown = aggregate_by_category(&records, &filter, &AggregationOptions::default());

        assert_eq!(breakdown.totals.len(), 1);
        assert_eq!(breakdown.totals[0].name, "Office");
        assert_eq!(breakdown.totals[0].value, 100.0);
        assert_eq!(breakdown.total, 100.0);
        assert!(breakdown.anomalies.is_empty());
    }

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            expense("Salaries", "10", "2024-01-01"),
            expense("Office", "20", "2024-01-02"),
            expense("Salaries", "30", "2024-01-03"),
            expense("Professional", "5", "2024-01-04"),
        ];

        let breakdown =
            aggregate_by_category(&records, &ExpenseFilter::all(), &AggregationOptions::default());

        let names: Vec<&str> = breakdown.totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Salaries", "Office", "Professional"]);
        assert_eq!(breakdown.get("Salaries").unwrap().value, 40.0);
        assert_eq!(breakdown.total, 65.0);
    }

    #[test]
    fn test_unparsable_amount_is_reported_not_fatal() {
        let records = vec![
            expense("Office", "abc", "2024-01-01"),
            expense("Office", "25", "2024-01-02"),
            expense("Travel", "", "2024-01-03"),
        ];

        let breakdown =
            aggregate_by_category(&records, &ExpenseFilter::all(), &AggregationOptions::default());

        assert_eq!(breakdown.get("Office").unwrap().value, 25.0);
        // Category still appears even though none of its amounts parsed.
        assert_eq!(breakdown.get("Travel").unwrap().value, 0.0);
        assert_eq!(breakdown.anomalies.len(), 2);
        assert_eq!(breakdown.anomalies[0].index, 0);
        assert_eq!(breakdown.anomalies[0].field, AnomalyField::Amount);
        assert_eq!(breakdown.anomalies[1].raw_value, "");
    }

    #[test]
    fn test_truncating_mode_drops_cents() {
        let records = vec![
            expense("Office", "10.75", "2024-01-01"),
            expense("Office", "0.99", "2024-01-02"),
        ];

        let exact =
            aggregate_by_category(&records, &ExpenseFilter::all(), &AggregationOptions::default());
        assert!((exact.total - 11.74).abs() < 1e-9);

        let truncated = aggregate_by_category(
            &records,
            &ExpenseFilter::all(),
            &AggregationOptions::truncating(),
        );
        assert_eq!(truncated.total, 10.0);
    }

    #[test]
    fn test_bad_date_only_matters_with_range() {
        let records = vec![
            expense("Office", "10", "not a date"),
            expense("Office", "5", "2024-01-10T12:00:00Z"),
        ];

        let unfiltered =
            aggregate_by_category(&records, &ExpenseFilter::all(), &AggregationOptions::default());
        assert_eq!(unfiltered.total, 15.0);
        assert!(unfiltered.anomalies.is_empty());

        let filter = ExpenseFilter::from_inputs("All", "2024-01-01", "2024-01-31").unwrap();
        let ranged = aggregate_by_category(&records, &filter, &AggregationOptions::default());
        assert_eq!(ranged.total, 5.0);
        assert_eq!(ranged.anomalies.len(), 1);
        assert_eq!(ranged.anomalies[0].field, AnomalyField::Date);
    }

    #[test]
    fn test_colors_are_consistent_per_category() {
        let records = vec![
            expense("Office", "1", "2024-01-01"),
            expense("Office", "2", "2024-01-02"),
        ];
        let options = AggregationOptions::default();

        let first = aggregate_by_category(&records, &ExpenseFilter::all(), &options);
        let second = aggregate_by_category(&records, &ExpenseFilter::all(), &options);
        assert!(first.totals[0].color.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let breakdown = aggregate_by_category(
            &[],
            &ExpenseFilter::all(),
            &AggregationOptions {
                amount_parsing: AmountParsing::Truncate,
                palette: None,
            },
        );
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total, 0.0);
        assert!(!breakdown.total.is_sign_negative());
    }

    #[test]
    fn test_category_filter_from_str() {
        assert_eq!(CategoryFilter::from("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("Office"),
            CategoryFilter::Only("Office".to_string())
        );
        assert!(!CategoryFilter::from("Office").matches("office"));
    }
}
