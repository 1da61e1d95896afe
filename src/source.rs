use crate::error::Result;
use crate::schema::{expenses_from_json, DashboardMetrics, ExpenseRecord};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Where already-fetched dashboard data comes from. The aggregation code only
/// ever sees this trait, so it runs without any network or UI runtime.
pub trait MetricsSource {
    fn dashboard_metrics(&self) -> Result<DashboardMetrics>;
    fn expenses_by_category(&self) -> Result<Vec<ExpenseRecord>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    metrics: DashboardMetrics,
    expenses: Vec<ExpenseRecord>,
}

impl InMemorySource {
    pub fn new(metrics: DashboardMetrics, expenses: Vec<ExpenseRecord>) -> Self {
        Self { metrics, expenses }
    }

    /// Serves the payload's own expense rows for the expenses page too.
    pub fn from_metrics(metrics: DashboardMetrics) -> Self {
        let expenses = metrics.expense_by_category_summary.clone();
        Self { metrics, expenses }
    }
}

impl MetricsSource for InMemorySource {
    fn dashboard_metrics(&self) -> Result<DashboardMetrics> {
        Ok(self.metrics.clone())
    }

    fn expenses_by_category(&self) -> Result<Vec<ExpenseRecord>> {
        Ok(self.expenses.clone())
    }
}

#[derive(Debug, Clone)]
enum Document {
    Text(String),
    File(PathBuf),
}

impl Document {
    fn read(&self) -> Result<String> {
        match self {
            Document::Text(text) => Ok(text.clone()),
            Document::File(path) => {
                debug!("Reading metrics document {}", path.display());
                Ok(fs::read_to_string(path)?)
            }
        }
    }
}

/// Reads the JSON bodies of the dashboard and expenses endpoints, either from
/// memory or from files on disk. Without an expenses document the dashboard
/// payload's `expenseByCategorySummary` is used.
#[derive(Debug, Clone)]
pub struct JsonDocumentSource {
    dashboard: Document,
    expenses: Option<Document>,
}

impl JsonDocumentSource {
    pub fn from_json(dashboard: impl Into<String>) -> Self {
        Self {
            dashboard: Document::Text(dashboard.into()),
            expenses: None,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            dashboard: Document::File(path.as_ref().to_path_buf()),
            expenses: None,
        }
    }

    pub fn with_expenses_json(mut self, expenses: impl Into<String>) -> Self {
        self.expenses = Some(Document::Text(expenses.into()));
        self
    }

    pub fn with_expenses_file(mut self, path: impl AsRef<Path>) -> Self {
        self.expenses = Some(Document::File(path.as_ref().to_path_buf()));
        self
    }
}

impl MetricsSource for JsonDocumentSource {
    fn dashboard_metrics(&self) -> Result<DashboardMetrics> {
        DashboardMetrics::from_json(&self.dashboard.read()?)
    }

    fn expenses_by_category(&self) -> Result<Vec<ExpenseRecord>> {
        match &self.expenses {
            Some(document) => expenses_from_json(&document.read()?),
            None => Ok(self.dashboard_metrics()?.expense_by_category_summary),
        }
    }
}
