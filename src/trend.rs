use crate::schema::{PurchasePoint, SalesPoint};
use serde::{Deserialize, Serialize};

/// A dated value with an optional period-over-period change.
pub trait TrendPoint {
    fn date(&self) -> &str;
    fn value(&self) -> f64;
    fn change_percentage(&self) -> Option<f64>;
}

impl TrendPoint for SalesPoint {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self) -> f64 {
        self.total_value
    }

    fn change_percentage(&self) -> Option<f64> {
        self.change_percentage
    }
}

impl TrendPoint for PurchasePoint {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self) -> f64 {
        self.total_purchased
    }

    fn change_percentage(&self) -> Option<f64> {
        self.change_percentage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// Zero counts as up.
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary<P> {
    pub total: f64,
    /// Mean over the points that carry a change value; 0 when none do.
    pub average_change_percentage: f64,
    pub last_point: Option<P>,
    /// First point holding the maximum value.
    pub highest_value_point: Option<P>,
}

impl<P> Default for TrendSummary<P> {
    fn default() -> Self {
        Self {
            total: 0.0,
            average_change_percentage: 0.0,
            last_point: None,
            highest_value_point: None,
        }
    }
}

impl<P: TrendPoint> TrendSummary<P> {
    pub fn is_empty(&self) -> bool {
        self.last_point.is_none()
    }

    /// Direction of the most recent change. `None` when there is no data or
    /// the last point carries no change value.
    pub fn last_direction(&self) -> Option<TrendDirection> {
        self.last_point
            .as_ref()
            .and_then(|p| p.change_percentage())
            .map(TrendDirection::from_change)
    }
}

pub fn summarize_trend<P: TrendPoint + Clone>(points: &[P]) -> TrendSummary<P> {
    let mut total = 0.0;
    let mut change_sum = 0.0;
    let mut change_count = 0usize;
    let mut highest: Option<&P> = None;

    for point in points {
        total += point.value();

        if let Some(change) = point.change_percentage() {
            change_sum += change;
            change_count += 1;
        }

        highest = match highest {
            Some(current) if point.value() > current.value() => Some(point),
            Some(current) => Some(current),
            None => Some(point),
        };
    }

    let average_change_percentage = if change_count == 0 {
        0.0
    } else {
        change_sum / change_count as f64
    };

    TrendSummary {
        total,
        average_change_percentage,
        last_point: points.last().cloned(),
        highest_value_point: highest.cloned(),
    }
}
