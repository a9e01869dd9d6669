use serde::Serialize;

use crate::models::EvaluationRecord;
use crate::taxonomy::{Dimension, Status};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub average: f64,
    pub strongest: Dimension,
    pub weakest: Dimension,
    pub risk_count: usize,
    pub status: Status,
    pub chart_series: Vec<(Dimension, i64)>,
}

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: i64,
}

impl Summary {
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.chart_series
            .iter()
            .map(|(dimension, value)| ChartPoint {
                label: dimension.label(),
                value: *value,
            })
            .collect()
    }
}

pub fn summarize(record: &EvaluationRecord) -> Summary {
    let chart_series: Vec<(Dimension, i64)> = record.scores().collect();
    let total: i64 = chart_series.iter().map(|(_, score)| score).sum();

    Summary {
        average: total as f64 / Dimension::COUNT as f64,
        strongest: first_extreme(&chart_series, |candidate, best| candidate > best),
        weakest: first_extreme(&chart_series, |candidate, best| candidate < best),
        risk_count: record.risks().len(),
        status: record.status,
        chart_series,
    }
}

// Only a strictly better score replaces the current pick, so ties go to the
// earlier dimension.
fn first_extreme(series: &[(Dimension, i64)], better: impl Fn(i64, i64) -> bool) -> Dimension {
    let mut pick = series[0];
    for &(dimension, score) in &series[1..] {
        if better(score, pick.1) {
            pick = (dimension, score);
        }
    }
    pick.0
}
