use std::collections::BTreeMap;

use crate::{Confidence, HistoryEntry, InputMode, PredictionResult, Verdict};

/// Slice labels of the verdict chart, in data order.
pub const CHART_LABELS: [&str; 2] = ["Real News", "Fake News"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub mode: InputMode,
    pub input: String,
    pub pending: bool,
    pub submit_enabled: bool,
    /// Shown instead of the result when set.
    pub error: Option<String>,
    pub result: Option<ResultView>,
    /// Newest first.
    pub history: Vec<HistoryRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub verdict: Verdict,
    pub chip_label: &'static str,
    pub confidence: Confidence,
    pub confidence_text: String,
    pub chart: ChartSeries,
}

impl ResultView {
    pub(crate) fn from_result(result: PredictionResult) -> Self {
        Self {
            verdict: result.verdict,
            chip_label: result.verdict.chip_label(),
            confidence: result.confidence,
            confidence_text: format_percent(result.confidence),
            chart: ChartSeries::for_result(result),
        }
    }
}

/// Pie-chart data: percentages for `CHART_LABELS`, summing to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSeries {
    pub labels: [&'static str; 2],
    pub values: [f64; 2],
}

impl ChartSeries {
    pub fn for_result(result: PredictionResult) -> Self {
        let verdict_share = result.confidence.percent();
        let other_share = (1.0 - result.confidence.value()) * 100.0;
        let values = match result.verdict {
            Verdict::Real => [verdict_share, other_share],
            Verdict::Fake => [other_share, verdict_share],
        };
        Self {
            labels: CHART_LABELS,
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRowView {
    pub timestamp: String,
    pub snippet: String,
    pub verdict: Verdict,
    pub confidence_text: String,
    pub extras: BTreeMap<String, String>,
}

impl HistoryRowView {
    pub(crate) fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            timestamp: entry.timestamp.clone(),
            snippet: entry.snippet.clone(),
            verdict: entry.result.verdict,
            confidence_text: format_percent(entry.result.confidence),
            extras: entry.extras.clone(),
        }
    }
}

fn format_percent(confidence: Confidence) -> String {
    format!("{:.1}%", confidence.percent())
}
