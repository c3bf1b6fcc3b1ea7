use veracity_core::{AppViewModel, ChartSeries, HistoryRowView, InputMode, ResultView};

const BAR_WIDTH: usize = 40;

/// Renders the status, error or result panel. History is shown on demand.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![status_line(view)];

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    } else if let Some(result) = &view.result {
        lines.extend(render_result(result));
    }

    if let Some(latest) = view.history.first() {
        lines.push(format!(
            "History: {} entr{} (latest {}) - /history to show",
            view.history.len(),
            if view.history.len() == 1 { "y" } else { "ies" },
            latest.timestamp
        ));
    }
    lines
}

pub fn render_history(view: &AppViewModel) -> Vec<String> {
    if view.history.is_empty() {
        return vec!["History is empty.".to_string()];
    }
    let mut lines = vec![format!("Recent analyses ({}):", view.history.len())];
    lines.extend(view.history.iter().map(format_history_row));
    lines
}

fn status_line(view: &AppViewModel) -> String {
    let mode = match view.mode {
        InputMode::Text => "Text",
        InputMode::Url => "URL",
    };
    if view.pending {
        format!("[{mode}] Analyzing...")
    } else if view.submit_enabled {
        format!("[{mode}] Ready")
    } else {
        format!("[{mode}] Closed")
    }
}

fn render_result(result: &ResultView) -> Vec<String> {
    let mut lines = vec![
        format!("Verdict: {}", result.chip_label.to_uppercase()),
        format!("Confidence: {}", result.confidence_text),
    ];
    lines.extend(render_chart(&result.chart));
    lines
}

fn render_chart(chart: &ChartSeries) -> Vec<String> {
    chart
        .labels
        .iter()
        .zip(chart.values)
        .map(|(label, value)| {
            let filled = ((value / 100.0) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            format!(
                "  {label:<10} {value:>5.1}% {}{}",
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled)
            )
        })
        .collect()
}

fn format_history_row(row: &HistoryRowView) -> String {
    let mut line = format!(
        "  {} | {:<4} | {:>6} | {}",
        row.timestamp,
        row.verdict.label(),
        row.confidence_text,
        row.snippet
    );
    if !row.extras.is_empty() {
        let extras = row
            .extras
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        line.push_str(&format!(" ({extras})"));
    }
    line
}
