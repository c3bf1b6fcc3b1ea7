use std::collections::BTreeMap;

use veracity_core::{
    update, AppState, ChartSeries, Confidence, Effect, Msg, PredictionResult, Verdict,
    CHART_LABELS, HISTORY_LIMIT, SNIPPET_ELLIPSIS, SNIPPET_MAX_CHARS,
};

fn init_logging() {
    veracity_logging::initialize_for_tests();
}

fn prediction(verdict: Verdict, confidence: f64) -> PredictionResult {
    PredictionResult {
        verdict,
        confidence: Confidence::new(confidence).unwrap(),
    }
}

/// Submits `input` and resolves it with `result`, returning the new state.
fn analyze(state: AppState, input: &str, result: PredictionResult) -> AppState {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitPrediction { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("submit effect");
    let (state, _) = update(
        state,
        Msg::PredictionResolved {
            request_id,
            result,
            extras: BTreeMap::new(),
            timestamp: format!("t{request_id}"),
        },
    );
    state
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn history_grows_newest_first() {
    init_logging();
    let mut state = AppState::new();
    for (i, input) in ["one", "two", "three"].iter().enumerate() {
        state = analyze(state, input, prediction(Verdict::Fake, 0.5));
        assert_eq!(state.view().history.len(), i + 1);
    }

    let snippets: Vec<_> = state.view().history.into_iter().map(|h| h.snippet).collect();
    assert_eq!(snippets, vec!["three", "two", "one"]);
}

#[test]
fn sixth_submission_evicts_oldest() {
    init_logging();
    let mut state = AppState::new();
    for i in 1..=6 {
        state = analyze(state, &format!("story {i}"), prediction(Verdict::Real, 0.9));
    }

    let view = state.view();
    assert_eq!(view.history.len(), HISTORY_LIMIT);
    let snippets: Vec<_> = view.history.iter().map(|h| h.snippet.as_str()).collect();
    assert_eq!(
        snippets,
        vec!["story 6", "story 5", "story 4", "story 3", "story 2"]
    );
    assert_eq!(view.history[0].timestamp, "t6");
}

#[test]
fn long_input_is_truncated_in_history() {
    init_logging();
    let long = "x".repeat(SNIPPET_MAX_CHARS + 20);
    let state = analyze(AppState::new(), &long, prediction(Verdict::Fake, 0.99));

    let snippet = &state.view().history[0].snippet;
    assert_eq!(
        snippet,
        &format!("{}{}", "x".repeat(SNIPPET_MAX_CHARS), SNIPPET_ELLIPSIS)
    );
}

#[test]
fn extras_are_passed_through_to_history() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("story".to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let mut extras = BTreeMap::new();
    extras.insert("model".to_string(), "\"bert\"".to_string());
    let (state, _) = update(
        state,
        Msg::PredictionResolved {
            request_id: 1,
            result: prediction(Verdict::Real, 0.8),
            extras: extras.clone(),
            timestamp: "now".to_string(),
        },
    );

    assert_eq!(state.view().history[0].extras, extras);
}

#[test]
fn clear_history_keeps_current_result() {
    init_logging();
    let state = analyze(AppState::new(), "story", prediction(Verdict::Real, 0.8));
    let (mut state, _) = update(state, Msg::ClearHistoryClicked);

    assert!(state.view().history.is_empty());
    assert!(state.view().result.is_some());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ClearHistoryClicked);
    assert!(!state.consume_dirty());
}

#[test]
fn chart_series_for_real_puts_confidence_first() {
    let chart = ChartSeries::for_result(prediction(Verdict::Real, 0.87));
    assert_eq!(chart.labels, CHART_LABELS);
    assert_close(chart.values[0], 87.0);
    assert_close(chart.values[1], 13.0);
}

#[test]
fn chart_series_for_fake_is_mirrored() {
    let chart = ChartSeries::for_result(prediction(Verdict::Fake, 0.75));
    assert_eq!(chart.labels, ["Real News", "Fake News"]);
    assert_close(chart.values[0], 25.0);
    assert_close(chart.values[1], 75.0);
}

#[test]
fn fake_verdict_view() {
    init_logging();
    let state = analyze(AppState::new(), "aliens", prediction(Verdict::Fake, 0.9234));
    let result = state.view().result.expect("result");
    assert_eq!(result.chip_label, "Fake News");
    assert_eq!(result.confidence_text, "92.3%");
    assert_close(result.chart.values.iter().sum::<f64>(), 100.0);
}
