use std::collections::BTreeMap;
use std::sync::Once;

use veracity_core::{
    update, AppState, Confidence, Effect, InputMode, Msg, PredictionRequest, PredictionResult,
    RequestPhase, Verdict, SERVER_ERROR_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(veracity_logging::initialize_for_tests);
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn real(confidence: f64) -> PredictionResult {
    PredictionResult {
        verdict: Verdict::Real,
        confidence: Confidence::new(confidence).unwrap(),
    }
}

fn resolve(state: AppState, request_id: u64, result: PredictionResult) -> AppState {
    let (state, effects) = update(
        state,
        Msg::PredictionResolved {
            request_id,
            result,
            extras: BTreeMap::new(),
            timestamp: "2026-10-17 12:00:00".to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn text_submission_emits_text_request() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "Breaking: markets rally");

    assert_eq!(
        effects,
        vec![Effect::SubmitPrediction {
            request_id: 1,
            request: PredictionRequest {
                mode: InputMode::Text,
                value: "Breaking: markets rally".to_string(),
            },
        }]
    );
    assert_eq!(state.phase(), RequestPhase::Pending { request_id: 1 });
    let view = state.view();
    assert!(view.pending);
    assert!(!view.submit_enabled);
}

#[test]
fn url_submission_emits_url_request() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ModeSelected(InputMode::Url));
    let (_state, effects) = submit(state, "https://news.example.com/a");

    assert_eq!(
        effects,
        vec![Effect::SubmitPrediction {
            request_id: 1,
            request: PredictionRequest {
                mode: InputMode::Url,
                value: "https://news.example.com/a".to_string(),
            },
        }]
    );
}

#[test]
fn empty_input_is_rejected_locally() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "   \n");
    assert!(effects.is_empty());
    assert_eq!(state.phase(), RequestPhase::Idle);
    assert_eq!(state.error(), Some("Please enter news text."));
    assert!(state.consume_dirty());

    let (state, _) = update(state, Msg::ModeSelected(InputMode::Url));
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.error(), Some("Please enter a URL."));
}

#[test]
fn double_submit_is_single_flight() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "first");
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    let (state, effects) = submit(state, "second");
    assert!(effects.is_empty());
    assert_eq!(state.phase(), RequestPhase::Pending { request_id: 1 });
}

#[test]
fn markets_rally_scenario_renders_real_news() {
    init_logging();
    let (state, _) = submit(AppState::new(), "Breaking: markets rally");
    let state = resolve(state, 1, real(0.87));

    let view = state.view();
    let result = view.result.expect("result");
    assert_eq!(result.chip_label, "Real News");
    assert_eq!(result.confidence_text, "87.0%");
    assert_eq!(view.error, None);
    assert!(view.submit_enabled);
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].snippet, "Breaking: markets rally");
    assert_eq!(view.history[0].verdict, Verdict::Real);
    assert_eq!(view.history[0].timestamp, "2026-10-17 12:00:00");
}

#[test]
fn network_failure_keeps_result_and_history() {
    init_logging();
    let (state, _) = submit(AppState::new(), "first story");
    let state = resolve(state, 1, real(0.6));
    let before = state.view();

    let (state, _) = submit(state, "second story");
    let (state, effects) = update(state, Msg::PredictionFailed { request_id: 2 });
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.error.as_deref(), Some(SERVER_ERROR_MESSAGE));
    assert_eq!(view.result, before.result);
    assert_eq!(view.history, before.history);
    assert!(view.submit_enabled);
    assert_eq!(state.phase(), RequestPhase::Idle);
}

#[test]
fn success_after_failure_clears_error() {
    init_logging();
    let (state, _) = submit(AppState::new(), "story");
    let (state, _) = update(state, Msg::PredictionFailed { request_id: 1 });
    assert!(state.error().is_some());

    let (state, _) = update(state, Msg::SubmitClicked);
    assert_eq!(state.error(), None);
    let state = resolve(state, 2, real(0.5));
    assert_eq!(state.error(), None);
    assert!(state.result().is_some());
}

#[test]
fn stale_completion_is_discarded() {
    init_logging();
    let (state, _) = submit(AppState::new(), "story");
    let state = resolve(state, 7, real(0.9));

    assert_eq!(state.phase(), RequestPhase::Pending { request_id: 1 });
    assert!(state.result().is_none());
    assert_eq!(state.history().count(), 0);

    let (state, _) = update(state, Msg::PredictionFailed { request_id: 7 });
    assert_eq!(state.error(), None);
}

#[test]
fn mode_change_clears_input_result_and_error() {
    init_logging();
    let (state, _) = submit(AppState::new(), "story");
    let state = resolve(state, 1, real(0.9));
    let (state, _) = update(state, Msg::InputChanged("draft".to_string()));

    let (state, _) = update(state, Msg::ModeSelected(InputMode::Url));
    let view = state.view();
    assert_eq!(view.mode, InputMode::Url);
    assert_eq!(view.input, "");
    assert_eq!(view.result, None);
    assert_eq!(view.error, None);
    assert_eq!(view.history.len(), 1);
}

#[test]
fn mode_change_while_pending_abandons_request() {
    init_logging();
    let (state, _) = submit(AppState::new(), "story");
    let (mut state, effects) = update(state, Msg::ModeSelected(InputMode::Url));

    assert_eq!(effects, vec![Effect::CancelInFlight { request_id: 1 }]);
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.mode, InputMode::Url);
    assert_eq!(view.input, "");
    assert!(view.submit_enabled);
    assert_eq!(state.phase(), RequestPhase::Idle);

    let state = resolve(state, 1, real(0.9));
    assert!(state.result().is_none());
    assert_eq!(state.history().count(), 0);

    let (state, effects) = submit(state, "https://example.com");
    assert_eq!(
        effects,
        vec![Effect::SubmitPrediction {
            request_id: 2,
            request: PredictionRequest {
                mode: InputMode::Url,
                value: "https://example.com".to_string(),
            },
        }]
    );
    assert_eq!(state.phase(), RequestPhase::Pending { request_id: 2 });
}

#[test]
fn clearing_empty_history_leaves_state_untouched() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::ClearHistoryClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn reset_keeps_mode_and_history() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ModeSelected(InputMode::Url));
    let (state, _) = submit(state, "https://example.com");
    let state = resolve(state, 1, real(0.7));
    let (state, _) = update(state, Msg::InputChanged("https://other.example.com".into()));

    let (state, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.mode, InputMode::Url);
    assert_eq!(view.input, "");
    assert_eq!(view.result, None);
    assert_eq!(view.error, None);
    assert_eq!(view.history.len(), 1);
}

#[test]
fn closing_cancels_in_flight_and_ignores_late_response() {
    init_logging();
    let (state, _) = submit(AppState::new(), "story");
    let (state, effects) = update(state, Msg::Closed);
    assert_eq!(effects, vec![Effect::CancelInFlight { request_id: 1 }]);
    assert!(state.is_closed());

    let state = resolve(state, 1, real(0.9));
    assert!(state.result().is_none());
    assert_eq!(state.history().count(), 0);

    let (state, effects) = submit(state, "another");
    assert!(effects.is_empty());
    assert_eq!(state.input().value, "story");
}

#[test]
fn closing_while_idle_emits_nothing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Closed);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), RequestPhase::Closed);
    assert!(!state.view().submit_enabled);
}
