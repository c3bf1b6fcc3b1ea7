use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_closed() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::ModeSelected(mode) => match state.set_mode(mode) {
            Some(request_id) => vec![Effect::CancelInFlight { request_id }],
            None => Vec::new(),
        },
        Msg::InputChanged(value) => {
            state.set_input(value);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Single-flight: a second submission while one is outstanding is dropped.
            if state.is_pending() {
                return (state, Vec::new());
            }
            if let Err(err) = state.input().validate() {
                state.reject_input(err);
                return (state, Vec::new());
            }
            match state.begin_request() {
                Some((request_id, request)) => vec![Effect::SubmitPrediction {
                    request_id,
                    request,
                }],
                None => Vec::new(),
            }
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::ClearHistoryClicked => {
            state.clear_history();
            Vec::new()
        }
        Msg::PredictionResolved {
            request_id,
            result,
            extras,
            timestamp,
        } => {
            state.apply_resolved(request_id, result, extras, timestamp);
            Vec::new()
        }
        Msg::PredictionFailed { request_id } => {
            state.apply_failed(request_id);
            Vec::new()
        }
        Msg::Closed => match state.close() {
            Some(request_id) => vec![Effect::CancelInFlight { request_id }],
            None => Vec::new(),
        },
    };

    (state, effects)
}
