use std::collections::BTreeMap;

use crate::{InputMode, PredictionResult, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched between text and URL input.
    ModeSelected(InputMode),
    /// User edited the input box.
    InputChanged(String),
    /// User asked for the current input to be analyzed.
    SubmitClicked,
    /// User cleared the input, result and error.
    ResetClicked,
    /// User cleared the query history.
    ClearHistoryClicked,
    /// Engine returned a verdict for a request.
    PredictionResolved {
        request_id: RequestId,
        result: PredictionResult,
        extras: BTreeMap<String, String>,
        /// Wall-clock time the response was applied, formatted by the runtime.
        timestamp: String,
    },
    /// Engine failed to produce a verdict for a request.
    PredictionFailed { request_id: RequestId },
    /// The front-end is being torn down.
    Closed,
}
