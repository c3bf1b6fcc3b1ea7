use crate::{InputMode, RequestId};

/// Work the runtime must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one outbound prediction call.
    SubmitPrediction {
        request_id: RequestId,
        request: PredictionRequest,
    },
    /// Abort the outstanding call; its completion must never be reported.
    CancelInFlight { request_id: RequestId },
}

/// What was submitted: the input mode picks the endpoint and body key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub mode: InputMode,
    pub value: String,
}
