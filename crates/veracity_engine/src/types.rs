use std::fmt;

pub type RequestId = u64;

/// Selects the endpoint and the JSON body key of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Url,
}

impl InputKind {
    pub fn path(self) -> &'static str {
        match self {
            InputKind::Text => "/api/bert_predict",
            InputKind::Url => "/api/bert_predict_url",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub kind: InputKind,
    pub value: String,
}

impl PredictRequest {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: InputKind::Text,
            value: value.into(),
        }
    }

    pub fn url(value: impl Into<String>) -> Self {
        Self {
            kind: InputKind::Url,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Real,
    Fake,
}

/// A decoded response. `confidence` is already checked to lie in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutput {
    pub label: Label,
    pub confidence: f64,
    /// Top-level response fields other than the verdict and its score.
    pub extras: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PredictionCompleted {
        request_id: RequestId,
        result: Result<PredictionOutput, PredictError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct PredictError {
    pub kind: FailureKind,
    pub message: String,
}

impl PredictError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::MalformedBody, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
