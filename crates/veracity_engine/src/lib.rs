//! Veracity engine: prediction transport and effect execution.
mod codec;
mod engine;
mod predict;
mod types;

pub use codec::{decode_prediction, encode_request};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use predict::{PredictSettings, Predictor, ReqwestPredictor, DEFAULT_API_BASE};
pub use types::{
    EngineEvent, FailureKind, InputKind, Label, PredictError, PredictRequest, PredictionOutput,
    RequestId,
};
