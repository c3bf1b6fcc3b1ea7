use std::collections::BTreeMap;
use std::sync::{mpsc, Arc};

use chrono::Local;
use veracity_core::{Confidence, Effect, InputMode, Msg, PredictionResult, Verdict};
use veracity_engine::{
    EngineError, EngineEvent, EngineHandle, EventSink, InputKind, Label, PredictRequest,
    PredictSettings,
};
use veracity_logging::{veracity_info, veracity_warn};

use super::app::LoopEvent;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: PredictSettings, tx: mpsc::Sender<LoopEvent>) -> Result<Self, EngineError> {
        let sink = Arc::new(LoopEventSink { tx });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitPrediction {
                    request_id,
                    request,
                } => {
                    veracity_info!(
                        "SubmitPrediction request_id={} mode={} value_len={}",
                        request_id,
                        request.mode,
                        request.value.len()
                    );
                    let kind = map_mode(request.mode);
                    self.engine.submit(
                        request_id,
                        PredictRequest {
                            kind,
                            value: request.value,
                        },
                    );
                }
                Effect::CancelInFlight { request_id } => {
                    veracity_info!("CancelInFlight request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

struct LoopEventSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for LoopEventSink {
    fn emit(&self, event: EngineEvent) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let _ = self.tx.send(LoopEvent::Msg(map_event(event, timestamp)));
    }
}

/// Translates an engine completion into a core message.
pub(crate) fn map_event(event: EngineEvent, timestamp: String) -> Msg {
    match event {
        EngineEvent::PredictionCompleted { request_id, result } => {
            let output = match result {
                Ok(output) => output,
                Err(err) => {
                    veracity_warn!("Request {} failed: {}", request_id, err);
                    return Msg::PredictionFailed { request_id };
                }
            };
            let Some(confidence) = Confidence::new(output.confidence) else {
                veracity_warn!(
                    "Request {} returned confidence {} outside [0, 1]",
                    request_id,
                    output.confidence
                );
                return Msg::PredictionFailed { request_id };
            };
            let extras: BTreeMap<String, String> = output
                .extras
                .into_iter()
                .map(|(key, value)| (key, value.to_string()))
                .collect();
            Msg::PredictionResolved {
                request_id,
                result: PredictionResult {
                    verdict: map_label(output.label),
                    confidence,
                },
                extras,
                timestamp,
            }
        }
    }
}

fn map_mode(mode: InputMode) -> InputKind {
    match mode {
        InputMode::Text => InputKind::Text,
        InputMode::Url => InputKind::Url,
    }
}

fn map_label(label: Label) -> Verdict {
    match label {
        Label::Real => Verdict::Real,
        Label::Fake => Verdict::Fake,
    }
}
