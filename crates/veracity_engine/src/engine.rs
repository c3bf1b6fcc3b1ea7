use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use veracity_logging::{veracity_debug, veracity_info};

use crate::predict::{PredictSettings, Predictor, ReqwestPredictor};
use crate::{EngineEvent, PredictError, PredictRequest, RequestId};

/// Receives completions from the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build predictor: {0}")]
    Predictor(#[from] PredictError),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: PredictRequest,
    },
    Cancel {
        request_id: RequestId,
    },
    Shutdown,
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs predictions on a background tokio runtime.
///
/// Cancelled and shut-down requests never reach the sink.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: PredictSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let predictor = ReqwestPredictor::new(settings)?;
        Self::with_predictor(Arc::new(predictor), sink)
    }

    pub fn with_predictor(
        predictor: Arc<dyn Predictor>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let shutdown = CancellationToken::new();
            let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit {
                        request_id,
                        request,
                    } => {
                        let token = shutdown.child_token();
                        if let Ok(mut map) = in_flight.lock() {
                            map.insert(request_id, token.clone());
                        }
                        runtime.spawn(run_request(
                            predictor.clone(),
                            sink.clone(),
                            in_flight.clone(),
                            token,
                            request_id,
                            request,
                        ));
                    }
                    EngineCommand::Cancel { request_id } => {
                        let token = in_flight
                            .lock()
                            .ok()
                            .and_then(|mut map| map.remove(&request_id));
                        if let Some(token) = token {
                            veracity_info!("Cancelling request {}", request_id);
                            token.cancel();
                        }
                    }
                    EngineCommand::Shutdown => break,
                }
            }

            shutdown.cancel();
            runtime.shutdown_timeout(Duration::from_secs(1));
            veracity_debug!("Engine thread stopped");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, request: PredictRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            request,
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_request(
    predictor: Arc<dyn Predictor>,
    sink: Arc<dyn EventSink>,
    in_flight: InFlight,
    token: CancellationToken,
    request_id: RequestId,
    request: PredictRequest,
) {
    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => None,
        result = predictor.predict(&request) => Some(result),
    };
    if let Ok(mut map) = in_flight.lock() {
        map.remove(&request_id);
    }
    match outcome {
        Some(result) if !token.is_cancelled() => {
            sink.emit(EngineEvent::PredictionCompleted { request_id, result })
        }
        _ => veracity_debug!("Request {} dropped after cancellation", request_id),
    }
}
