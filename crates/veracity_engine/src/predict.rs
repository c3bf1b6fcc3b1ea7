use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;
use veracity_logging::{veracity_debug, veracity_info, veracity_warn};

use crate::codec::{decode_error_message, decode_prediction, encode_request};
use crate::{FailureKind, PredictError, PredictRequest, PredictionOutput};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct PredictSettings {
    /// Scheme, host and optional path prefix; endpoint paths are appended.
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for PredictSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionOutput, PredictError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPredictor {
    client: reqwest::Client,
    base: Url,
    max_bytes: u64,
}

impl ReqwestPredictor {
    pub fn new(settings: PredictSettings) -> Result<Self, PredictError> {
        let base = parse_base(&settings.api_base)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| PredictError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            base,
            max_bytes: settings.max_bytes,
        })
    }

    /// Full endpoint for `request`, keeping any path prefix of the base.
    pub fn endpoint(&self, request: &PredictRequest) -> Result<Url, PredictError> {
        let joined = format!(
            "{}{}",
            self.base.as_str().trim_end_matches('/'),
            request.kind.path()
        );
        Url::parse(&joined)
            .map_err(|err| PredictError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, PredictError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> PredictError {
        PredictError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Predictor for ReqwestPredictor {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionOutput, PredictError> {
        let endpoint = self.endpoint(request)?;
        let body = encode_request(request)?;
        veracity_info!("POST {} body_len={}", endpoint, body.len());

        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        veracity_debug!("{} -> {} ({} bytes)", endpoint, status, bytes.len());

        if !status.is_success() {
            let message = decode_error_message(&bytes).unwrap_or_else(|| status.to_string());
            veracity_warn!("{} rejected request: {}", endpoint, message);
            return Err(PredictError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        decode_prediction(&bytes)
    }
}

fn parse_base(raw: &str) -> Result<Url, PredictError> {
    let base = Url::parse(raw.trim())
        .map_err(|err| PredictError::new(FailureKind::InvalidEndpoint, format!("{raw}: {err}")))?;
    match base.scheme() {
        "http" | "https" => Ok(base),
        other => Err(PredictError::new(
            FailureKind::InvalidEndpoint,
            format!("unsupported scheme {other}"),
        )),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> PredictError {
    if err.is_timeout() {
        return PredictError::new(FailureKind::Timeout, err.to_string());
    }
    PredictError::new(FailureKind::Network, err.to_string())
}
