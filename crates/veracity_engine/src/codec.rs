//! JSON wire format of the prediction service.
//!
//! Requests are `{"text": ...}` or `{"url": ...}`. Responses carry
//! `prediction` and a score in `confidence`. `probability` is accepted as
//! the same field under its older name; a body carrying both, or neither, is
//! rejected rather than guessed at.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{InputKind, Label, PredictError, PredictRequest, PredictionOutput};

const PREDICTION_FIELD: &str = "prediction";
const CONFIDENCE_FIELD: &str = "confidence";
const CONFIDENCE_ALIAS: &str = "probability";

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum RequestBody<'a> {
    Text(&'a str),
    Url(&'a str),
}

/// Body the service sends with a non-success status.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

pub fn encode_request(request: &PredictRequest) -> Result<Vec<u8>, PredictError> {
    let body = match request.kind {
        InputKind::Text => RequestBody::Text(&request.value),
        InputKind::Url => RequestBody::Url(&request.value),
    };
    serde_json::to_vec(&body).map_err(|err| PredictError::malformed(err.to_string()))
}

pub fn decode_prediction(body: &[u8]) -> Result<PredictionOutput, PredictError> {
    let mut fields: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|err| PredictError::malformed(format!("invalid json object: {err}")))?;

    let label = match fields.remove(PREDICTION_FIELD) {
        Some(Value::String(raw)) => parse_label(&raw)?,
        Some(other) => {
            return Err(PredictError::malformed(format!(
                "`{PREDICTION_FIELD}` is not a string: {other}"
            )))
        }
        None => {
            return Err(PredictError::malformed(format!(
                "missing `{PREDICTION_FIELD}`"
            )))
        }
    };

    let score = match (
        fields.remove(CONFIDENCE_FIELD),
        fields.remove(CONFIDENCE_ALIAS),
    ) {
        (Some(value), None) | (None, Some(value)) => value,
        (Some(_), Some(_)) => {
            return Err(PredictError::malformed(format!(
                "both `{CONFIDENCE_FIELD}` and `{CONFIDENCE_ALIAS}` present"
            )))
        }
        (None, None) => {
            return Err(PredictError::malformed(format!(
                "missing `{CONFIDENCE_FIELD}`"
            )))
        }
    };
    let confidence = score
        .as_f64()
        .filter(|c| c.is_finite() && (0.0..=1.0).contains(c))
        .ok_or_else(|| {
            PredictError::malformed(format!("confidence out of range [0, 1]: {score}"))
        })?;

    Ok(PredictionOutput {
        label,
        confidence,
        extras: fields,
    })
}

/// Accepts the mapped labels in any case, and the raw classifier labels.
fn parse_label(raw: &str) -> Result<Label, PredictError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("real") || trimmed == "LABEL_0" {
        Ok(Label::Real)
    } else if trimmed.eq_ignore_ascii_case("fake") || trimmed == "LABEL_1" {
        Ok(Label::Fake)
    } else {
        Err(PredictError::malformed(format!("unknown prediction label {raw:?}")))
    }
}

pub(crate) fn decode_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|body| body.error)
}
