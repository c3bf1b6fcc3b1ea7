use std::collections::BTreeMap;
use std::fmt;

pub type RequestId = u64;

/// Most-recent history entries retained.
pub const HISTORY_LIMIT: usize = 5;
/// Characters of submitted input kept in a history snippet.
pub const SNIPPET_MAX_CHARS: usize = 50;
pub const SNIPPET_ELLIPSIS: &str = "...";

/// The categorical output of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Real => "Real",
            Verdict::Fake => "Fake",
        }
    }

    /// Text shown on the verdict chip.
    pub fn chip_label(self) -> &'static str {
        match self {
            Verdict::Real => "Real News",
            Verdict::Fake => "Fake News",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Model-reported probability of the verdict, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    /// Returns `None` for values outside `[0, 1]` and for NaN.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

/// A successful classification. Replaced wholesale by the next success.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub verdict: Verdict,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub snippet: String,
    pub result: PredictionResult,
    /// Additional response fields, passed through as raw JSON text.
    pub extras: BTreeMap<String, String>,
}

/// Cuts `input` to [`SNIPPET_MAX_CHARS`] characters, appending
/// [`SNIPPET_ELLIPSIS`] only when something was cut.
pub fn make_snippet(input: &str) -> String {
    match input.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((byte_idx, _)) => format!("{}{}", &input[..byte_idx], SNIPPET_ELLIPSIS),
        None => input.to_string(),
    }
}
