//! Veracity core: pure state machine and view-model helpers.
mod effect;
mod input;
mod msg;
mod prediction;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PredictionRequest};
pub use input::{InputError, InputMode, InputState};
pub use msg::Msg;
pub use prediction::{
    make_snippet, Confidence, HistoryEntry, PredictionResult, RequestId, Verdict, HISTORY_LIMIT,
    SNIPPET_ELLIPSIS, SNIPPET_MAX_CHARS,
};
pub use state::{AppState, RequestPhase, SERVER_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, ChartSeries, HistoryRowView, ResultView, CHART_LABELS};
