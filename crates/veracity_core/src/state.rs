use std::collections::{BTreeMap, VecDeque};

use crate::view_model::{AppViewModel, HistoryRowView, ResultView};
use crate::{
    make_snippet, HistoryEntry, InputError, InputMode, InputState, PredictionRequest,
    PredictionResult, RequestId, HISTORY_LIMIT,
};

/// Shown for every transport, status or decoding failure.
pub const SERVER_ERROR_MESSAGE: &str = "Error connecting to the server. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
    },
    /// Torn down; nothing is applied any more.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input: InputState,
    phase: RequestPhase,
    /// Submitted value of the pending request, for the history snippet.
    pending_value: Option<String>,
    next_request_id: RequestId,
    result: Option<PredictionResult>,
    error: Option<String>,
    history: VecDeque<HistoryEntry>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: InputMode) -> Self {
        Self {
            input: InputState::new(mode),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, RequestPhase::Pending { .. })
    }

    pub fn is_closed(&self) -> bool {
        self.phase == RequestPhase::Closed
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mode: self.input.mode,
            input: self.input.value.clone(),
            pending: self.is_pending(),
            submit_enabled: self.phase == RequestPhase::Idle,
            error: self.error.clone(),
            result: self.result.map(ResultView::from_result),
            history: self.history.iter().map(HistoryRowView::from_entry).collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Switches mode and abandons any pending request, returning its id so
    /// its verdict never lands on the discarded input.
    pub(crate) fn set_mode(&mut self, mode: InputMode) -> Option<RequestId> {
        let abandoned = match self.phase {
            RequestPhase::Pending { request_id } => {
                self.phase = RequestPhase::Idle;
                self.pending_value = None;
                Some(request_id)
            }
            RequestPhase::Idle | RequestPhase::Closed => None,
        };
        self.input.mode = mode;
        self.input.clear();
        self.result = None;
        self.error = None;
        self.mark_dirty();
        abandoned
    }

    pub(crate) fn set_input(&mut self, value: String) {
        if self.input.value != value {
            self.input.value = value;
            self.mark_dirty();
        }
    }

    pub(crate) fn reset(&mut self) {
        self.input.clear();
        self.result = None;
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn clear_history(&mut self) {
        if !self.history.is_empty() {
            self.history.clear();
            self.mark_dirty();
        }
    }

    pub(crate) fn reject_input(&mut self, err: InputError) {
        self.error = Some(err.to_string());
        self.mark_dirty();
    }

    /// Moves to `Pending` and hands out the request to issue.
    pub(crate) fn begin_request(&mut self) -> Option<(RequestId, PredictionRequest)> {
        let value = self.input.validate().ok()?.to_string();
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.phase = RequestPhase::Pending { request_id };
        self.pending_value = Some(value.clone());
        self.error = None;
        self.mark_dirty();
        Some((
            request_id,
            PredictionRequest {
                mode: self.input.mode,
                value,
            },
        ))
    }

    /// Consumes the pending slot if `request_id` is the one outstanding.
    fn finish_request(&mut self, request_id: RequestId) -> Option<String> {
        match self.phase {
            RequestPhase::Pending { request_id: pending } if pending == request_id => {
                self.phase = RequestPhase::Idle;
                self.mark_dirty();
                Some(self.pending_value.take().unwrap_or_default())
            }
            _ => None,
        }
    }

    pub(crate) fn apply_resolved(
        &mut self,
        request_id: RequestId,
        result: PredictionResult,
        extras: BTreeMap<String, String>,
        timestamp: String,
    ) -> bool {
        let Some(submitted) = self.finish_request(request_id) else {
            return false;
        };
        self.result = Some(result);
        self.error = None;
        self.history.push_front(HistoryEntry {
            timestamp,
            snippet: make_snippet(&submitted),
            result,
            extras,
        });
        self.history.truncate(HISTORY_LIMIT);
        true
    }

    pub(crate) fn apply_failed(&mut self, request_id: RequestId) -> bool {
        if self.finish_request(request_id).is_none() {
            return false;
        }
        self.error = Some(SERVER_ERROR_MESSAGE.to_string());
        true
    }

    /// Returns the request that was outstanding, if any.
    pub(crate) fn close(&mut self) -> Option<RequestId> {
        let outstanding = match self.phase {
            RequestPhase::Pending { request_id } => Some(request_id),
            RequestPhase::Idle | RequestPhase::Closed => None,
        };
        self.phase = RequestPhase::Closed;
        self.pending_value = None;
        self.mark_dirty();
        outstanding
    }
}
