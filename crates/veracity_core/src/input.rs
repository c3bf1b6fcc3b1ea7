use std::fmt;

/// Which kind of input the user is submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    Url,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Url => "url",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Local validation failure. Never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{}", empty_message(.mode))]
    Empty { mode: InputMode },
}

fn empty_message(mode: &InputMode) -> &'static str {
    match mode {
        InputMode::Text => "Please enter news text.",
        InputMode::Url => "Please enter a URL.",
    }
}

/// The current mode and the raw, unvalidated input string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputState {
    pub mode: InputMode,
    pub value: String,
}

impl InputState {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            value: String::new(),
        }
    }

    /// Fails when the value is empty after trimming. The value itself is
    /// submitted untrimmed.
    pub fn validate(&self) -> Result<&str, InputError> {
        if self.value.trim().is_empty() {
            Err(InputError::Empty { mode: self.mode })
        } else {
            Ok(&self.value)
        }
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
    }
}
