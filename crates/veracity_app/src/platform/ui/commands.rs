use veracity_core::{InputMode, Msg};

pub const HELP_TEXT: &str = "\
Type news text (or a URL in url mode) and press Enter to analyze it.
  /text     switch to text input
  /url      switch to URL input
  /reset    clear input, result and error
  /clear    clear the history
  /history  show the history
  /help     show this help
  /quit     exit
Any other line, including one that starts with an unknown /word, is analyzed as typed.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    ShowHistory,
    Help,
    Quit,
}

/// Maps one input line to the messages it stands for.
///
/// Only a known `/word` alone on the line is a command. Any other line
/// replaces the input and submits it, so an empty line surfaces the
/// validation error.
pub fn parse(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    line.trim()
        .strip_prefix('/')
        .and_then(|word| known_command(&word.to_ascii_lowercase()))
        .unwrap_or_else(|| {
            Command::Dispatch(vec![
                Msg::InputChanged(line.to_string()),
                Msg::SubmitClicked,
            ])
        })
}

fn known_command(word: &str) -> Option<Command> {
    let command = match word {
        "text" => Command::Dispatch(vec![Msg::ModeSelected(InputMode::Text)]),
        "url" => Command::Dispatch(vec![Msg::ModeSelected(InputMode::Url)]),
        "reset" => Command::Dispatch(vec![Msg::ResetClicked]),
        "clear" => Command::Dispatch(vec![Msg::ClearHistoryClicked]),
        "history" => Command::ShowHistory,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return None,
    };
    Some(command)
}
