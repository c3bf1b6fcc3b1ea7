use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use log::LevelFilter;
use veracity_core::{update, AppState, Msg};
use veracity_logging::{veracity_info, LogDestination};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{self, Command, HELP_TEXT};
use super::ui::render;

/// Everything the main loop reacts to.
pub enum LoopEvent {
    /// A line typed by the user.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message produced by the engine.
    Msg(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    let destination = if config.log_to_file {
        LogDestination::File
    } else {
        LogDestination::Terminal
    };
    veracity_logging::initialize(destination, LevelFilter::Info);
    veracity_info!("Starting with api_base={}", config.api_base);

    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.predict_settings(), event_tx.clone())
        .context("starting prediction engine")?;

    spawn_stdin_reader(event_tx);

    let mut out = io::stdout().lock();
    writeln!(out, "Fake News Detector (api: {})", config.api_base)?;
    writeln!(out, "{HELP_TEXT}")?;

    let mut app = AppLoop {
        state: AppState::with_mode(config.start_mode.into()),
        runner,
    };
    app.print(&mut out, render::render(&app.state.view()))?;

    while let Ok(event) = event_rx.recv() {
        match event {
            LoopEvent::Line(line) => match commands::parse(&line) {
                Command::Dispatch(msgs) => app.dispatch(&mut out, msgs)?,
                Command::ShowHistory => {
                    app.print(&mut out, render::render_history(&app.state.view()))?
                }
                Command::Help => writeln!(out, "{HELP_TEXT}")?,
                Command::Quit => break,
            },
            LoopEvent::Msg(msg) => app.dispatch(&mut out, vec![msg])?,
            LoopEvent::InputClosed => break,
        }
    }

    app.dispatch(&mut out, vec![Msg::Closed])?;
    app.runner.shutdown();
    veracity_info!("Shut down");
    Ok(())
}

struct AppLoop {
    state: AppState,
    runner: EffectRunner,
}

impl AppLoop {
    /// Applies `msgs` in order, runs their effects, and renders once if
    /// anything changed.
    fn dispatch(&mut self, out: &mut impl Write, msgs: Vec<Msg>) -> io::Result<()> {
        let mut effects = Vec::new();
        for msg in msgs {
            let state = std::mem::take(&mut self.state);
            let (state, new_effects) = update(state, msg);
            self.state = state;
            effects.extend(new_effects);
        }
        self.runner.enqueue(effects);

        if self.state.consume_dirty() {
            self.print(out, render::render(&self.state.view()))?;
        }
        Ok(())
    }

    fn print(&self, out: &mut impl Write, lines: Vec<String>) -> io::Result<()> {
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(LoopEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(LoopEvent::InputClosed);
    });
}
