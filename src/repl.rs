// Interactive session: read commands, dispatch them, re-render

use crate::command::{self, Action};
use crate::render::{self, Format};
use crate::view::{Outcome, View};
use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// One running session over a single view
pub struct Session {
    view: View,
    format: Format,
    prompt: bool,
}

impl Session {
    pub fn new(view: View, format: Format) -> Self {
        Self {
            view,
            format,
            prompt: false,
        }
    }

    /// Print a `> ` prompt before reading each line
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Render the current view
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let text = render::render(&self.view.model(), self.format)?;
        writeln!(out, "{}", text).context("Failed to write view")?;
        Ok(())
    }

    /// Handle a single input line
    ///
    /// Returns `false` once the session should end. Bad commands are reported
    /// to `out` and do not end the session.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        let command = match command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(e) => {
                debug!(line, error = %e, "Rejected command");
                writeln!(out, "error: {}", e)?;
                return Ok(true);
            }
        };

        let action = match command.resolve(&self.view.model()) {
            Ok(action) => action,
            Err(e) => {
                debug!(line, error = %e, "Command does not apply");
                writeln!(out, "error: {}", e)?;
                return Ok(true);
            }
        };

        match action {
            Action::Dispatch(events) => {
                let mut ignored = false;
                for event in events {
                    ignored |= self.view.dispatch(event) == Outcome::Ignored;
                }
                if ignored {
                    writeln!(out, "(nothing changed)")?;
                }
                self.render(out)?;
            }
            Action::Show => self.render(out)?,
            Action::Help => writeln!(out, "{}", command::help())?,
            Action::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.render(out)?;

        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(out, "> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read command")?;

            if !self.handle_line(&line, out)? {
                break;
            }
        }

        let counts = self.view.store().counts();
        info!(
            total = counts.total,
            completed = counts.completed,
            removed = counts.removed,
            "Session ended"
        );
        Ok(())
    }

    /// Replay commands from a script file
    pub fn run_file<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<()> {
        let file = File::open(path).with_context(|| format!("Failed to open script {:?}", path))?;
        info!(script = ?path, "Replaying script");
        self.run(BufReader::new(file), out)
    }
}
