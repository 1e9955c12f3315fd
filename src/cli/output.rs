//! Handles all user-facing output for the CLI.
//!
//! Results print either as colored text or as one JSON object per line.
//! Keeping both renderings here means every command formats results the same way.

use std::io::Write;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::script::{Outcome, TestSummary};
use crate::value::Value;

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    line: usize,
    statement: &'a str,
    #[serde(rename = "type")]
    type_name: &'static str,
    value: &'a Value,
}

/// Renders command results to stdout.
pub struct Printer {
    json: bool,
    stdout: StandardStream,
}

impl Printer {
    pub fn new(json: bool, color: bool) -> Self {
        let choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            json,
            stdout: StandardStream::stdout(choice),
        }
    }

    /// Prints one call result.
    pub fn value(&mut self, value: &Value) {
        if self.json {
            self.json_line(value);
            return;
        }
        let color = match value {
            Value::Bool(false) => Color::Red,
            Value::Nil => Color::Yellow,
            _ => Color::Green,
        };
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = writeln!(self.stdout, "{value}");
        let _ = self.stdout.reset();
    }

    /// Prints `statement => value` for each call of a script run.
    pub fn outcomes(&mut self, outcomes: &[Outcome]) {
        for outcome in outcomes {
            if self.json {
                self.json_line(&OutcomeRecord {
                    line: outcome.line,
                    statement: &outcome.statement,
                    type_name: outcome.value.type_name(),
                    value: &outcome.value,
                });
                continue;
            }
            let _ = write!(self.stdout, "{} => ", outcome.statement);
            self.value(&outcome.value);
        }
    }

    /// Prints a list of tokens or slice elements.
    pub fn tokens(&mut self, tokens: &[String]) {
        if self.json {
            self.json_line(&tokens);
            return;
        }
        for (i, token) in tokens.iter().enumerate() {
            let _ = writeln!(self.stdout, "[{i}] {token:?}");
        }
    }

    /// Prints the PASS/FAIL line for every script and a closing summary.
    pub fn summary(&mut self, summary: &TestSummary) {
        for path in &summary.passed {
            self.status(Color::Green, "PASS", &path.display().to_string());
        }
        for (path, error) in &summary.failed {
            self.status(Color::Red, "FAIL", &format!("{}: {error}", path.display()));
        }
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_bold(true));
        let _ = writeln!(
            self.stdout,
            "{} passed, {} failed, {} total",
            summary.passed.len(),
            summary.failed.len(),
            summary.total()
        );
        let _ = self.stdout.reset();
    }

    fn status(&mut self, color: Color, label: &str, detail: &str) {
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(self.stdout, "{label}");
        let _ = self.stdout.reset();
        let _ = writeln!(self.stdout, " {detail}");
    }

    fn json_line<T: Serialize + ?Sized>(&mut self, record: &T) {
        match serde_json::to_string(record) {
            Ok(line) => {
                let _ = writeln!(self.stdout, "{line}");
            }
            Err(e) => tracing::warn!(%e, "failed to serialize result"),
        }
    }
}
