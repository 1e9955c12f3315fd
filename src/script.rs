//! Line-oriented call scripts.
//!
//! A script drives a [`Session`](crate::runtime::Session) the way a host
//! would, one call per line:
//!
//! ```text
//! # comment
//! let names = list
//! names.Append A,B,C,D,E,F
//! names.Splice 0,6,2
//! expect A,C,E
//! names.Erase 9
//! expect-error
//! ```

use std::path::PathBuf;

use crate::errors::SeqError;

pub mod discovery;
pub mod parser;
pub mod runner;

pub use parser::{parse, Line, Statement};
pub use runner::{Outcome, ScriptRunner};

/// What an `expect` line asserts about the previous call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The rendered value equals this text.
    Value(String),
    /// The call failed.
    Error,
}

/// Pass/fail results over a batch of script files, in discovery order.
#[derive(Debug, Default)]
pub struct TestSummary {
    pub passed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, SeqError)>,
}

impl TestSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }
}
