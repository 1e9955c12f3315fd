pub use crate::errors::{ErrorKind, SeqError};

pub mod argument;
pub mod cli;
pub mod containers;
pub mod errors;
pub mod runtime;
pub mod script;
pub mod value;
