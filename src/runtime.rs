//! Runtime state for a host embedding the containers: configuration and the
//! session that owns named instances.

pub mod config;
pub mod session;

pub use config::Config;
pub use session::Session;
