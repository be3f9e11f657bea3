//! bankagg command-line front end.
//!
//! Stands in for the pages of the original browser client: each
//! subcommand drives one core operation, and session state lives in a
//! JSON file between invocations.

pub mod app;
pub mod config;
pub mod error;
pub mod telemetry;

pub use app::{Application, Command};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
