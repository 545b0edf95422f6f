//! CLI command implementation

pub mod backup;
pub mod error;

pub use backup::Cli;
pub use error::CliError;
