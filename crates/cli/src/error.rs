//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: combination error (unknown model, bad parameters, shape mismatch)
//! - 11: I/O error (reading or writing field files)
//! - 12: input error (bad JSON params, malformed field file)
//! - 13: serialization error (JSON output, non-finite combined cells)

use std::fmt;
use wake_combine_core::CombinationError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A combination-level error (unknown model, bad parameters, shape mismatch).
    Combination(CombinationError),
    /// An I/O error (field file read or write).
    Io(String),
    /// A user input error (bad JSON params, malformed field file).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Combination(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Combination(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<CombinationError> for CliError {
    fn from(e: CombinationError) -> Self {
        match e {
            CombinationError::Io(msg) => CliError::Io(msg),
            CombinationError::Parse(msg) => CliError::Input(msg),
            CombinationError::Serialize(msg) => CliError::Serialization(msg),
            other => CliError::Combination(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
