// Error taxonomy for a single invocation
//
// Every failure is terminal. The variant decides the process exit status,
// so a build system can tell the cases apart without parsing stderr.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Error for one header emission
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Configuration file could not be read, parsed or validated
    #[error("invalid configuration: {error:#}")]
    Config {
        /// Context chain from the config loader
        error: anyhow::Error,
    },
    /// Arguments are well-formed for the parser but unusable
    #[error("{message}")]
    Usage { message: String },
    /// Input path is missing or is not a regular file
    #[error("input not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    /// Input is zero bytes long and empty input is not allowed
    #[error("input is empty: {}", path.display())]
    InputEmpty { path: PathBuf },
    /// Input exists but reading it failed
    #[error("failed to read input {}: {error}", path.display())]
    InputRead {
        path: PathBuf,
        /// Low-level error
        error: io::Error,
    },
    /// Output directory, temp file or final rename failed
    #[error("failed to write output {}: {error}", path.display())]
    OutputWrite {
        path: PathBuf,
        /// Low-level error
        error: io::Error,
    },
}

impl EmitError {
    /// Process exit status for this error.
    ///
    /// `2` matches the status clap uses for its own usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config { .. } => 1,
            Self::Usage { .. } => 2,
            Self::InputNotFound { .. } => 3,
            Self::InputEmpty { .. } => 4,
            Self::OutputWrite { .. } => 5,
            Self::InputRead { .. } => 6,
        }
    }
}

impl From<&EmitError> for ExitCode {
    fn from(error: &EmitError) -> Self {
        ExitCode::from(error.exit_code())
    }
}
