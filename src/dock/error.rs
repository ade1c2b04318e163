use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors from docking orchestration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Docking binary '{path}' could not be started: {source}.")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Docking process exited unsuccessfully ({status}): {stderr}.")]
    ProcessFailed { status: ExitStatus, stderr: String },

    #[error("Failed to read docking output file '{path}': {source}.")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed docking output: {0}.")]
    MalformedOutput(String),
}
