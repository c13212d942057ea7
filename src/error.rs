//! Errors surfaced by the wrapped operations.
//!
//! The library never terminates the process. Every operation returns a
//! [`ToolError`] on failure and leaves it to the caller (usually `main`) to
//! print the diagnostic and exit with [`ToolError::exit_code`].

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be started at all (missing from the search path, not executable, ...)
    #[error("{action}: could not run `{command}`")]
    Spawn {
        action: &'static str,
        command: String,
        #[source]
        source: io::Error,
    },

    /// The program ran but reported failure
    #[error("{action}: `{command}` {}", describe_exit(.code))]
    Exited {
        action: &'static str,
        command: String,
        code: Option<i32>,
    },

    #[error("{action}: {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no active conda environment is marked in the `conda info --envs` listing")]
    NoActiveEnvironment,

    #[error(
        "backup directory {} lies inside {}, which would be copied into itself",
        .backup_dir.display(),
        .entry.display()
    )]
    NestedBackup { backup_dir: PathBuf, entry: PathBuf },

    #[error("backup directory {} is the project directory itself", .backup_dir.display())]
    BackupIsProject { backup_dir: PathBuf },
}

impl ToolError {
    /// Every failure maps to the same process exit status.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}
