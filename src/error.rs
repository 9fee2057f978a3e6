// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Error type shared by the walker, the file driver and the tool runners.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Everything that can stop a run. None of these are recovered locally.
#[derive(Debug, Error)]
pub enum WrapError {
    /// A directory entry could not be read during traversal
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Stat, read, write or permission restore failed for a file
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External tool exited non-zero; the message is its combined output
    #[error("{output}")]
    ToolFailed { tool: String, output: String },

    /// External tool could not be started at all
    #[error("{tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool exited non-zero, reported without its output
    #[error("{tool}: {status}")]
    ToolStatus { tool: String, status: ExitStatus },

    /// Progress or report output could not be written
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// The cleanup pattern built from the decorator name did not compile
    #[error("invalid cleanup pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl WrapError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WrapError>;
