// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! External tools run around the line rewrite
//!
//! - formatter import rewrite (`gofmt -r ... -w`), before wrapping
//! - import organizer (`goimports -w`), after wrapping
//!
//! Both are blocking child processes. No timeouts, no retries.

use crate::config::ToolFailureMode;
use crate::error::{Result, WrapError};
use std::path::Path;
use std::process::Command;

/// Swap the standard errors package for one with stack support
pub const IMPORT_REWRITE_RULE: &str = r#""errors" -> "github.com/pkg/errors""#;

/// Route formatted errors through the stack-aware package
pub const ERRORF_REWRITE_RULE: &str = "fmt.Errorf -> errors.Errorf";

pub const DEFAULT_FORMATTER: &str = "gofmt";
pub const DEFAULT_IMPORT_ORGANIZER: &str = "goimports";

/// The two in-place passes the file driver needs
pub trait ToolRunner {
    /// Rewrite imports and formatted-error calls in place
    fn rewrite_imports(&self, path: &Path) -> Result<()>;

    /// Add, remove and sort imports in place to match symbol usage
    fn organize_imports(&self, path: &Path) -> Result<()>;
}

/// Runs the real formatter and import organizer as child processes
#[derive(Debug, Clone)]
pub struct SystemTools {
    formatter: String,
    import_organizer: String,
    failure_mode: ToolFailureMode,
}

impl SystemTools {
    pub fn new(failure_mode: ToolFailureMode) -> Self {
        Self::with_programs(DEFAULT_FORMATTER, DEFAULT_IMPORT_ORGANIZER, failure_mode)
    }

    /// Use other executables in place of `gofmt` and `goimports`
    pub fn with_programs(formatter: &str, import_organizer: &str, failure_mode: ToolFailureMode) -> Self {
        Self {
            formatter: formatter.to_string(),
            import_organizer: import_organizer.to_string(),
            failure_mode,
        }
    }
}

impl Default for SystemTools {
    fn default() -> Self {
        Self::new(ToolFailureMode::Strict)
    }
}

impl ToolRunner for SystemTools {
    fn rewrite_imports(&self, path: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.formatter);
        cmd.arg("-r")
            .arg(IMPORT_REWRITE_RULE)
            .arg("-r")
            .arg(ERRORF_REWRITE_RULE)
            .arg("-w")
            .arg(path);
        run_tool(&self.formatter, cmd, ToolFailureMode::Strict)
    }

    fn organize_imports(&self, path: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.import_organizer);
        cmd.arg("-w").arg(path);
        run_tool(&self.import_organizer, cmd, self.failure_mode)
    }
}

/// Skips both passes; used for dry runs and when the tools are unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTools;

impl ToolRunner for NoTools {
    fn rewrite_imports(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn organize_imports(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

fn run_tool(tool: &str, mut cmd: Command, mode: ToolFailureMode) -> Result<()> {
    log::debug!("running {:?}", cmd);

    let output = cmd.output().map_err(|source| WrapError::ToolSpawn {
        tool: tool.to_string(),
        source,
    })?;

    if output.status.success() {
        return Ok(());
    }

    match mode {
        ToolFailureMode::Strict => {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            Err(WrapError::ToolFailed {
                tool: tool.to_string(),
                output: combined,
            })
        }
        ToolFailureMode::Loose => Err(WrapError::ToolStatus {
            tool: tool.to_string(),
            status: output.status,
        }),
    }
}
