// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Run configuration
//!
//! The defaults are the tool's fixed behaviour; the binary only overrides
//! them when a flag is given.

use std::path::PathBuf;

/// How a failing import organizer is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFailureMode {
    /// Error message is the tool's combined stdout and stderr
    Strict,
    /// Error is the bare exit status
    Loose,
}

/// Configuration for one run over a tree
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to walk
    pub root: PathBuf,
    /// Extension of files to rewrite, without the dot
    pub extension: String,
    /// Root-relative path prefix that is never visited
    pub vendor_prefix: String,
    /// Stack-capturing call wrapped around error arguments
    pub decorator: String,
    /// Run the formatter import-rewrite pass before wrapping
    pub rewrite_imports: bool,
    /// Collapse `decorator(errors.X(...))` back to `errors.X(...)`
    pub cleanup_double_wrap: bool,
    pub tool_failure: ToolFailureMode,
    /// Report changes without writing files or running tools
    pub dry_run: bool,
    /// Print each changed line
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: "go".to_string(),
            vendor_prefix: "vendor/".to_string(),
            decorator: "errors.WithStack".to_string(),
            rewrite_imports: true,
            cleanup_double_wrap: true,
            tool_failure: ToolFailureMode::Strict,
            dry_run: false,
            verbose: false,
        }
    }
}
