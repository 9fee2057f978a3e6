// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Wrapstack - wrap error returns with stack-capturing calls
//!
//! Rewrites `return` lines in Go source so that error arguments become
//! `errors.WithStack(...)`, working on line text only (no syntax tree).

pub mod classify;
pub mod config;
pub mod driver;
pub mod error;
pub mod rewrite;
pub mod tokenize;
pub mod tools;
pub mod walk;

// Re-export commonly used items
pub use classify::is_wrappable;
pub use config::{Config, ToolFailureMode};
pub use driver::{process_file, FileOutcome, FileRecord};
pub use error::{Result, WrapError};
pub use rewrite::{wrap_line, LineRewriter};
pub use tokenize::tokenize_args;
pub use tools::{NoTools, SystemTools, ToolRunner};
pub use walk::{walk_tree, WalkStats};
