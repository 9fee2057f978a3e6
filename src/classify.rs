// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Decide which `return` arguments are error values worth wrapping.
//!
//! Purely syntactic: no types are resolved, so anything that merely starts
//! with one of the constructor prefixes is treated as an error.

/// The conventional error variable name
pub const ERROR_IDENT: &str = "err";

/// Call prefixes that build a new error value
pub const ERROR_CONSTRUCTOR_PREFIXES: [&str; 3] = ["errors.New", "fmt.Errorf", "log.Error"];

/// True if `arg` (already trimmed) should get the decorator applied
pub fn is_wrappable(arg: &str) -> bool {
    arg == ERROR_IDENT
        || ERROR_CONSTRUCTOR_PREFIXES
            .iter()
            .any(|prefix| arg.starts_with(prefix))
}
