// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Line rewriter
//!
//! Wraps error-valued `return` arguments in the decorator call and keeps the
//! line's leading whitespace verbatim. A line only counts when its trimmed
//! text starts with `return `, so nothing but whitespace can precede it.
//!
//! Only single-line returns are recognised, and `return ` inside a string or
//! comment is rewritten like any other.

use crate::classify::is_wrappable;
use crate::error::Result;
use crate::tokenize::tokenize_args;
use regex::Regex;
use std::borrow::Cow;

const RETURN_KEYWORD: &str = "return ";

/// Wrap the error arguments of a `return` line; any other line comes back untouched
pub fn wrap_line<'a>(line: &'a str, decorator: &str) -> Cow<'a, str> {
    let trimmed = line.trim();

    let Some(args) = trimmed.strip_prefix(RETURN_KEYWORD) else {
        return Cow::Borrowed(line);
    };

    let wrapped: Vec<String> = tokenize_args(args)
        .into_iter()
        .map(|arg| {
            if is_wrappable(&arg) {
                format!("{decorator}({arg})")
            } else {
                arg
            }
        })
        .collect();

    // The trimmed line starts with the keyword, so the original contains it.
    let prefix = line
        .find(RETURN_KEYWORD)
        .map_or("", |idx| &line[..idx]);

    Cow::Owned(format!("{prefix}{RETURN_KEYWORD}{}", wrapped.join(", ")))
}

/// Line rewriter with the double-wrap cleanup pattern compiled once
#[derive(Debug, Clone)]
pub struct LineRewriter {
    decorator: String,
    double_wrap: Option<Regex>,
}

impl LineRewriter {
    /// Rewriter that also collapses `decorator(errors.X(...))` artifacts
    pub fn new(decorator: &str) -> Result<Self> {
        let pattern = format!(r"{}\(errors\.(.*?)\)\)", regex::escape(decorator));
        Ok(Self {
            decorator: decorator.to_string(),
            double_wrap: Some(Regex::new(&pattern)?),
        })
    }

    /// Rewriter without the cleanup pass
    pub fn without_cleanup(decorator: &str) -> Self {
        Self {
            decorator: decorator.to_string(),
            double_wrap: None,
        }
    }

    /// Wrap, then collapse the double-wrap shape. Cleanup applies to every line.
    pub fn rewrite<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let wrapped = wrap_line(line, &self.decorator);

        let Some(re) = &self.double_wrap else {
            return wrapped;
        };

        if !re.is_match(&wrapped) {
            return wrapped;
        }

        Cow::Owned(re.replace_all(&wrapped, "errors.${1})").into_owned())
    }
}
