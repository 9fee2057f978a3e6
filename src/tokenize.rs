// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Argument tokenizer for `return` statements
//!
//! Splits an argument list on commas that sit outside any parentheses:
//! - `a, f(b, c), d` -> `["a", "f(b, c)", "d"]`
//! - `` -> `[""]`
//!
//! Depth is not bounds-checked. Unbalanced input gives a wrong split, never a panic.

/// Split `args` (the text after `return `) into trimmed top-level arguments
pub fn tokenize_args(args: &str) -> Vec<String> {
    let mut tokens = vec![String::new()];
    let mut depth: isize = 0;

    for c in args.chars() {
        if c == ',' && depth == 0 {
            tokens.push(String::new());
            continue;
        }

        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }

        if let Some(current) = tokens.last_mut() {
            current.push(c);
        }
    }

    tokens.iter().map(|t| t.trim().to_string()).collect()
}
