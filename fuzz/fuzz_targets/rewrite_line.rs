#![no_main]

use libfuzzer_sys::fuzz_target;
use wrapstack::{tokenize_args, LineRewriter};

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        // Unbalanced parens and stray keywords must never panic.
        let _ = tokenize_args(line);
        if let Ok(rewriter) = LineRewriter::new("errors.WithStack") {
            let _ = rewriter.rewrite(line);
        }
    }
});
