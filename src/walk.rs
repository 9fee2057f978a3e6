// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Tree walker
//!
//! Visits everything under the root in file-name order and hands matching
//! files to the driver. The vendor check is a plain prefix test on the
//! root-relative path, so only a top-level vendor directory is skipped.
//! The first error stops the walk; earlier rewrites stay on disk.

use crate::config::Config;
use crate::driver::process_file;
use crate::error::{Result, WrapError};
use crate::rewrite::LineRewriter;
use crate::tools::ToolRunner;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Counters for one walk
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    pub files_seen: usize,
    pub skipped_extension: usize,
    pub skipped_vendor: usize,
    pub files_processed: usize,
    pub files_written: usize,
    pub lines_changed: usize,
}

/// Build the rewriter `config` asks for
pub fn line_rewriter(config: &Config) -> Result<LineRewriter> {
    if config.cleanup_double_wrap {
        LineRewriter::new(&config.decorator)
    } else {
        Ok(LineRewriter::without_cleanup(&config.decorator))
    }
}

/// True if `rel` (root-relative) sits under the vendor prefix
pub fn is_vendored(rel: &Path, vendor_prefix: &str) -> bool {
    let rel = rel.to_string_lossy().replace('\\', "/");
    rel.starts_with(vendor_prefix)
}

/// True if `path` carries the target extension (given without the dot).
/// A bare dotfile such as `.go` counts as having extension `go`.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    if path.extension().is_some_and(|e| e == extension) {
        return true;
    }

    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix('.'))
        .is_some_and(|rest| rest == extension)
}

/// Walk `config.root`, writing one `processing: <path>` line per matched file
pub fn walk_tree(config: &Config, tools: &dyn ToolRunner, out: &mut dyn Write) -> Result<WalkStats> {
    let rewriter = line_rewriter(config)?;
    let mut stats = WalkStats::default();

    for entry in WalkDir::new(&config.root).sort_by_file_name() {
        let entry = entry?;

        if entry.file_type().is_dir() {
            continue;
        }
        stats.files_seen += 1;

        let path = entry.path();
        let rel = path
            .strip_prefix(&config.root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(path);

        if !has_extension(rel, &config.extension) {
            stats.skipped_extension += 1;
            continue;
        }

        if is_vendored(rel, &config.vendor_prefix) {
            log::trace!("skipping vendored {}", rel.display());
            stats.skipped_vendor += 1;
            continue;
        }

        writeln!(out, "processing: {}", rel.display()).map_err(WrapError::Output)?;

        let outcome = process_file(path, config, &rewriter, tools, out)?;
        stats.files_processed += 1;
        stats.lines_changed += outcome.lines_changed;
        if outcome.written {
            stats.files_written += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_prefix_matches_top_level_only() {
        assert!(is_vendored(Path::new("vendor/x/a.go"), "vendor/"));
        assert!(!is_vendored(Path::new("pkg/vendor/a.go"), "vendor/"));
        assert!(!is_vendored(Path::new("vendored.go"), "vendor/"));
    }

    #[test]
    fn test_extension_match() {
        assert!(has_extension(Path::new("a/b.go"), "go"));
        assert!(!has_extension(Path::new("a/b.rs"), "go"));
        assert!(!has_extension(Path::new("a/go"), "go"));
        assert!(!has_extension(Path::new("a/b.go.orig"), "go"));
    }

    #[test]
    fn test_bare_dotfile_matches_extension() {
        assert!(has_extension(Path::new(".go"), "go"));
        assert!(has_extension(Path::new("pkg/.go"), "go"));
        assert!(!has_extension(Path::new("pkg/.gox"), "go"));
        assert!(!has_extension(Path::new("pkg/.gitignore"), "go"));
    }

    #[test]
    fn test_line_rewriter_follows_cleanup_flag() {
        let line = "\treturn errors.New(\"x\")";

        let with = line_rewriter(&Config::default()).unwrap();
        assert_eq!(with.rewrite(line), line);

        let config = Config {
            cleanup_double_wrap: false,
            ..Config::default()
        };
        let without = line_rewriter(&config).unwrap();
        assert_eq!(without.rewrite(line), "\treturn errors.WithStack(errors.New(\"x\"))");
    }
}
