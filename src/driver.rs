// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! File driver: read, rewrite every line, write back, organize imports.
//!
//! Permission bits are captured before the write and restored after it.

use crate::config::Config;
use crate::error::{Result, WrapError};
use crate::rewrite::LineRewriter;
use crate::tools::ToolRunner;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One file's state between read and write-back
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub permissions: fs::Permissions,
    /// Lines as read, split on `\n`
    pub original: Vec<String>,
    /// Lines after rewriting; same length as `original`
    pub rewritten: Vec<String>,
}

impl FileRecord {
    /// Read permission bits and content. Content must be UTF-8.
    pub fn read(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| WrapError::io(path, e))?;
        let bytes = fs::read(path).map_err(|e| WrapError::io(path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            WrapError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        let original: Vec<String> = content.split('\n').map(str::to_string).collect();

        Ok(Self {
            path: path.to_path_buf(),
            permissions: metadata.permissions(),
            rewritten: original.clone(),
            original,
        })
    }

    /// Rewrite every line independently, in order
    pub fn rewrite(&mut self, rewriter: &LineRewriter) {
        self.rewritten = self
            .original
            .iter()
            .map(|line| rewriter.rewrite(line).into_owned())
            .collect();
    }

    /// (1-based line number, old, new) for every line the rewrite touched
    pub fn changed_lines(&self) -> Vec<(usize, &str, &str)> {
        self.original
            .iter()
            .zip(&self.rewritten)
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(i, (old, new))| (i + 1, old.as_str(), new.as_str()))
            .collect()
    }

    pub fn contents(&self) -> String {
        self.rewritten.join("\n")
    }

    /// Write the rewritten text and restore the original permission bits
    pub fn write_back(&self) -> Result<()> {
        fs::write(&self.path, self.contents()).map_err(|e| WrapError::io(&self.path, e))?;
        fs::set_permissions(&self.path, self.permissions.clone())
            .map_err(|e| WrapError::io(&self.path, e))
    }
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub lines_changed: usize,
    pub written: bool,
}

/// Run the full per-file pipeline
///
/// 1. import rewrite pass (if enabled)
/// 2. read, rewrite lines, write back with original permissions
/// 3. import organizer
///
/// In dry-run mode neither tool runs and nothing is written.
pub fn process_file(
    path: &Path,
    config: &Config,
    rewriter: &LineRewriter,
    tools: &dyn ToolRunner,
    out: &mut dyn Write,
) -> Result<FileOutcome> {
    if config.rewrite_imports && !config.dry_run {
        tools.rewrite_imports(path)?;
    }

    let mut record = FileRecord::read(path)?;
    record.rewrite(rewriter);

    let changed = record.changed_lines();
    log::debug!("{}: {} line(s) changed", path.display(), changed.len());

    if config.verbose || config.dry_run {
        for (line_num, old, new) in &changed {
            if config.verbose {
                writeln!(out, "  Line {line_num}:").map_err(WrapError::Output)?;
                writeln!(out, "    - {}", old.trim()).map_err(WrapError::Output)?;
                writeln!(out, "    + {}", new.trim()).map_err(WrapError::Output)?;
            } else {
                writeln!(out, "  Line {line_num}: {}", new.trim()).map_err(WrapError::Output)?;
            }
        }
    }

    let outcome = FileOutcome {
        path: path.to_path_buf(),
        lines_changed: changed.len(),
        written: !config.dry_run,
    };

    if config.dry_run {
        return Ok(outcome);
    }

    record.write_back()?;
    tools.organize_imports(path)?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::NoTools;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn rewriter() -> LineRewriter {
        LineRewriter::new("errors.WithStack").unwrap()
    }

    fn write_temp(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Records tool calls in order
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl ToolRunner for Recorder {
        fn rewrite_imports(&self, path: &Path) -> Result<()> {
            // Stand in for gofmt so the read afterwards sees the change.
            let text = fs::read_to_string(path).unwrap();
            fs::write(path, text.replace("fmt.Errorf", "errors.Errorf")).unwrap();
            self.calls.borrow_mut().push("rewrite_imports".to_string());
            Ok(())
        }

        fn organize_imports(&self, path: &Path) -> Result<()> {
            let text = fs::read_to_string(path).unwrap();
            self.calls
                .borrow_mut()
                .push(format!("organize_imports:{}", text.lines().count()));
            Ok(())
        }
    }

    struct FailingOrganizer;

    impl ToolRunner for FailingOrganizer {
        fn rewrite_imports(&self, _path: &Path) -> Result<()> {
            Ok(())
        }

        fn organize_imports(&self, _path: &Path) -> Result<()> {
            Err(WrapError::ToolFailed {
                tool: "goimports".to_string(),
                output: "a.go:1:1: expected 'package'".to_string(),
            })
        }
    }

    #[test]
    fn test_record_splits_and_rejoins_on_newline() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "a.go", "a\n\treturn err\n");
        let mut record = FileRecord::read(&path).unwrap();
        assert_eq!(record.original, vec!["a", "\treturn err", ""]);

        record.rewrite(&rewriter());
        assert_eq!(record.contents(), "a\n\treturn errors.WithStack(err)\n");
        assert_eq!(record.changed_lines(), vec![(2, "\treturn err", "\treturn errors.WithStack(err)")]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = FileRecord::read(&dir.path().join("nope.go")).unwrap_err();
        assert!(matches!(err, WrapError::Io { .. }));
    }

    #[test]
    fn test_non_utf8_is_invalid_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bin.go");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();
        match FileRecord::read(&path).unwrap_err() {
            WrapError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_process_file_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "f.go", "func f() error {\n\treturn err\n}");
        let config = Config::default();
        let mut out: Vec<u8> = Vec::new();

        let outcome = process_file(&path, &config, &rewriter(), &NoTools, &mut out).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "func f() error {\n\treturn errors.WithStack(err)\n}"
        );
        assert_eq!(outcome.lines_changed, 1);
        assert!(outcome.written);
        assert!(out.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_are_preserved() {
        use std::os::unix::fs::PermissionsExt;

        for mode in [0o644, 0o755, 0o600] {
            let dir = TempDir::new().unwrap();
            let path = write_temp(&dir, "f.go", "\treturn err\n");
            fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();

            process_file(&path, &Config::default(), &rewriter(), &NoTools, &mut std::io::sink()).unwrap();

            let after = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(after, mode);
        }
    }

    #[test]
    fn test_tools_run_around_the_rewrite() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "f.go", "\treturn nil, fmt.Errorf(\"x\")\n");
        let tools = Recorder::default();

        process_file(&path, &Config::default(), &rewriter(), &tools, &mut std::io::sink()).unwrap();

        assert_eq!(
            *tools.calls.borrow(),
            vec!["rewrite_imports".to_string(), "organize_imports:1".to_string()]
        );
        // errors.Errorf is not in the wrap list, so the rewritten call stays bare.
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\treturn nil, errors.Errorf(\"x\")\n"
        );
    }

    #[test]
    fn test_import_rewrite_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "f.go", "\treturn fmt.Errorf(\"x\")\n");
        let tools = Recorder::default();
        let config = Config {
            rewrite_imports: false,
            ..Config::default()
        };

        process_file(&path, &config, &rewriter(), &tools, &mut std::io::sink()).unwrap();

        assert_eq!(*tools.calls.borrow(), vec!["organize_imports:1".to_string()]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\treturn errors.WithStack(fmt.Errorf(\"x\"))\n"
        );
    }

    #[test]
    fn test_dry_run_writes_nothing_and_reports_changes() {
        let dir = TempDir::new().unwrap();
        let original = "func f() error {\n\treturn nil, err\n}\n";
        let path = write_temp(&dir, "f.go", original);
        let tools = Recorder::default();
        let config = Config {
            dry_run: true,
            ..Config::default()
        };
        let mut out: Vec<u8> = Vec::new();

        let outcome = process_file(&path, &config, &rewriter(), &tools, &mut out).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), original);
        assert!(tools.calls.borrow().is_empty());
        assert!(!outcome.written);
        assert_eq!(outcome.lines_changed, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  Line 2: return nil, errors.WithStack(err)\n"
        );
    }

    #[test]
    fn test_verbose_shows_old_and_new() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "f.go", "\treturn err");
        let config = Config {
            verbose: true,
            ..Config::default()
        };
        let mut out: Vec<u8> = Vec::new();

        process_file(&path, &config, &rewriter(), &NoTools, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  Line 1:\n    - return err\n    + return errors.WithStack(err)\n"
        );
    }

    #[test]
    fn test_organizer_failure_surfaces_after_write() {
        let dir = TempDir::new().unwrap();
        let path = write_temp(&dir, "f.go", "\treturn err");

        let err = process_file(&path, &Config::default(), &rewriter(), &FailingOrganizer, &mut std::io::sink())
            .unwrap_err();

        assert_eq!(err.to_string(), "a.go:1:1: expected 'package'");
        // No rollback: the rewrite already landed.
        assert_eq!(fs::read_to_string(&path).unwrap(), "\treturn errors.WithStack(err)");
    }
}
