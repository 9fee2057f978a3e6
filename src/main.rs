// Copyright (c) 2025 Wrapstack Contributors
// SPDX-License-Identifier: MIT

//! Wrap error returns in every Go file under a directory
//!
//! Usage:
//!   wrapstack                      # Rewrite ./**/*.go, skipping vendor/
//!   wrapstack -d pkg               # Rewrite another tree
//!   wrapstack --dry-run -v         # Show what would change
//!
//! Binary: wrapstack

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use wrapstack::tools::ToolRunner;
use wrapstack::{walk_tree, Config, NoTools, SystemTools, ToolFailureMode};

#[derive(Parser)]
#[command(name = "wrapstack")]
#[command(about = "Wrap error return values with stack-capturing calls")]
struct Args {
    /// Directory to walk
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Extension of files to rewrite, without the dot
    #[arg(short, long, default_value = "go")]
    ext: String,

    /// Root-relative prefix that is never visited
    #[arg(long, default_value = "vendor/")]
    vendor_dir: String,

    /// Call wrapped around error arguments
    #[arg(long, default_value = "errors.WithStack")]
    decorator: String,

    /// Skip the gofmt import rewrite before wrapping
    #[arg(long)]
    no_rewrite_imports: bool,

    /// Keep decorator(errors.X(...)) instead of collapsing it
    #[arg(long)]
    no_cleanup: bool,

    /// Report goimports failures by exit status only
    #[arg(long)]
    loose_tools: bool,

    /// Show what would change without writing files or running tools
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print each changed line
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Config {
        Config {
            root: self.dir,
            extension: self.ext,
            vendor_prefix: self.vendor_dir,
            decorator: self.decorator,
            rewrite_imports: !self.no_rewrite_imports,
            cleanup_double_wrap: !self.no_cleanup,
            tool_failure: if self.loose_tools {
                ToolFailureMode::Loose
            } else {
                ToolFailureMode::Strict
            },
            dry_run: self.dry_run,
            verbose: self.verbose,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Failures are reported but the exit status stays 0.
    if let Err(err) = run(Args::parse().into_config()) {
        eprintln!("ERROR: {err}");
    }
}

fn run(config: Config) -> Result<()> {
    let system_tools = SystemTools::new(config.tool_failure);
    let tools: &dyn ToolRunner = if config.dry_run { &NoTools } else { &system_tools };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let stats = walk_tree(&config, tools, &mut out)?;
    out.flush().context("failed to flush stdout")?;

    log::info!(
        "{} file(s) seen, {} processed, {} line(s) changed, {} skipped by extension, {} vendored",
        stats.files_seen,
        stats.files_processed,
        stats.lines_changed,
        stats.skipped_extension,
        stats.skipped_vendor
    );

    Ok(())
}
