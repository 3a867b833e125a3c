//! Tracing subscriber setup
//!
//! Headless commands log to stderr. The TUI owns the terminal, so it logs to
//! `~/.airdash/airdash.log` instead.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::airdash_dir;

/// Environment variable holding a tracing filter (e.g. `airdash=debug`)
pub const LOG_ENV: &str = "AIRDASH_LOG";

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn build_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(fallback.as_str().to_lowercase()))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(target: LogTarget, verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_target(false)
        .compact();

    match target {
        LogTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        LogTarget::File => {
            let file = airdash_dir().ok().and_then(|dir| {
                fs::create_dir_all(&dir).ok()?;
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(dir.join("airdash.log"))
                    .ok()
            });

            // No writable log file: stay silent rather than draw over the TUI
            if let Some(file) = file {
                let _ = builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
        }
    }
}
