//! airdash: terminal dashboard for airline on-time performance data

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod parsers;
pub mod services;
pub mod tui;
pub mod types;
