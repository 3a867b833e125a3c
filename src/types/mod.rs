//! Type definitions for airdash

mod error;
mod flight;
mod summary;

pub use error::*;
pub use flight::*;
pub use summary::*;

/// Cache loading warning types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheWarning {
    /// Failed to open or read cache metadata
    LoadFailed(String),
    /// Cache metadata was corrupted (invalid JSON)
    Corrupted(String),
    /// Cache expired and refresh failed; the stale copy is in use
    Stale(String),
}

impl CacheWarning {
    /// Short text for the dashboard header
    pub fn message(&self) -> &str {
        match self {
            Self::LoadFailed(msg) | Self::Corrupted(msg) | Self::Stale(msg) => msg,
        }
    }
}

#[cfg(test)]
pub(crate) use flight::test_support;
