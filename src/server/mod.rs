//! Listener setup and connection dispatch.

pub mod listener;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;

/// Read-only state shared by every connection task.
#[derive(Debug, Clone)]
pub struct ServeContext {
    /// Canonical document root.
    pub root: PathBuf,
    pub read_timeout: Option<Duration>,
    pub max_connections: Option<usize>,
}

impl ServeContext {
    /// `root` must already be canonical.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            read_timeout: None,
            max_connections: None,
        }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            root: cfg.canonical_root()?,
            read_timeout: cfg.read_timeout(),
            max_connections: cfg.max_connections,
        })
    }

    pub fn with_read_timeout(mut self, limit: Duration) -> Self {
        self.read_timeout = Some(limit);
        self
    }

    pub fn with_max_connections(mut self, limit: usize) -> Self {
        self.max_connections = Some(limit);
        self
    }
}
