//! Server configuration.
//!
//! A [`Config`] can be built from the classic `<protocol> <port> <root>`
//! command line, from a YAML file, or from `DOCROOT_*` environment variables.

use anyhow::{Context, bail};
use serde::Deserialize;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// IP family the listener binds to.
///
/// In YAML it may be written as `4`/`6` or `v4`/`v6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawProtocol")]
pub enum Protocol {
    V4,
    V6,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProtocol {
    Number(u8),
    Text(String),
}

impl TryFrom<RawProtocol> for Protocol {
    type Error = String;

    fn try_from(raw: RawProtocol) -> Result<Self, Self::Error> {
        let text = match raw {
            RawProtocol::Number(n) => n.to_string(),
            RawProtocol::Text(s) => s,
        };
        Protocol::from_str(&text).ok_or_else(|| format!("protocol must be 4 or 6, got {text:?}"))
    }
}

impl Protocol {
    /// Parses `"4"`/`"6"` (or `"v4"`/`"v6"`, any case).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "v4" | "ipv4" => Some(Protocol::V4),
            "6" | "v6" | "ipv6" => Some(Protocol::V6),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub protocol: Protocol,
    pub port: u16,
    /// Directory files are served from.
    pub root: PathBuf,
    /// Pending-connection queue length passed to `listen`.
    pub backlog: u32,
    /// Upper bound on concurrently served connections; unbounded when `None`.
    pub max_connections: Option<usize>,
    /// Deadline for each socket read; reads may stall forever when `None`.
    pub read_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: Protocol::V4,
            port: 8080,
            root: PathBuf::from("."),
            backlog: 10,
            max_connections: None,
            read_timeout_secs: None,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("DOCROOT_PROTOCOL") {
            cfg.protocol = Protocol::from_str(&v)
                .with_context(|| format!("DOCROOT_PROTOCOL must be 4 or 6, got {v:?}"))?;
        }
        if let Ok(v) = std::env::var("DOCROOT_PORT") {
            cfg.port = v.trim().parse::<u16>().context("invalid DOCROOT_PORT")?;
        }
        if let Ok(v) = std::env::var("DOCROOT_ROOT") {
            cfg.root = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DOCROOT_MAX_CONNECTIONS") {
            cfg.max_connections = Some(v.trim().parse::<usize>().context("invalid DOCROOT_MAX_CONNECTIONS")?);
        }
        if let Ok(v) = std::env::var("DOCROOT_READ_TIMEOUT") {
            cfg.read_timeout_secs = Some(v.trim().parse::<u64>().context("invalid DOCROOT_READ_TIMEOUT")?);
        }

        Ok(cfg)
    }

    /// Builds a config from `<protocol> <port> <root>` positional arguments.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> anyhow::Result<Self> {
        let [protocol, port, root] = args else {
            bail!("expected 3 arguments: <protocol> <port> <root>, got {}", args.len());
        };

        let (protocol, port, root): (&str, &str, &str) =
            (protocol.as_ref(), port.as_ref(), root.as_ref());

        Ok(Self {
            protocol: Protocol::from_str(protocol)
                .with_context(|| format!("protocol must be 4 or 6, got {protocol:?}"))?,
            port: port
                .parse::<u16>()
                .with_context(|| format!("invalid port {port:?}"))?,
            root: PathBuf::from(root),
            ..Self::default()
        })
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid YAML configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Passive address on every interface of the configured family.
    pub fn listen_addr(&self) -> SocketAddr {
        match self.protocol {
            Protocol::V4 => SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port)),
            Protocol::V6 => SocketAddr::from((Ipv6Addr::UNSPECIFIED, self.port)),
        }
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    /// Resolves `root` to an absolute, symlink-free directory path.
    pub fn canonical_root(&self) -> anyhow::Result<PathBuf> {
        let root = self
            .root
            .canonicalize()
            .with_context(|| format!("document root {} is not accessible", self.root.display()))?;

        if !root.is_dir() {
            bail!("document root {} is not a directory", root.display());
        }

        Ok(root)
    }
}
