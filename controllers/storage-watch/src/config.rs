//! Controller configuration, read from environment variables.

use crate::error::ControllerError;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

/// Path of the cluster watch feed (`-` for stdin)
pub const CLUSTER_WATCH_INPUT: &str = "CLUSTER_WATCH_INPUT";

/// Path of the pool watch feed (`-` for stdin)
pub const POOL_WATCH_INPUT: &str = "POOL_WATCH_INPUT";

/// Where a watch feed is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchInput {
    /// Standard input
    Stdin,
    /// A file or named pipe
    Path(PathBuf),
}

impl WatchInput {
    fn parse(value: &str) -> Self {
        if value == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(value))
        }
    }

    /// Opens the input as a buffered byte stream
    pub fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(match self {
            Self::Stdin => Box::new(BufReader::new(io::stdin())),
            Self::Path(path) => Box::new(BufReader::new(File::open(path)?)),
        })
    }
}

impl std::fmt::Display for WatchInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Which feeds to watch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Cluster feed, if watched
    pub cluster_input: Option<WatchInput>,
    /// Pool feed, if watched
    pub pool_input: Option<WatchInput>,
}

impl WatchConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps variable names to values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(|v| WatchInput::parse(v.trim()))
        };
        let config = Self {
            cluster_input: read(CLUSTER_WATCH_INPUT),
            pool_input: read(POOL_WATCH_INPUT),
        };

        match (&config.cluster_input, &config.pool_input) {
            (None, None) => Err(ControllerError::InvalidConfig(format!(
                "at least one of {CLUSTER_WATCH_INPUT} or {POOL_WATCH_INPUT} must be set"
            ))),
            (Some(WatchInput::Stdin), Some(WatchInput::Stdin)) => {
                Err(ControllerError::InvalidConfig(
                    "cluster and pool watches cannot both read stdin".to_string(),
                ))
            }
            _ => Ok(config),
        }
    }
}
