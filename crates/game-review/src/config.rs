//! Analyzer configuration from environment variables

use std::env;

const DEFAULT_STOCKFISH_PATH: &str = "/usr/bin/stockfish";
const DEFAULT_THREADS: u32 = 1;
const DEFAULT_HASH_MB: u32 = 256;

#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    pub engine: EngineConfig,
}

/// Everything needed to start an engine session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Path to the Stockfish binary
    pub path: String,

    /// UCI `Threads` option
    pub threads: u32,

    /// UCI `Hash` option, in MB
    pub hash_mb: u32,
}

impl EngineConfig {
    /// Engine at `path` with default options.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            threads: DEFAULT_THREADS,
            hash_mb: DEFAULT_HASH_MB,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_path(DEFAULT_STOCKFISH_PATH)
    }
}

impl AnalyzerConfig {
    /// Load configuration from environment variables.
    /// Unset or unparseable values fall back to defaults.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = lookup("STOCKFISH_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STOCKFISH_PATH.to_string());

        let threads = lookup("STOCKFISH_THREADS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&t: &u32| t > 0)
            .unwrap_or(DEFAULT_THREADS);

        let hash_mb = lookup("STOCKFISH_HASH_MB")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&h: &u32| h > 0)
            .unwrap_or(DEFAULT_HASH_MB);

        Self {
            engine: EngineConfig {
                path,
                threads,
                hash_mb,
            },
        }
    }
}
