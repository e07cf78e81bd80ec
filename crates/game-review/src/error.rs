//! Analyzer error types

use chess_core::PgnError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid input JSON: {0}")]
    InvalidInput(String),

    #[error("Could not parse PGN: {0}")]
    UnparseableGame(String),

    #[error("No game in PGN")]
    EmptyGame,

    #[error("Stockfish not found at {path}")]
    EngineUnavailable { path: String },

    #[error("Failed to start Stockfish: {0}")]
    EngineStartup(String),

    /// I/O or protocol failure inside a running session. Handshake failures
    /// are reported as `EngineStartup`; later ones become degraded probes.
    #[error("Stockfish error: {0}")]
    Engine(String),
}

impl From<PgnError> for AnalyzerError {
    fn from(e: PgnError) -> Self {
        match e {
            PgnError::Unparseable(detail) => AnalyzerError::UnparseableGame(detail),
            PgnError::NoGame => AnalyzerError::EmptyGame,
        }
    }
}
