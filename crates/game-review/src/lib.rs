//! Centipawn-loss review of a chess game against a UCI engine.
//!
//! - [`request`] decodes the `{ "pgn", "depth" }` envelope
//! - [`analyzer`] replays the game and scores every ply
//! - [`report`] holds the JSON documents written back

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod request;
pub mod stockfish;

pub use analyzer::{analyze_game, analyze_request};
pub use config::{AnalyzerConfig, EngineConfig};
pub use engine::{Engine, Probe, Score};
pub use error::AnalyzerError;
pub use report::{AnalysisReport, ErrorReport, MoveRecord, Summary};
pub use request::AnalysisRequest;
pub use stockfish::StockfishEngine;
