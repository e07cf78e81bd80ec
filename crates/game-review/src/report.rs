//! JSON output documents

use serde::Serialize;

use crate::analysis::{calculate_acpl, Severity};
use crate::error::AnalyzerError;

/// One analyzed ply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    /// 1-based half-move number
    pub ply: u32,
    pub san: String,
    pub delta_cp: i32,
    pub tag: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_after_played: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_after_best: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_move: Option<String>,
    /// Engine calls that failed on this ply, with reasons
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub inaccuracies: u32,
    pub mistakes: u32,
    pub blunders: u32,
    pub acpl: f64,
}

impl Summary {
    pub fn from_moves(moves: &[MoveRecord]) -> Self {
        let mut summary = Summary::default();
        let mut total_cp_loss: i64 = 0;

        for record in moves {
            total_cp_loss += i64::from(record.delta_cp);
            match record.tag {
                Severity::Inaccuracy => summary.inaccuracies += 1,
                Severity::Mistake => summary.mistakes += 1,
                Severity::Blunder => summary.blunders += 1,
                Severity::Ok => {}
            }
        }

        summary.acpl = calculate_acpl(total_cp_loss, moves.len() as u32);
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub moves: Vec<MoveRecord>,
}

impl AnalysisReport {
    pub fn new(moves: Vec<MoveRecord>) -> Self {
        Self {
            summary: Summary::from_moves(&moves),
            moves,
        }
    }
}

/// Failure payload: `{"error": ..., "detail": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&AnalyzerError> for ErrorReport {
    fn from(e: &AnalyzerError) -> Self {
        let (error, detail) = match e {
            AnalyzerError::InvalidInput(detail) => ("Invalid input JSON".to_string(), Some(detail)),
            AnalyzerError::UnparseableGame(detail) => {
                ("Could not parse PGN".to_string(), Some(detail))
            }
            AnalyzerError::EmptyGame => ("No game in PGN".to_string(), None),
            AnalyzerError::EngineUnavailable { path } => {
                (format!("Stockfish not found at {path}"), None)
            }
            AnalyzerError::EngineStartup(detail) => {
                ("Failed to start Stockfish".to_string(), Some(detail))
            }
            // Only raised inside a running session
            AnalyzerError::Engine(detail) => ("Stockfish error".to_string(), Some(detail)),
        };
        Self {
            error,
            detail: detail.cloned(),
        }
    }
}
