//! Decoding of the stdin request envelope

use serde_json::Value;

use crate::error::AnalyzerError;

pub const DEFAULT_DEPTH: u32 = 15;

/// One analysis job: a PGN game record and the engine search depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub pgn: String,
    pub depth: u32,
}

impl AnalysisRequest {
    /// Parse `{ "pgn": ..., "depth": ... }`. Missing fields take their
    /// defaults (`""` and 15).
    pub fn from_json(raw: &str) -> Result<Self, AnalyzerError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| AnalyzerError::InvalidInput(e.to_string()))?;

        let object = value.as_object().ok_or_else(|| {
            AnalyzerError::InvalidInput("expected a JSON object".to_string())
        })?;

        let pgn = match object.get("pgn") {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(AnalyzerError::InvalidInput(format!(
                    "pgn must be a string, got {other}"
                )))
            }
        };

        let depth = match object.get("depth") {
            None => DEFAULT_DEPTH,
            Some(v) => coerce_depth(v).map_err(AnalyzerError::InvalidInput)?,
        };

        Ok(Self { pgn, depth })
    }
}

/// Accept integers, floats (truncated), numeric strings and booleans.
fn coerce_depth(value: &Value) -> Result<u32, String> {
    let depth: i64 = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                if !f.is_finite() || f.abs() > i64::MAX as f64 {
                    return Err(format!("depth out of range: {n}"));
                }
                f.trunc() as i64
            } else {
                return Err(format!("depth out of range: {n}"));
            }
        }
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| format!("depth is not an integer: {s:?}"))?,
        Value::Bool(b) => i64::from(*b),
        other => return Err(format!("depth must be an integer, got {other}")),
    };

    if depth < 1 {
        return Err(format!("depth must be at least 1, got {depth}"));
    }
    u32::try_from(depth).map_err(|_| format!("depth out of range: {depth}"))
}
