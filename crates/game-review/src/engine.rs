//! Engine abstraction used by the evaluation loop.

use chess_core::Board;
use shakmaty::Move;

/// Engine score, relative to the side to move in the evaluated position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawns (positive = side to move is better)
    Cp(i32),
    /// Mate in N (positive = side to move mates, zero or negative = side to
    /// move gets mated)
    Mate(i32),
}

/// Outcome of a single engine call.
///
/// Engine calls inside the evaluation loop never abort the run: a failure
/// becomes `Degraded` with the reason, and the caller substitutes a neutral
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Found(T),
    Degraded(String),
}

impl<T> Probe<T> {
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Probe::Found(_) => None,
            Probe::Degraded(reason) => Some(reason),
        }
    }
}

/// A chess engine that can be asked for its preferred move and for an
/// evaluation, both limited to a search depth.
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// The engine's preferred move in `board`. Must be legal in `board`.
    async fn best_move(&mut self, board: &Board, depth: u32) -> Probe<Move>;

    /// Evaluation of `board` from its side to move.
    async fn evaluate(&mut self, board: &Board, depth: u32) -> Probe<Score>;

    /// Shut the engine down.
    async fn quit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_degraded_reason() {
        let found: Probe<Score> = Probe::Found(Score::Cp(12));
        assert_eq!(found.degraded_reason(), None);

        let degraded: Probe<Score> = Probe::Degraded("engine closed".into());
        assert_eq!(degraded.degraded_reason(), Some("engine closed"));
    }
}
