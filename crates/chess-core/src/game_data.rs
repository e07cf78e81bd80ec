use shakmaty::san::SanPlus;

use crate::board::Board;

/// A decoded game: where it starts and the mainline moves, unresolved.
#[derive(Debug, Clone)]
pub struct Game {
    pub start: Board,
    pub moves: Vec<SanPlus>,
}

impl Game {
    /// Mainline moves in order. Each call starts again from the first move.
    pub fn mainline(&self) -> impl Iterator<Item = &SanPlus> + '_ {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
