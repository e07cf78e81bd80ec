//! Board state carried through a game replay.
//!
//! Wraps a shakmaty position together with the move history needed to
//! describe it to a UCI engine (`position startpos moves ...`).

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, Move, Position};

use crate::pgn::PgnError;

#[derive(Debug, Clone, Default)]
pub struct Board {
    pos: Chess,
    /// Set when the game did not start from the standard position.
    start_fen: Option<String>,
    moves: Vec<UciMove>,
}

impl Board {
    /// Board at the standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Board set up from a FEN string (e.g. a PGN `[FEN]` tag).
    pub fn from_fen(fen: &str) -> Result<Self, PgnError> {
        let fen = fen.trim();
        let parsed: Fen = fen
            .parse()
            .map_err(|e| PgnError::Unparseable(format!("invalid FEN '{fen}': {e}")))?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| PgnError::Unparseable(format!("illegal FEN position '{fen}': {e}")))?;

        Ok(Self {
            pos,
            start_fen: Some(fen.to_string()),
            moves: Vec::new(),
        })
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    pub fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }

    /// Moves played since the starting position, in UCI notation.
    pub fn uci_moves(&self) -> &[UciMove] {
        &self.moves
    }

    /// Resolve a SAN move against the current position. `None` if illegal.
    pub fn resolve_san(&self, san: &San) -> Option<Move> {
        san.to_move(&self.pos).ok()
    }

    /// Resolve a UCI move string (as printed by an engine). `None` if
    /// unparseable or illegal.
    pub fn resolve_uci(&self, uci: &str) -> Option<Move> {
        let uci: UciMove = uci.parse().ok()?;
        uci.to_move(&self.pos).ok()
    }

    /// Render a legal move in SAN, including the `+`/`#` suffix.
    pub fn san(&self, mv: &Move) -> String {
        SanPlus::from_move(self.pos.clone(), mv.clone()).to_string()
    }

    /// Play a move on this board. The move must be legal here; use
    /// [`Board::resolve_san`] or [`Board::resolve_uci`] to obtain one.
    pub fn push(&mut self, mv: &Move) {
        self.moves.push(mv.to_uci(CastlingMode::Standard));
        self.pos.play_unchecked(mv.clone());
    }

    /// Copy of this board with `mv` played on it.
    pub fn after(&self, mv: &Move) -> Board {
        let mut next = self.clone();
        next.push(mv);
        next
    }
}
