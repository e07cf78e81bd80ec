//! PGN decoding: first game of the input, mainline only.

use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use thiserror::Error;

use crate::board::Board;
use crate::game_data::Game;

/// Variant tag values that still mean standard chess rules.
const STANDARD_VARIANTS: [&str; 3] = ["standard", "chess", "from position"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("Could not parse PGN: {0}")]
    Unparseable(String),

    #[error("No game in PGN")]
    NoGame,
}

/// Tags that influence how the movetext is replayed.
#[derive(Default)]
struct GameTags {
    fen: Option<String>,
    variant: Option<String>,
}

/// Collects the mainline of a single game.
struct MainlineCollector;

impl Visitor for MainlineCollector {
    type Tags = GameTags;
    type Movetext = Game;
    type Output = Result<Game, PgnError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, GameTags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(
        &mut self,
        tags: &mut GameTags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        match name {
            b"FEN" => tags.fen = Some(value.decode_utf8_lossy().into_owned()),
            b"Variant" => tags.variant = Some(value.decode_utf8_lossy().into_owned()),
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameTags) -> ControlFlow<Self::Output, Game> {
        if let Some(variant) = tags.variant {
            let normalized = variant.trim().to_ascii_lowercase();
            if !normalized.is_empty() && !STANDARD_VARIANTS.contains(&normalized.as_str()) {
                return ControlFlow::Break(Err(PgnError::Unparseable(format!(
                    "unsupported variant: {variant}"
                ))));
            }
        }

        let start = match tags.fen {
            Some(fen) => match Board::from_fen(&fen) {
                Ok(board) => board,
                Err(e) => return ControlFlow::Break(Err(e)),
            },
            None => Board::new(),
        };

        ControlFlow::Continue(Game {
            start,
            moves: Vec::new(),
        })
    }

    fn san(&mut self, game: &mut Game, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        game.moves.push(san_plus);
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _game: &mut Game) -> ControlFlow<Self::Output, Skip> {
        // Side lines never reach the mainline
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, game: Game) -> Self::Output {
        Ok(game)
    }
}

/// Decode the first game found in `pgn`.
///
/// Tag pairs other than `FEN` and `Variant` are ignored, as are comments,
/// NAGs and variations. Moves are returned as written; legality is checked
/// when they are replayed.
///
/// Movetext tokens that are not valid SAN are dropped by the reader without
/// a callback, so a garbled move shifts the remaining moves by one ply.
/// Replay stops at the first move that is then illegal for the side to move.
pub fn parse_pgn(pgn: &str) -> Result<Game, PgnError> {
    let mut reader = Reader::new(pgn.as_bytes());
    reader
        .read_game(&mut MainlineCollector)
        .map_err(|e| PgnError::Unparseable(e.to_string()))?
        .ok_or(PgnError::NoGame)?
}
