//! Core game analysis logic
//!
//! Replays a decoded game against an engine and measures, for every ply,
//! how much worse the played move was than the engine's preferred move.
//! All scores are taken from the point of view of the side that moved.

use chess_core::{Board, Game};
use shakmaty::Move;
use tracing::{info, warn};

use crate::analysis::{calculate_cp_loss, format_eval, score_for_side, Severity};
use crate::config::EngineConfig;
use crate::engine::{Engine, Probe};
use crate::error::AnalyzerError;
use crate::report::{AnalysisReport, MoveRecord};
use crate::request::AnalysisRequest;
use crate::stockfish::StockfishEngine;

/// Decode the request's game, start Stockfish and analyze every ply.
///
/// The game is decoded before the engine is spawned, so a bad PGN never
/// starts a process. Once started, the engine is shut down on every path.
pub async fn analyze_request(
    request: &AnalysisRequest,
    engine_config: &EngineConfig,
) -> Result<AnalysisReport, AnalyzerError> {
    let game = chess_core::parse_pgn(&request.pgn)?;
    info!(plies = game.len(), depth = request.depth, "Decoded game");

    let mut engine = StockfishEngine::new(engine_config).await?;
    let report = review_and_quit(&mut engine, &game, request.depth).await;

    info!(
        analyzed = report.moves.len(),
        acpl = report.summary.acpl,
        "Analysis complete"
    );
    Ok(report)
}

/// Run the review, then shut the engine down exactly once.
async fn review_and_quit<E: Engine>(engine: &mut E, game: &Game, depth: u32) -> AnalysisReport {
    let report = analyze_game(engine, game, depth).await;
    engine.quit().await;
    report
}

/// Analyze the mainline of `game`.
///
/// Stops at the first move that is illegal in the running position; the
/// plies before it are still reported.
pub async fn analyze_game<E: Engine>(engine: &mut E, game: &Game, depth: u32) -> AnalysisReport {
    let mut board = game.start.clone();
    let mut moves: Vec<MoveRecord> = Vec::with_capacity(game.len());

    for (i, san_plus) in game.mainline().enumerate() {
        let ply = i as u32 + 1;
        let Some(played) = board.resolve_san(&san_plus.san) else {
            warn!(ply, san = %san_plus, "Illegal move, stopping analysis");
            break;
        };
        moves.push(analyze_ply(engine, &mut board, &played, ply, depth).await);
    }

    AnalysisReport::new(moves)
}

/// Evaluate one ply and play `played` on `board`.
async fn analyze_ply<E: Engine>(
    engine: &mut E,
    board: &mut Board,
    played: &Move,
    ply: u32,
    depth: u32,
) -> MoveRecord {
    let mover = board.turn();
    let mut degraded = Vec::new();

    // Engine's choice, evaluated on a scratch copy
    let best = engine.best_move(board, depth).await;
    note_degraded(&mut degraded, ply, "best move", &best);

    let (best_san, best_turn, best_score) = match best {
        Probe::Found(best_mv) => {
            let after_best = board.after(&best_mv);
            let score = engine.evaluate(&after_best, depth).await;
            (Some(board.san(&best_mv)), after_best.turn(), score)
        }
        // No suggestion: the current position stands in for the best line
        Probe::Degraded(_) => (None, board.turn(), engine.evaluate(board, depth).await),
    };
    note_degraded(&mut degraded, ply, "evaluation after best", &best_score);

    let san = board.san(played);
    board.push(played);

    let played_score = engine.evaluate(board, depth).await;
    note_degraded(&mut degraded, ply, "evaluation after played", &played_score);

    let best_for_mover = score_for_side(&best_score, best_turn, mover);
    let played_for_mover = score_for_side(&played_score, board.turn(), mover);
    let delta_cp = calculate_cp_loss(best_for_mover, played_for_mover);

    MoveRecord {
        ply,
        san,
        delta_cp,
        tag: Severity::from_cp_loss(delta_cp),
        eval_after_played: format_eval(&played_score, board.turn()),
        eval_after_best: format_eval(&best_score, best_turn),
        best_move: best_san,
        degraded,
    }
}

fn note_degraded<T>(degraded: &mut Vec<String>, ply: u32, probe: &str, result: &Probe<T>) {
    if let Some(reason) = result.degraded_reason() {
        warn!(ply, probe, reason, "Engine probe degraded");
        degraded.push(format!("{probe}: {reason}"));
    }
}
