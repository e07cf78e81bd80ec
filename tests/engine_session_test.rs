//! Drives `StockfishEngine` against a scripted UCI responder.
#![cfg(unix)]

mod common;

use chess_core::Board;
use game_review::{AnalyzerError, Engine, EngineConfig, Probe, Score, StockfishEngine};

#[tokio::test]
async fn test_handshake_reads_engine_name() {
    let mut engine = StockfishEngine::new(&common::fake_engine()).await.unwrap();
    assert_eq!(engine.name(), "FakeFish 1.0");
    engine.quit().await;
}

#[tokio::test]
async fn test_best_move_and_last_reported_score() {
    let mut engine = StockfishEngine::new(&common::fake_engine()).await.unwrap();
    let board = Board::new();

    match engine.best_move(&board, 10).await {
        Probe::Found(mv) => assert_eq!(board.san(&mv), "e4"),
        Probe::Degraded(reason) => panic!("unexpected degraded probe: {reason}"),
    }
    // The deeper info line wins over the earlier one
    assert_eq!(engine.evaluate(&board, 10).await, Probe::Found(Score::Cp(30)));

    let e4 = board.resolve_uci("e2e4").unwrap();
    let after = board.after(&e4);
    assert_eq!(engine.evaluate(&after, 10).await, Probe::Found(Score::Cp(-30)));

    engine.quit().await;
}

#[tokio::test]
async fn test_no_best_move_is_degraded() {
    let mut engine = StockfishEngine::new(&common::fake_engine()).await.unwrap();
    let mut board = Board::new();
    let d4 = board.resolve_uci("d2d4").unwrap();
    board.push(&d4);

    assert_eq!(
        engine.best_move(&board, 10).await,
        Probe::Degraded("engine returned no best move".to_string())
    );
    assert_eq!(engine.evaluate(&board, 10).await, Probe::Found(Score::Cp(0)));

    engine.quit().await;
}

#[tokio::test]
async fn test_calls_after_quit_are_degraded() {
    let mut engine = StockfishEngine::new(&common::fake_engine()).await.unwrap();
    engine.quit().await;

    let probe = engine.evaluate(&Board::new(), 10).await;
    assert!(probe.degraded_reason().is_some(), "got {probe:?}");
}

#[tokio::test]
async fn test_engine_exiting_during_handshake() {
    let config = EngineConfig::with_path(common::fixture("silent-engine.sh").to_string_lossy());
    match StockfishEngine::new(&config).await {
        Err(AnalyzerError::EngineStartup(_)) => {}
        Err(e) => panic!("expected EngineStartup, got {e}"),
        Ok(_) => panic!("expected EngineStartup"),
    }
}
