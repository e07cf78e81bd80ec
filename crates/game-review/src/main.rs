//! Game review CLI
//!
//! Reads `{ "pgn": ..., "depth": ... }` from stdin, analyzes the game with
//! Stockfish and writes one JSON document to stdout. Logs go to stderr.

use std::io::Write;
use std::process::ExitCode;

use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

use game_review::{analyze_request, AnalysisRequest, AnalyzerConfig, AnalyzerError, ErrorReport};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing (stdout is reserved for the result document)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = AnalyzerConfig::load();
    info!(stockfish_path = %config.engine.path, "Config loaded");

    let outcome = match read_request().await {
        Ok(request) => analyze_request(&request, &config.engine).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) => {
            emit(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "Analysis failed");
            emit(&ErrorReport::from(&e))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Read all of stdin and decode the request envelope
async fn read_request() -> Result<AnalysisRequest, AnalyzerError> {
    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .map_err(|e| AnalyzerError::InvalidInput(e.to_string()))?;
    AnalysisRequest::from_json(&raw)
}

/// Write one JSON document to stdout in a single write
fn emit<T: Serialize>(document: &T) -> anyhow::Result<()> {
    let mut json = serde_json::to_string(document)?;
    json.push('\n');
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
