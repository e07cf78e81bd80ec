//! Stockfish engine wrapper using UCI protocol (async I/O)

use std::fmt::Write as _;
use std::io::ErrorKind;

use chess_core::Board;
use shakmaty::Move;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::engine::{Engine, Probe, Score};
use crate::error::AnalyzerError;

/// What one `go depth N` search reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SearchResult {
    /// Last score seen on an `info` line
    score: Option<Score>,
    /// Best move in UCI notation, `None` for `bestmove (none)`
    best_move: Option<String>,
}

/// Stockfish engine instance
pub struct StockfishEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    name: String,
}

impl StockfishEngine {
    /// Spawn a new Stockfish process and initialize UCI
    pub async fn new(config: &EngineConfig) -> Result<Self, AnalyzerError> {
        let mut process = Command::new(&config.path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AnalyzerError::EngineUnavailable {
                    path: config.path.clone(),
                },
                _ => AnalyzerError::EngineStartup(e.to_string()),
            })?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| AnalyzerError::EngineStartup("stdin not captured".into()))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| AnalyzerError::EngineStartup("stdout not captured".into()))?;

        let mut engine = Self {
            process,
            stdin,
            stdout: BufReader::new(stdout),
            name: String::new(),
        };

        engine
            .handshake(config)
            .await
            .map_err(|e| AnalyzerError::EngineStartup(e.to_string()))?;

        info!(engine = %engine.name, path = %config.path, "Engine ready");
        Ok(engine)
    }

    /// Engine name as reported by `id name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    async fn handshake(&mut self, config: &EngineConfig) -> Result<(), AnalyzerError> {
        self.send("uci").await?;
        loop {
            let line = self.read_line().await?;
            if let Some(name) = line.strip_prefix("id name ") {
                self.name = name.trim().to_string();
            } else if line == "uciok" {
                break;
            }
        }

        // Configure for analysis
        self.send(&format!("setoption name Threads value {}", config.threads))
            .await?;
        self.send(&format!("setoption name Hash value {}", config.hash_mb))
            .await?;
        self.send("setoption name UCI_AnalyseMode value true").await?;
        self.send("ucinewgame").await?;
        self.send("isready").await?;
        self.wait_for("readyok").await
    }

    /// Send a command to Stockfish
    async fn send(&mut self, cmd: &str) -> Result<(), AnalyzerError> {
        debug!(cmd, "SF <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| AnalyzerError::Engine(format!("Failed to write to Stockfish: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| AnalyzerError::Engine(format!("Failed to flush stdin: {e}")))?;
        Ok(())
    }

    /// Read one trimmed line. EOF means the engine went away.
    async fn read_line(&mut self) -> Result<String, AnalyzerError> {
        let mut line = String::new();
        let bytes = self
            .stdout
            .read_line(&mut line)
            .await
            .map_err(|e| AnalyzerError::Engine(format!("Failed to read from Stockfish: {e}")))?;
        if bytes == 0 {
            return Err(AnalyzerError::Engine("Stockfish closed its output".into()));
        }
        let trimmed = line.trim();
        debug!(line = trimmed, "SF >");
        Ok(trimmed.to_string())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), AnalyzerError> {
        loop {
            if self.read_line().await? == expected {
                return Ok(());
            }
        }
    }

    /// Search `board` to `depth`, collecting the final score and best move.
    async fn search(&mut self, board: &Board, depth: u32) -> Result<SearchResult, AnalyzerError> {
        self.send(&position_command(board)).await?;
        self.send(&format!("go depth {depth}")).await?;

        let mut result = SearchResult::default();
        loop {
            let line = self.read_line().await?;
            if line.starts_with("info") {
                if let Some(score) = parse_score(&line) {
                    result.score = Some(score);
                }
            } else if let Some(rest) = line.strip_prefix("bestmove") {
                result.best_move = rest
                    .split_whitespace()
                    .next()
                    .filter(|m| *m != "(none)")
                    .map(String::from);
                break;
            }
        }

        Ok(result)
    }
}

impl Engine for StockfishEngine {
    async fn best_move(&mut self, board: &Board, depth: u32) -> Probe<Move> {
        match self.search(board, depth).await {
            Ok(SearchResult {
                best_move: Some(uci),
                ..
            }) => match board.resolve_uci(&uci) {
                Some(mv) => Probe::Found(mv),
                None => Probe::Degraded(format!("engine suggested illegal move {uci}")),
            },
            Ok(_) => Probe::Degraded("engine returned no best move".into()),
            Err(e) => Probe::Degraded(e.to_string()),
        }
    }

    async fn evaluate(&mut self, board: &Board, depth: u32) -> Probe<Score> {
        match self.search(board, depth).await {
            Ok(SearchResult {
                score: Some(score),
                ..
            }) => Probe::Found(score),
            Ok(_) => Probe::Degraded("engine reported no score".into()),
            Err(e) => Probe::Degraded(e.to_string()),
        }
    }

    /// Send quit command and wait for process to exit
    async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl Drop for StockfishEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// `position` command describing `board` from its starting point.
fn position_command(board: &Board) -> String {
    let mut cmd = match board.start_fen() {
        Some(fen) => format!("position fen {fen}"),
        None => "position startpos".to_string(),
    };
    if !board.uci_moves().is_empty() {
        cmd.push_str(" moves");
        for mv in board.uci_moves() {
            let _ = write!(cmd, " {mv}");
        }
    }
    cmd
}

/// Parse `score cp N` / `score mate N` from an info line
fn parse_score(line: &str) -> Option<Score> {
    if line.starts_with("info string") {
        return None;
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    let i = parts.iter().position(|p| *p == "score")?;
    let value: i32 = parts.get(i + 2)?.parse().ok()?;
    match *parts.get(i + 1)? {
        "cp" => Some(Score::Cp(value)),
        "mate" => Some(Score::Mate(value)),
        _ => None,
    }
}
