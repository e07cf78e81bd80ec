use std::path::PathBuf;

use game_review::EngineConfig;

/// Path to a script under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Engine config pointing at the scripted UCI responder.
pub fn fake_engine() -> EngineConfig {
    EngineConfig::with_path(fixture("fake-stockfish.sh").to_string_lossy())
}
