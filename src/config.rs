use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::data::{DEFAULT_API_URL, DEFAULT_QUESTION_COUNT};

/// Terminal trivia: climb the prize ladder one question at a time.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Settings {
    /// Number of questions per game
    #[arg(short = 'n', long, env = "QUIZ_QUESTION_COUNT", default_value_t = DEFAULT_QUESTION_COUNT)]
    pub count: usize,

    /// Trivia API endpoint
    #[arg(long, env = "QUIZ_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// How long the answer stays revealed, in milliseconds
    #[arg(long, env = "QUIZ_REVEAL_MS", default_value_t = 2000)]
    pub reveal_ms: u64,

    /// Give up on the trivia API after this many seconds
    #[arg(long, env = "QUIZ_FETCH_TIMEOUT")]
    pub fetch_timeout: Option<u64>,

    /// Write diagnostics to this file (filtered by RUST_LOG)
    #[arg(long, env = "QUIZ_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout.map(Duration::from_secs)
    }
}
