//! Server configuration (command line, with environment fallbacks).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "sentiment-web", about = "Sentiment playground server", version)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "SENTIMENT_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// JSON file holding the earned badges.
    #[arg(long, env = "SENTIMENT_BADGES_FILE", default_value = "sentiment_badges.json")]
    pub badges_file: PathBuf,

    /// Keep badges in memory only.
    #[arg(long, env = "SENTIMENT_EPHEMERAL")]
    pub ephemeral: bool,

    /// Pause between streamed analysis events, in milliseconds.
    #[arg(long, env = "SENTIMENT_EVENT_DELAY_MS", default_value_t = 35)]
    pub event_delay_ms: u64,

    /// Directory served under `/static`.
    #[arg(long, env = "SENTIMENT_STATIC_DIR", default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/static"))]
    pub static_dir: PathBuf,
}

impl Config {
    pub fn event_delay(&self) -> Duration {
        Duration::from_millis(self.event_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["sentiment-web"]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.event_delay(), Duration::from_millis(35));
        assert!(!config.ephemeral);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "sentiment-web",
            "--addr",
            "127.0.0.1:8080",
            "--ephemeral",
            "--event-delay-ms",
            "0",
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert!(config.ephemeral);
        assert_eq!(config.event_delay(), Duration::ZERO);
    }
}
