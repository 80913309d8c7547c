//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::store::PremiumPlan;
use crate::types::FRAME_MS;

/// Smallest accepted frame period.
pub const MIN_FRAME_MS: u32 = 4;

/// Largest accepted frame period.
pub const MAX_FRAME_MS: u32 = 100;

const APP_DIR: &str = "typing-rain";

/// Entitlement change requested at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumRequest {
    Activate(PremiumPlan),
    Revoke,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Holds `storage.json` and the log file.
    pub data_dir: PathBuf,
    pub frame_ms: u32,
    /// Fixed RNG seed; time-derived when unset.
    pub seed: Option<u32>,
    /// `env_logger` filter directive.
    pub log_filter: String,
    /// Force every sound cue off regardless of the stored options.
    pub mute: bool,
    pub premium: Option<PremiumRequest>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".").join(format!(".{APP_DIR}")),
            frame_ms: FRAME_MS,
            seed: None,
            log_filter: "info".to_string(),
            mute: false,
            premium: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TYPING_RAIN_DATA_DIR` | see below |
    /// | `TYPING_RAIN_FRAME_MS` | 16 (4..=100) |
    /// | `TYPING_RAIN_SEED` | time-derived |
    /// | `TYPING_RAIN_LOG` | `info` |
    /// | `TYPING_RAIN_NO_SOUND` | unset |
    /// | `TYPING_RAIN_PREMIUM` | unset (`month`, `year`, `lifetime`, `off`) |
    ///
    /// The data directory falls back to `$XDG_DATA_HOME/typing-rain`, then
    /// `$HOME/.local/share/typing-rain`, then `./.typing-rain`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = var("TYPING_RAIN_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| var("XDG_DATA_HOME").map(|d| PathBuf::from(d).join(APP_DIR)))
            .or_else(|| {
                var("HOME").map(|h| PathBuf::from(h).join(".local").join("share").join(APP_DIR))
            })
            .unwrap_or_else(|| AppConfig::default().data_dir);

        let frame_ms = var("TYPING_RAIN_FRAME_MS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(FRAME_MS)
            .clamp(MIN_FRAME_MS, MAX_FRAME_MS);

        let seed = var("TYPING_RAIN_SEED").and_then(|s| s.parse().ok());

        let log_filter = var("TYPING_RAIN_LOG").unwrap_or_else(|| "info".to_string());

        let mute = var("TYPING_RAIN_NO_SOUND").is_some_and(|s| s != "0" && s != "false");

        let premium = var("TYPING_RAIN_PREMIUM").and_then(|s| match s.as_str() {
            "off" | "none" => Some(PremiumRequest::Revoke),
            plan => plan.parse().ok().map(PremiumRequest::Activate),
        });

        Self {
            data_dir,
            frame_ms,
            seed,
            log_filter,
            mute,
            premium,
        }
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms as u64)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(format!("{APP_DIR}.log"))
    }

    /// Configured seed, or one derived from the current time.
    pub fn seed_or_time(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
