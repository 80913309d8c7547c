//! Persisted best score.

use log::{info, warn};

use crate::kv::KeyValueStore;
use crate::StoreError;

pub const HIGH_SCORE_KEY: &str = "typing-game-high-score";

/// Stored high score; absent or malformed values read as zero.
pub fn load(kv: &dyn KeyValueStore) -> u32 {
    let Some(raw) = kv.get(HIGH_SCORE_KEY) else {
        return 0;
    };
    match raw.trim().parse::<u32>() {
        Ok(v) => v,
        Err(err) => {
            warn!("ignoring malformed {HIGH_SCORE_KEY} {raw:?}: {err}");
            0
        }
    }
}

/// Store `score` if it beats the stored value. Returns whether it did.
pub fn record(kv: &mut dyn KeyValueStore, score: u32) -> Result<bool, StoreError> {
    if score <= load(kv) {
        return Ok(false);
    }
    kv.set(HIGH_SCORE_KEY, &score.to_string())?;
    info!("new high score {score}");
    Ok(true)
}
