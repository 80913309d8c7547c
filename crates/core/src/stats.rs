//! Session statistics.

/// Statistics shown on the HUD and the menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameStats {
    pub total_words_typed: u32,
    /// Percentage of keystrokes that kept the buffer on a live word.
    pub accuracy: u32,
    pub wpm: u32,
    pub time_elapsed_secs: f64,
    pub high_score: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            total_words_typed: 0,
            accuracy: 100,
            wpm: 0,
            time_elapsed_secs: 0.0,
            high_score: 0,
        }
    }
}

impl GameStats {
    /// Elapsed time as whole `(minutes, seconds)`.
    pub fn clock(&self) -> (u64, u64) {
        let secs = self.time_elapsed_secs.max(0.0) as u64;
        (secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accuracy_is_perfect() {
        assert_eq!(GameStats::default().accuracy, 100);
    }

    #[test]
    fn test_clock() {
        let stats = GameStats {
            time_elapsed_secs: 125.9,
            ..GameStats::default()
        };
        assert_eq!(stats.clock(), (2, 5));
    }
}
