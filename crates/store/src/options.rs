//! Persisted player options.

use log::warn;

use crate::kv::KeyValueStore;
use crate::types::GameOptions;
use crate::StoreError;

pub const OPTIONS_KEY: &str = "typing-game-options";

/// Load options. Absent or malformed records yield the defaults.
pub fn load(kv: &dyn KeyValueStore) -> GameOptions {
    let Some(raw) = kv.get(OPTIONS_KEY) else {
        return GameOptions::default();
    };
    match serde_json::from_str::<GameOptions>(&raw) {
        Ok(opts) => opts.sanitized(),
        Err(err) => {
            warn!("ignoring malformed {OPTIONS_KEY}: {err}");
            GameOptions::default()
        }
    }
}

pub fn save(kv: &mut dyn KeyValueStore, options: &GameOptions) -> Result<(), StoreError> {
    let raw = serde_json::to_string(options).map_err(|source| StoreError::Encode {
        key: OPTIONS_KEY,
        source,
    })?;
    kv.set(OPTIONS_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::types::Difficulty;

    #[test]
    fn test_absent_options_are_default() {
        let kv = MemoryStore::new();
        assert_eq!(load(&kv), GameOptions::default());
    }

    #[test]
    fn test_roundtrip() {
        let mut kv = MemoryStore::new();
        let opts = GameOptions {
            sound_volume: 30,
            sound_enabled: false,
            difficulty: Difficulty::Easy,
            show_typed_text: false,
            particle_effects: false,
            word_preview: true,
        };
        save(&mut kv, &opts).unwrap();
        assert_eq!(load(&kv), opts);
    }

    #[test]
    fn test_malformed_options_fall_back() {
        let mut kv = MemoryStore::new();
        kv.set(OPTIONS_KEY, "{\"difficulty\": 42").unwrap();
        assert_eq!(load(&kv), GameOptions::default());

        kv.set(OPTIONS_KEY, "{\"difficulty\": \"nightmare\"}").unwrap();
        assert_eq!(load(&kv), GameOptions::default());
    }

    #[test]
    fn test_legacy_record_is_accepted() {
        let mut kv = MemoryStore::new();
        kv.set(
            OPTIONS_KEY,
            concat!(
                r#"{"soundVolume":70,"soundEnabled":true,"difficulty":"facile","#,
                r#""showTypedText":true,"particleEffects":false,"wordPreview":false}"#,
            ),
        )
        .unwrap();
        let opts = load(&kv);
        assert_eq!(opts.difficulty, Difficulty::Easy);
        assert!(!opts.particle_effects);
    }

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        let mut kv = MemoryStore::new();
        kv.set(OPTIONS_KEY, r#"{"soundVolume":250}"#).unwrap();
        assert_eq!(load(&kv).sound_volume, 100);
    }
}
