//! Word catalog - static word lists bucketed by difficulty tier.

use crate::rng::SimpleRng;

/// Word list bucket selected by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
            Tier::Expert => "expert",
        }
    }

    pub fn words(self) -> &'static [&'static str] {
        match self {
            Tier::Easy => EASY,
            Tier::Medium => MEDIUM,
            Tier::Hard => HARD,
            Tier::Expert => EXPERT,
        }
    }
}

pub const EASY: &[&str] = &[
    "chat", "code", "jeu", "type", "web", "app", "dev", "bug", "fix", "run", "test", "loop",
    "data", "file", "save", "load", "menu", "play", "stop", "go", "fast", "slow", "new", "old",
    "big", "tiny", "fun", "cool", "hot", "ice",
];

pub const MEDIUM: &[&str] = &[
    "fonction", "variable", "boucle", "condition", "tableau", "objet", "classe", "methode",
    "propriete", "evenement", "callback", "promise", "async", "await", "component", "interface",
    "typescript", "javascript", "react", "framework", "library", "package", "module", "import",
    "export", "default", "const", "let",
];

pub const HARD: &[&str] = &[
    "asynchrone", "synchronisation", "architecture", "algorithmique", "optimisation",
    "performance", "refactorisation", "encapsulation", "polymorphisme", "abstraction",
    "inheritance", "composition", "delegation", "authentication", "authorization", "middleware",
    "interceptor", "decorator", "observable", "subscription",
];

pub const EXPERT: &[&str] = &[
    "microservices", "containerisation", "orchestration", "kubernetes", "deployment",
    "infrastructure", "scalability", "availability", "consistency", "partitioning",
    "replication", "sharding", "caching", "optimization", "preprocessing", "postprocessing",
    "serialization", "deserialization", "transformation",
];

/// Tier a level draws its words from.
pub fn tier_for_level(level: u32) -> Tier {
    match level {
        0..=2 => Tier::Easy,
        3..=5 => Tier::Medium,
        6..=8 => Tier::Hard,
        _ => Tier::Expert,
    }
}

/// Word list for a level.
pub fn words_for_level(level: u32) -> &'static [&'static str] {
    tier_for_level(level).words()
}

/// Uniformly random word for a level.
pub fn random_word(level: u32, rng: &mut SimpleRng) -> &'static str {
    let words = words_for_level(level);
    // Every tier list is non-empty.
    rng.pick(words).copied().unwrap_or(EASY[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier_for_level(1), Tier::Easy);
        assert_eq!(tier_for_level(2), Tier::Easy);
        assert_eq!(tier_for_level(3), Tier::Medium);
        assert_eq!(tier_for_level(5), Tier::Medium);
        assert_eq!(tier_for_level(6), Tier::Hard);
        assert_eq!(tier_for_level(8), Tier::Hard);
        assert_eq!(tier_for_level(9), Tier::Expert);
        assert_eq!(tier_for_level(500), Tier::Expert);
    }

    #[test]
    fn test_words_for_level_is_total() {
        for level in 0..50 {
            assert!(!words_for_level(level).is_empty());
        }
    }

    #[test]
    fn test_random_word_comes_from_level_list() {
        let mut rng = SimpleRng::new(2024);
        for level in [1, 4, 7, 12] {
            for _ in 0..50 {
                let w = random_word(level, &mut rng);
                assert!(words_for_level(level).contains(&w), "{w} not in level {level}");
            }
        }
    }

    #[test]
    fn test_catalog_words_fit_input_buffer() {
        for tier in [Tier::Easy, Tier::Medium, Tier::Hard, Tier::Expert] {
            for w in tier.words() {
                assert!(w.len() <= typing_rain_types::MAX_INPUT_LEN);
                assert!(w.is_ascii());
            }
        }
    }
}
