use strsim::{jaro_winkler, normalized_levenshtein};

use crate::shared::config::MatchStrategyKind;

pub const EXACT_SCORE: f64 = 100.0;
pub const CONTAINS_SCORE: f64 = 80.0;
pub const TOKEN_OVERLAP_WEIGHT: f64 = 60.0;

/// Strategy for scoring a source header against one synonym
///
/// Returns a value between 0.0 (unrelated) and 100.0 (identical).
pub trait SimilarityStrategy: Send + Sync {
    fn score(&self, header: &str, synonym: &str) -> f64;

    /// Get the name of this strategy for logging/debugging
    fn name(&self) -> &'static str;
}

pub fn strategy_for(kind: MatchStrategyKind) -> Box<dyn SimilarityStrategy> {
    match kind {
        MatchStrategyKind::Synonym => Box::new(SynonymOverlapStrategy),
        MatchStrategyKind::Hybrid => Box::new(HybridStrategy::default_hybrid()),
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Exact match 100, containment 80, otherwise shared whitespace tokens scaled to 60
#[derive(Debug, Clone, Copy, Default)]
pub struct SynonymOverlapStrategy;

impl SimilarityStrategy for SynonymOverlapStrategy {
    fn score(&self, header: &str, synonym: &str) -> f64 {
        let header = normalize(header);
        let synonym = normalize(synonym);
        if header.is_empty() || synonym.is_empty() {
            return 0.0;
        }
        if header == synonym {
            return EXACT_SCORE;
        }
        if header.contains(&synonym) || synonym.contains(&header) {
            return CONTAINS_SCORE;
        }

        let header_tokens: Vec<&str> = header.split_whitespace().collect();
        let synonym_tokens: Vec<&str> = synonym.split_whitespace().collect();
        let common = header_tokens
            .iter()
            .filter(|token| synonym_tokens.contains(token))
            .count();
        if common == 0 {
            return 0.0;
        }
        let longest = header_tokens.len().max(synonym_tokens.len());
        common as f64 / longest as f64 * TOKEN_OVERLAP_WEIGHT
    }

    fn name(&self) -> &'static str {
        "SynonymOverlap"
    }
}

/// Jaro-Winkler similarity strategy
///
/// Gives more weight to matching prefixes, which suits short column names.
#[derive(Debug, Clone)]
pub struct JaroWinklerStrategy;

impl SimilarityStrategy for JaroWinklerStrategy {
    fn score(&self, header: &str, synonym: &str) -> f64 {
        jaro_winkler(&normalize(header), &normalize(synonym)) * EXACT_SCORE
    }

    fn name(&self) -> &'static str {
        "JaroWinkler"
    }
}

/// Normalized Levenshtein similarity strategy
///
/// Good for detecting typos and character-level differences.
#[derive(Debug, Clone)]
pub struct LevenshteinStrategy;

impl SimilarityStrategy for LevenshteinStrategy {
    fn score(&self, header: &str, synonym: &str) -> f64 {
        normalized_levenshtein(&normalize(header), &normalize(synonym)) * EXACT_SCORE
    }

    fn name(&self) -> &'static str {
        "Levenshtein"
    }
}

/// Weighted blend of character-level strategies
///
/// An exact case-insensitive match always scores the full 100 so it can never
/// lose to a fuzzy neighbour.
pub struct HybridStrategy {
    strategies: Vec<(Box<dyn SimilarityStrategy>, f64)>,
}

impl HybridStrategy {
    /// # Panics
    /// Panics if weights don't sum to approximately 1.0
    pub fn new(strategies: Vec<(Box<dyn SimilarityStrategy>, f64)>) -> Self {
        let weight_sum: f64 = strategies.iter().map(|(_, w)| w).sum();
        assert!(
            (weight_sum - 1.0).abs() < 0.01,
            "Strategy weights must sum to 1.0, got {}",
            weight_sum
        );
        Self { strategies }
    }

    /// Jaro-Winkler (70%) + Levenshtein (30%)
    pub fn default_hybrid() -> Self {
        Self::new(vec![
            (Box::new(JaroWinklerStrategy), 0.7),
            (Box::new(LevenshteinStrategy), 0.3),
        ])
    }
}

impl SimilarityStrategy for HybridStrategy {
    fn score(&self, header: &str, synonym: &str) -> f64 {
        let (header, synonym) = (normalize(header), normalize(synonym));
        if header.is_empty() || synonym.is_empty() {
            return 0.0;
        }
        if header == synonym {
            return EXACT_SCORE;
        }
        let blended: f64 = self
            .strategies
            .iter()
            .map(|(strategy, weight)| strategy.score(&header, &synonym) * weight)
            .sum();
        // Keep fuzzy scores strictly below an exact hit
        blended.min(EXACT_SCORE - 1.0)
    }

    fn name(&self) -> &'static str {
        "Hybrid"
    }
}
