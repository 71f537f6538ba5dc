//! Follow-suggestion ranking strategies.

use pictor_db::entities::user;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Orders follow-suggestion candidates.
///
/// The candidate set (everyone the viewer does not already follow, minus the
/// viewer) is fixed by the follow service; implementations only decide the
/// order in which candidates are offered.
pub trait SuggestionRanking: Send + Sync {
    /// Rank candidates, best suggestion first.
    fn rank(&self, candidates: Vec<user::Model>) -> Vec<user::Model>;
}

/// Newest accounts first. Candidates arrive in descending ID order (ULIDs
/// are time-ordered), so this ranking keeps them as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecencyRanking;

impl SuggestionRanking for RecencyRanking {
    fn rank(&self, candidates: Vec<user::Model>) -> Vec<user::Model> {
        candidates
    }
}

/// Uniformly shuffled candidates. A fixed seed gives a deterministic order,
/// which the tests rely on.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShuffleRanking {
    seed: Option<u64>,
}

impl ShuffleRanking {
    /// Create a shuffle ranking seeded from entropy.
    #[must_use]
    pub const fn new() -> Self {
        Self { seed: None }
    }

    /// Create a shuffle ranking with a fixed seed.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl SuggestionRanking for ShuffleRanking {
    fn rank(&self, mut candidates: Vec<user::Model>) -> Vec<user::Model> {
        let mut rng = self
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        candidates.shuffle(&mut rng);
        candidates
    }
}
