//! Aggregate ecosystem health scoring.

use serde::Serialize;

use super::organism::Organism;

/// Lowest possible biome health.
pub const MIN_BIOME_HEALTH: f32 = 10.0;
/// Highest possible biome health.
pub const MAX_BIOME_HEALTH: f32 = 100.0;

/// Head count per trophic level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrophicCounts {
    /// Number of producers.
    pub producers: usize,
    /// Number of herbivores and predators.
    pub consumers: usize,
    /// Number of decomposers.
    pub decomposers: usize,
}

impl TrophicCounts {
    /// Counts the trophic levels of `organisms`.
    pub fn of(organisms: &[Organism]) -> Self {
        organisms.iter().fold(Self::default(), |mut counts, org| {
            if org.species.is_producer() {
                counts.producers += 1;
            } else if org.species.is_consumer() {
                counts.consumers += 1;
            } else if org.species.is_decomposer() {
                counts.decomposers += 1;
            }
            counts
        })
    }
}

/// Trophic balance score.
///
/// 25 points for each level present, then 25 more when producers outnumber
/// consumers at least two to one, or 25 fewer when consumers outnumber
/// producers. Anything in between is neutral.
pub fn balance_score(counts: TrophicCounts) -> f32 {
    let mut score = 0.0;

    if counts.producers > 0 {
        score += 25.0;
    }
    if counts.consumers > 0 {
        score += 25.0;
    }
    if counts.decomposers > 0 {
        score += 25.0;
    }

    if counts.producers >= counts.consumers * 2 {
        score += 25.0;
    } else if counts.consumers > counts.producers {
        score -= 25.0;
    }

    score
}

/// Mean health of `organisms`, 0 for an empty population.
pub fn average_health(organisms: &[Organism]) -> f32 {
    if organisms.is_empty() {
        return 0.0;
    }
    organisms.iter().map(|org| org.health).sum::<f32>() / organisms.len() as f32
}

/// Overall biome health in `[10, 100]`.
pub fn biome_health(organisms: &[Organism]) -> f32 {
    let score = 0.4 * average_health(organisms) + 0.6 * balance_score(TrophicCounts::of(organisms));
    score.clamp(MIN_BIOME_HEALTH, MAX_BIOME_HEALTH)
}
