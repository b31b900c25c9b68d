//! Mate selection, mating chance and offspring synthesis.
//!
//! These are pure functions of their inputs; randomness is passed in as an
//! explicit RNG so callers control reproducibility.

use rand::Rng;

use super::geometric_utils::Position;
use super::organism::{Organism, OrganismId};
use super::params::Params;

/// Whether `a` and `b` may mate: same species, both healthy and close enough.
///
/// The relation is symmetric.
pub fn eligible(a: &Organism, b: &Organism, params: &Params) -> bool {
    a.species == b.species
        && a.health >= params.mating_health
        && b.health >= params.mating_health
        && a.distance_to(b) <= params.mate_radius
}

/// Per-tick probability that `a` and `b` produce offspring.
///
/// # Arguments
///
/// * `environment_factor` - Breeding suitability of the environment, 0 to 1
pub fn chance(a: &Organism, b: &Organism, environment_factor: f32, params: &Params) -> f32 {
    let health_factor = ((a.health + b.health) / 2.0) / 100.0;
    params.base_reproduction_chance
        * health_factor
        * environment_factor
        * a.species.breeding_class().multiplier()
}

/// Resolves one mating draw.
///
/// `draw` is a uniform sample in `[0, 1)`; the attempt succeeds when it falls
/// under the chance scaled by simulation speed.
pub fn succeeds(chance: f32, simulation_speed: f32, draw: f32) -> bool {
    draw < chance * (simulation_speed / 5.0)
}

/// Creates a stage-0 offspring of `a` and `b`.
///
/// The newborn appears near its parents' midpoint and inherits a randomised
/// share of their adaptation plus a bonus for their evolutionary stages.
pub fn offspring<R: Rng + ?Sized>(
    a: &Organism,
    b: &Organism,
    id: OrganismId,
    now: f64,
    params: &Params,
    rng: &mut R,
) -> Organism {
    let midpoint = a.position.midpoint(&b.position);
    let jitter = params.offspring_jitter;
    let position = Position::new(
        midpoint.x + jitter_sample(rng, jitter),
        midpoint.y + jitter_sample(rng, jitter),
    )
    .clamped(5.0, 95.0);

    let inheritance =
        (a.adaptation_points + b.adaptation_points) * 0.1 * rng.random_range(0.8..1.2);
    let stage_bonus = f32::from(a.stage + b.stage) * 5.0;

    let mut child = Organism::new(id, a.species, position, now);
    child.health = params.offspring_health;
    child.adaptation_points = (inheritance + stage_bonus).min(params.offspring_adaptation_cap);
    child
}

/// Candidates in `population` that `organism` could mate with right now.
pub fn potential_mates<'a>(
    organism: &'a Organism,
    population: &'a [Organism],
    params: &'a Params,
) -> impl Iterator<Item = &'a Organism> + 'a {
    population
        .iter()
        .filter(move |other| other.id != organism.id && eligible(organism, other, params))
}

fn jitter_sample<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    if amplitude > 0.0 {
        rng.random_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}
