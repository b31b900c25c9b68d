//! Organism state and lifecycle helpers.
//!
//! An organism is created by placement or reproduction, mutated once per tick
//! by the engine, and removed the moment its health reaches zero.

use serde::{Deserialize, Serialize};

use super::evolution;
use super::geometric_utils::Position;
use super::species::Species;

/// Unique, stable organism identifier.
pub type OrganismId = u64;

/// Maximum health of any organism.
pub const MAX_HEALTH: f32 = 100.0;
/// Maximum hunger of any animal.
pub const MAX_HUNGER: f32 = 100.0;

/// A single simulated organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    /// Unique identifier, fixed for the organism's lifetime.
    pub id: OrganismId,
    /// Species, fixed at creation.
    #[serde(rename = "type")]
    pub species: Species,
    /// Position on the biome surface.
    pub position: Position,
    /// Health in 0..=100; the organism dies at 0.
    pub health: f32,
    /// Accumulated adaptation points; never decreases.
    pub adaptation_points: f32,
    /// Evolution stage, 0 to 2; never decreases.
    pub stage: u8,
    /// Traits of the current stage.
    pub traits: Vec<String>,
    /// Simulation time of creation, in milliseconds.
    pub birth_time: f64,
    /// Simulation time lived, in milliseconds.
    pub age_ms: f64,
    /// Distance covered per tick while moving.
    pub movement_speed: f32,
    /// Hunger in 0..=100, animals only.
    pub hunger: f32,
    /// Where the organism is heading, if anywhere.
    pub target_position: Option<Position>,
    /// Simulation time of the last meal.
    pub last_meal_at: Option<f64>,
    /// Simulation time of the last successful reproduction.
    pub last_reproduction_at: Option<f64>,
    /// Earliest simulation time of the next movement decision.
    pub next_move_at: f64,
}

impl Organism {
    /// Creates a fresh stage-0 organism at full health.
    pub fn new(id: OrganismId, species: Species, position: Position, now: f64) -> Self {
        Self {
            id,
            species,
            position,
            health: MAX_HEALTH,
            adaptation_points: 0.0,
            stage: 0,
            traits: evolution::traits_at(species, 0),
            birth_time: now,
            age_ms: 0.0,
            movement_speed: species.base_movement_speed(),
            hunger: 0.0,
            target_position: None,
            last_meal_at: None,
            last_reproduction_at: None,
            next_move_at: now,
        }
    }

    /// Checks if the organism is alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Checks whether the organism carries `name` among its traits.
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t == name)
    }

    /// Distance to another organism.
    pub fn distance_to(&self, other: &Organism) -> f32 {
        self.position.distance(&other.position)
    }

    /// Whether the reproduction cooldown has run out at `now`.
    pub fn reproduction_ready(&self, now: f64, cooldown_ms: f64) -> bool {
        self.last_reproduction_at
            .is_none_or(|last| now >= last + cooldown_ms)
    }

    /// Distance covered per tick, including the `fast` trait bonus.
    pub fn effective_speed(&self) -> f32 {
        if self.has_trait("fast") {
            self.movement_speed * 1.5
        } else {
            self.movement_speed
        }
    }

    /// Adds `amount` to health, clamped to 0..=100.
    pub fn adjust_health(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, MAX_HEALTH);
    }

    /// Climbs one evolution stage if the accumulated points allow it.
    ///
    /// Traits are replaced wholesale from the evolution table.
    ///
    /// # Returns
    ///
    /// The previous stage when an advance happened.
    pub fn try_evolve(&mut self) -> Option<u8> {
        let next = evolution::next_stage(self.species, self.stage, self.adaptation_points);
        if next > self.stage {
            let previous = self.stage;
            self.stage = next;
            self.traits = evolution::traits_at(self.species, next);
            Some(previous)
        } else {
            None
        }
    }
}
