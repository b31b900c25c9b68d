use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::environment::BiomeType;
use super::species::Species;

/// Errors raised while loading or validating [`Params`].
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The parameter file could not be read.
    #[error("failed to read params: {0}")]
    Io(#[from] std::io::Error),
    /// The parameter file is not valid JSON for [`Params`].
    #[error("failed to parse params: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid parameter `{name}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Simulation parameters that control ecosystem behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Tick interval at speed 1, in milliseconds.
    pub base_interval_ms: f64,
    /// Season length at speed 1, in milliseconds.
    pub season_length_ms: f64,
    /// Initial base water level.
    pub initial_water_level: f32,
    /// Initial base sunlight level.
    pub initial_sunlight_level: f32,
    /// Initial biome type.
    pub initial_biome: BiomeType,
    /// Initial simulation speed multiplier.
    pub initial_speed: f32,
    /// Minimum distance between a new organism and any existing one.
    pub placement_radius: f32,
    /// Maximum distance between mates.
    pub mate_radius: f32,
    /// Minimum health of both mates.
    pub mating_health: f32,
    /// Base per-tick mating chance.
    pub base_reproduction_chance: f32,
    /// Reproduction cooldown at speed 1, in milliseconds.
    pub reproduction_cooldown_ms: f64,
    /// Health each parent pays for a successful mating.
    pub reproduction_health_cost: f32,
    /// Parent health never drops below this through mating.
    pub reproduction_health_floor: f32,
    /// Health of a newborn organism.
    pub offspring_health: f32,
    /// Maximum offset of a newborn from its parents' midpoint.
    pub offspring_jitter: f32,
    /// Cap on inherited adaptation points.
    pub offspring_adaptation_cap: f32,
    /// Per-species overrides of the population cap.
    pub population_caps: BTreeMap<Species, usize>,
    /// Enables hunger, movement and feeding.
    pub behaviors_enabled: bool,
    /// Hunger gained per tick.
    pub hunger_rate: f32,
    /// Hunger at which an animal starts seeking food.
    pub hunger_seek_threshold: f32,
    /// Hunger at which an animal starts losing health.
    pub starvation_threshold: f32,
    /// Health lost per tick while starving.
    pub starvation_damage: f32,
    /// Distance within which an animal notices food.
    pub sense_range: f32,
    /// Distance within which an animal can eat.
    pub feeding_range: f32,
    /// Health restored by a meal.
    pub feeding_health_gain: f32,
    /// Health a predator takes from its prey.
    pub predation_damage: f32,
    /// Health a grazer takes from a plant.
    pub grazing_damage: f32,
    /// Maximum distance of a wander target.
    pub wander_radius: f32,
    /// Movement decision cooldown at speed 1, in milliseconds.
    pub movement_cooldown_ms: f64,
    /// Simulation time between statistics samples, in milliseconds.
    pub stats_interval_ms: f64,
    /// Maximum number of statistics samples kept.
    pub stats_history: usize,
    /// How long events stay in the recent-event lists, in milliseconds.
    pub event_display_ms: f64,
    /// Maximum number of events kept per recent-event list.
    pub max_logged_events: usize,
    /// Seed for the simulation RNG; drawn from entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            base_interval_ms: 2000.0,
            season_length_ms: 60_000.0,
            initial_water_level: 50.0,
            initial_sunlight_level: 60.0,
            initial_biome: BiomeType::Forest,
            initial_speed: 1.0,
            placement_radius: 10.0,
            mate_radius: 15.0,
            mating_health: 60.0,
            base_reproduction_chance: 0.2,
            reproduction_cooldown_ms: 10_000.0,
            reproduction_health_cost: 10.0,
            reproduction_health_floor: 40.0,
            offspring_health: 80.0,
            offspring_jitter: 3.0,
            offspring_adaptation_cap: 100.0,
            population_caps: BTreeMap::new(),
            behaviors_enabled: true,
            hunger_rate: 5.0,
            hunger_seek_threshold: 40.0,
            starvation_threshold: 80.0,
            starvation_damage: 2.0,
            sense_range: 25.0,
            feeding_range: 5.0,
            feeding_health_gain: 15.0,
            predation_damage: 30.0,
            grazing_damage: 5.0,
            wander_radius: 15.0,
            movement_cooldown_ms: 4000.0,
            stats_interval_ms: 10_000.0,
            stats_history: 500,
            event_display_ms: 3000.0,
            max_logged_events: 50,
            rng_seed: None,
        }
    }
}

impl Params {
    /// Living count at which `species` stops reproducing.
    pub fn population_cap(&self, species: Species) -> usize {
        self.population_caps
            .get(&species)
            .copied()
            .unwrap_or_else(|| species.default_population_cap())
    }

    /// Checks that every interval and radius is usable.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("base_interval_ms", self.base_interval_ms),
            ("season_length_ms", self.season_length_ms),
            ("stats_interval_ms", self.stats_interval_ms),
            ("event_display_ms", self.event_display_ms),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ParamsError::Invalid {
                    name,
                    reason: "must be positive",
                });
            }
        }

        let non_negative = [
            ("placement_radius", self.placement_radius),
            ("mate_radius", self.mate_radius),
            ("sense_range", self.sense_range),
            ("feeding_range", self.feeding_range),
            ("wander_radius", self.wander_radius),
            ("offspring_jitter", self.offspring_jitter),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ParamsError::Invalid {
                    name,
                    reason: "must not be negative",
                });
            }
        }

        if !(1.0..=10.0).contains(&self.initial_speed) {
            return Err(ParamsError::Invalid {
                name: "initial_speed",
                reason: "must be between 1 and 10",
            });
        }

        Ok(())
    }

    /// Loads parameters from a JSON file; missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Saves parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ParamsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
