//! Adaptation scoring.
//!
//! Moderate environmental stress is what drives evolution here: organisms that
//! are comfortable, or stressed to breaking point, gain nothing.

use super::environment::BiomeType;
use super::species::Species;

/// Health above which an organism is too comfortable to adapt.
pub const THRIVING_HEALTH: f32 = 90.0;
/// Stress at or above which adaptation stops.
pub const MAX_ADAPTIVE_STRESS: f32 = 5.0;

/// Environmental stress felt by `species` under the given conditions.
///
/// Each species group accrues stress from the conditions it is sensitive to,
/// plus a flat penalty when living outside its native biome.
pub fn stress(species: Species, water: f32, sunlight: f32, biome: BiomeType) -> f32 {
    let mut stress = 0.0;
    let native_penalty;

    match species {
        Species::Tree | Species::Grass | Species::Flower => {
            stress += shortfall(water, 30.0) / 10.0;
            stress += shortfall(sunlight, 30.0) / 10.0;
            stress += excess(sunlight, 80.0) / 10.0;
            native_penalty = 1.0;
        }
        Species::Cactus | Species::Bush => {
            stress += excess(water, 60.0) / 10.0;
            stress += shortfall(sunlight, 50.0) / 10.0;
            native_penalty = 1.0;
        }
        Species::Seaweed | Species::Coral | Species::Fish | Species::Crab | Species::Starfish => {
            stress += shortfall(water, 70.0) / 5.0;
            native_penalty = 2.0;
        }
        Species::Rabbit | Species::Fox => {
            stress += shortfall(water, 20.0) / 5.0;
            stress += excess(sunlight, 90.0) / 10.0;
            native_penalty = 1.0;
        }
        Species::Lizard | Species::Snake => {
            stress += excess(water, 50.0) / 10.0;
            stress += shortfall(sunlight, 40.0) / 10.0;
            native_penalty = 1.0;
        }
        Species::Fungi | Species::Beetle => {
            stress += shortfall(water, 30.0) / 10.0;
            stress += excess(sunlight, 70.0) / 10.0;
            native_penalty = 1.0;
        }
        Species::Unknown => return 0.0,
    }

    if species.native_biome() != Some(biome) {
        stress += native_penalty;
    }

    stress
}

/// Adaptation points an organism gains this tick, rounded to one decimal.
pub fn gain(species: Species, health: f32, water: f32, sunlight: f32, biome: BiomeType) -> f32 {
    if health <= 0.0 || health > THRIVING_HEALTH {
        return 0.0;
    }

    let stress = stress(species, water, sunlight, biome);
    let gain = if stress > 0.0 && stress < MAX_ADAPTIVE_STRESS {
        stress * 0.5
    } else {
        0.0
    };

    (gain * 10.0).round() / 10.0
}

fn shortfall(value: f32, floor: f32) -> f32 {
    (floor - value).max(0.0)
}

fn excess(value: f32, ceiling: f32) -> f32 {
    (value - ceiling).max(0.0)
}
