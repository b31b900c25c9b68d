//! Placement checks for organisms added by the operator.

use thiserror::Error;

use super::environment::{EffectiveEnvironment, Season};
use super::geometric_utils::Position;
use super::organism::Organism;
use super::params::Params;
use super::species::Species;

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementRejection {
    /// The position lies off the biome surface.
    #[error("position ({x}, {y}) is outside the biome")]
    OutOfBounds {
        /// Requested horizontal coordinate.
        x: f32,
        /// Requested vertical coordinate.
        y: f32,
    },
    /// Another organism is too close.
    #[error("position is occupied by organism {occupant}")]
    Occupied {
        /// ID of the organism in the way.
        occupant: u64,
    },
    /// The species cannot survive the current environment.
    #[error("{species} cannot survive here: {reason}")]
    Unsuitable {
        /// Species that was refused.
        species: Species,
        /// Which condition failed.
        reason: &'static str,
    },
}

/// Checks whether a new `species` organism may be placed at `position`.
pub fn check_placement(
    species: Species,
    position: &Position,
    population: &[Organism],
    env: &EffectiveEnvironment,
    params: &Params,
) -> Result<(), PlacementRejection> {
    if !position.is_on_surface() {
        return Err(PlacementRejection::OutOfBounds {
            x: position.x,
            y: position.y,
        });
    }

    if let Some(occupant) = population
        .iter()
        .filter(|org| org.is_alive())
        .find(|org| org.position.distance(position) < params.placement_radius)
    {
        return Err(PlacementRejection::Occupied {
            occupant: occupant.id,
        });
    }

    survivability(species, env).map_err(|reason| PlacementRejection::Unsuitable { species, reason })
}

fn survivability(species: Species, env: &EffectiveEnvironment) -> Result<(), &'static str> {
    match species {
        Species::Tree | Species::Flower => {
            if env.season == Season::Winter {
                Err("nothing takes root in winter")
            } else if env.water < 30.0 {
                Err("needs water of at least 30")
            } else if env.sunlight < 40.0 {
                Err("needs sunlight of at least 40")
            } else {
                Ok(())
            }
        }
        Species::Cactus if env.water > 50.0 => Err("needs water of at most 50"),
        Species::Coral if env.water < 70.0 => Err("needs water of at least 70"),
        _ => Ok(()),
    }
}

/// Places a fresh stage-0 organism if the position and environment allow it.
///
/// # Returns
///
/// `true` when the organism was inserted; `population` is untouched otherwise.
pub fn try_place(
    species: Species,
    position: Position,
    population: &mut Vec<Organism>,
    env: &EffectiveEnvironment,
    params: &Params,
    id: u64,
    now: f64,
) -> bool {
    match check_placement(species, &position, population, env, params) {
        Ok(()) => {
            population.push(Organism::new(id, species, position, now));
            true
        }
        Err(rejection) => {
            tracing::debug!(%species, %rejection, "placement rejected");
            false
        }
    }
}
