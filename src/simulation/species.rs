//! Closed catalogue of species and their static ecological facts.
//!
//! Every organism carries one [`Species`]. The catalogue answers the questions
//! the engine asks about a species without consulting any runtime state: its
//! trophic role, native biome, breeding rate, population cap and mobility.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::environment::BiomeType;

/// Error returned when a species name is not part of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesError {
    /// The name does not match any known species.
    #[error("unknown species `{0}`")]
    Unknown(String),
}

/// Species identifiers known to the simulation.
///
/// `Unknown` is the sentinel for names that could not be matched. It never
/// evolves, never reproduces and has no trophic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Forest producer.
    Tree,
    /// Forest producer.
    Grass,
    /// Forest producer.
    Flower,
    /// Desert producer.
    Cactus,
    /// Desert producer.
    Bush,
    /// Aquatic producer.
    Seaweed,
    /// Aquatic producer.
    Coral,
    /// Forest herbivore.
    Rabbit,
    /// Desert herbivore.
    Lizard,
    /// Aquatic herbivore.
    Fish,
    /// Forest predator.
    Fox,
    /// Desert predator.
    Snake,
    /// Aquatic predator.
    Crab,
    /// Forest decomposer.
    Fungi,
    /// Forest decomposer.
    Beetle,
    /// Aquatic decomposer.
    Starfish,
    /// Sentinel for unrecognised names.
    Unknown,
}

/// Position of a species in the food web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrophicRole {
    /// Lives from water and sunlight.
    Producer,
    /// Eats producers.
    Herbivore,
    /// Eats herbivores.
    Predator,
    /// Feeds on dead matter.
    Decomposer,
}

impl TrophicRole {
    /// Herbivores and predators together form the consumers.
    pub fn is_consumer(self) -> bool {
        matches!(self, Self::Herbivore | Self::Predator)
    }
}

/// Reproduction speed class used to scale mating chances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedingClass {
    /// Breeds quickly.
    FastBreeder,
    /// Breeds slowly.
    Predator,
    /// Plants spread at a medium rate.
    Plant,
    /// Everything else.
    Default,
}

impl BreedingClass {
    /// Multiplier applied to the base reproduction chance.
    pub fn multiplier(self) -> f32 {
        match self {
            Self::FastBreeder => 1.5,
            Self::Predator => 0.7,
            Self::Plant => 1.2,
            Self::Default => 1.0,
        }
    }
}

impl Species {
    /// All catalogued species, sentinel excluded.
    pub const ALL: [Species; 16] = [
        Species::Tree,
        Species::Grass,
        Species::Flower,
        Species::Cactus,
        Species::Bush,
        Species::Seaweed,
        Species::Coral,
        Species::Rabbit,
        Species::Lizard,
        Species::Fish,
        Species::Fox,
        Species::Snake,
        Species::Crab,
        Species::Fungi,
        Species::Beetle,
        Species::Starfish,
    ];

    /// Parses a species name, mapping anything unrecognised to [`Species::Unknown`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Unknown)
    }

    /// Lowercase identifier of the species.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Grass => "grass",
            Self::Flower => "flower",
            Self::Cactus => "cactus",
            Self::Bush => "bush",
            Self::Seaweed => "seaweed",
            Self::Coral => "coral",
            Self::Rabbit => "rabbit",
            Self::Lizard => "lizard",
            Self::Fish => "fish",
            Self::Fox => "fox",
            Self::Snake => "snake",
            Self::Crab => "crab",
            Self::Fungi => "fungi",
            Self::Beetle => "beetle",
            Self::Starfish => "starfish",
            Self::Unknown => "unknown",
        }
    }

    /// Trophic role, `None` for the sentinel.
    pub fn role(self) -> Option<TrophicRole> {
        match self {
            Self::Tree
            | Self::Grass
            | Self::Flower
            | Self::Cactus
            | Self::Bush
            | Self::Seaweed
            | Self::Coral => Some(TrophicRole::Producer),
            Self::Rabbit | Self::Lizard | Self::Fish => Some(TrophicRole::Herbivore),
            Self::Fox | Self::Snake | Self::Crab => Some(TrophicRole::Predator),
            Self::Fungi | Self::Beetle | Self::Starfish => Some(TrophicRole::Decomposer),
            Self::Unknown => None,
        }
    }

    /// Returns `true` for producers.
    pub fn is_producer(self) -> bool {
        self.role() == Some(TrophicRole::Producer)
    }

    /// Returns `true` for herbivores and predators.
    pub fn is_consumer(self) -> bool {
        self.role().is_some_and(TrophicRole::is_consumer)
    }

    /// Returns `true` for decomposers.
    pub fn is_decomposer(self) -> bool {
        self.role() == Some(TrophicRole::Decomposer)
    }

    /// Biome the species evolved for.
    pub fn native_biome(self) -> Option<BiomeType> {
        match self {
            Self::Tree
            | Self::Grass
            | Self::Flower
            | Self::Rabbit
            | Self::Fox
            | Self::Fungi
            | Self::Beetle => Some(BiomeType::Forest),
            Self::Cactus | Self::Bush | Self::Lizard | Self::Snake => Some(BiomeType::Desert),
            Self::Seaweed | Self::Coral | Self::Fish | Self::Crab | Self::Starfish => {
                Some(BiomeType::Ocean)
            }
            Self::Unknown => None,
        }
    }

    /// Reproduction speed class.
    pub fn breeding_class(self) -> BreedingClass {
        match self {
            Self::Rabbit | Self::Fish => BreedingClass::FastBreeder,
            Self::Fox | Self::Snake => BreedingClass::Predator,
            Self::Tree | Self::Grass | Self::Flower => BreedingClass::Plant,
            _ => BreedingClass::Default,
        }
    }

    /// Living count at which reproduction of this species stops.
    pub fn default_population_cap(self) -> usize {
        match self {
            Self::Grass => 30,
            Self::Unknown => 0,
            _ => match self.role() {
                Some(TrophicRole::Producer) => 25,
                Some(TrophicRole::Herbivore) => 15,
                Some(TrophicRole::Predator) => 8,
                Some(TrophicRole::Decomposer) => 12,
                None => 0,
            },
        }
    }

    /// Whether the species moves around the biome.
    pub fn is_mobile(self) -> bool {
        match self.role() {
            Some(TrophicRole::Herbivore | TrophicRole::Predator) => true,
            Some(TrophicRole::Decomposer) => self != Self::Fungi,
            _ => false,
        }
    }

    /// Distance covered per tick while moving, in percent of the biome.
    pub fn base_movement_speed(self) -> f32 {
        match self {
            Self::Rabbit | Self::Fish | Self::Fox => 4.0,
            Self::Lizard => 3.0,
            Self::Snake => 2.5,
            Self::Crab => 2.0,
            Self::Beetle => 1.5,
            Self::Starfish => 1.0,
            _ => 0.0,
        }
    }

    /// Species this one hunts.
    pub fn prey(self) -> &'static [Species] {
        match self {
            Self::Fox => &[Species::Rabbit],
            Self::Snake => &[Species::Lizard, Species::Rabbit],
            Self::Crab => &[Species::Fish],
            _ => &[],
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = SpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Species::ALL
            .iter()
            .copied()
            .find(|species| species.name() == normalized)
            .ok_or_else(|| SpeciesError::Unknown(s.to_string()))
    }
}
