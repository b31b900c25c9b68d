//! Staged evolution ladder for every species.
//!
//! Each species climbs a fixed three-stage ladder. A stage is unlocked once the
//! organism's accumulated adaptation points reach that stage's threshold, and
//! the stage fully determines the organism's traits.

use serde::Serialize;

use super::species::Species;

/// Highest stage index of any ladder.
pub const MAX_STAGE: u8 = 2;

/// Static description of one evolution stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionStage {
    /// Stage index, 0 to [`MAX_STAGE`].
    pub stage: u8,
    /// Adaptation points required to reach this stage.
    pub threshold: f32,
    /// Display name.
    pub name: &'static str,
    /// Display icon.
    pub icon: &'static str,
    /// Traits carried by organisms at this stage.
    pub traits: &'static [&'static str],
    /// Short flavour text.
    pub description: &'static str,
}

/// Descriptor returned for species or stages outside the table.
pub static UNKNOWN_STAGE: EvolutionStage = EvolutionStage {
    stage: 0,
    threshold: 0.0,
    name: "unknown",
    icon: "❓",
    traits: &["unknown"],
    description: "Unknown species",
};

macro_rules! stage {
    ($stage:expr, $threshold:expr, $name:expr, $icon:expr, [$($t:expr),*], $description:expr) => {
        EvolutionStage {
            stage: $stage,
            threshold: $threshold,
            name: $name,
            icon: $icon,
            traits: &[$($t),*],
            description: $description,
        }
    };
}

static TREE: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Sapling", "🌱", ["basic"], "A young tree, vulnerable but growing."),
    stage!(1, 50.0, "Mature Tree", "🌳", ["drought-resistant"], "Deeper roots make it resistant to drought."),
    stage!(2, 100.0, "Ancient Tree", "🌲", ["drought-resistant", "nutrient-rich"], "Enriches the soil and withstands harsh conditions."),
];

static GRASS: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Grass Sprout", "🌿", ["basic"], "Basic grass that feeds herbivores."),
    stage!(1, 40.0, "Wild Grass", "🌾", ["fast-growing"], "Recovers quickly from being eaten."),
    stage!(2, 80.0, "Resilient Grass", "🌾", ["fast-growing", "heat-resistant"], "Thrives in heat and regrows quickly."),
];

static FLOWER: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Bud", "🌸", ["basic"], "A simple flower that attracts insects."),
    stage!(1, 45.0, "Vibrant Flower", "🌺", ["attractive"], "Colourful petals attract more pollinators."),
    stage!(2, 90.0, "Hardy Bloom", "🌹", ["attractive", "water-efficient"], "Needs far less water to thrive."),
];

static CACTUS: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Small Cactus", "🌵", ["water-storing"], "A small desert plant that stores water."),
    stage!(1, 40.0, "Spiny Cactus", "🌵", ["water-storing", "defensive"], "Protected by stronger spines."),
    stage!(2, 80.0, "Towering Cactus", "🌵", ["water-storing", "defensive", "shade-providing"], "Shades other desert life."),
];

static BUSH: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Dry Shrub", "🌿", ["basic"], "A scraggly shrub clinging to dry ground."),
    stage!(1, 45.0, "Thorn Bush", "🌿", ["drought-resistant"], "Waxy leaves lose little water."),
    stage!(2, 90.0, "Desert Thicket", "🌳", ["drought-resistant", "heat-resistant"], "Shrugs off scorching sun."),
];

static SEAWEED: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Seaweed Shoot", "🌱", ["oxygen-producing"], "Young seaweed that oxygenates water."),
    stage!(1, 45.0, "Kelp", "🌿", ["oxygen-producing", "habitat-forming"], "Shelters small sea creatures."),
    stage!(2, 90.0, "Kelp Forest", "🌿", ["oxygen-producing", "habitat-forming", "current-resistant"], "Dense growth that hosts an entire ecosystem."),
];

static CORAL: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Coral Polyp", "🪸", ["filter-feeding"], "A tiny polyp filtering the current."),
    stage!(1, 50.0, "Coral Colony", "🪸", ["filter-feeding", "habitat-forming"], "A colony that shelters reef life."),
    stage!(2, 100.0, "Great Reef", "🪸", ["filter-feeding", "habitat-forming", "heat-resistant"], "A reef that survives warming waters."),
];

static RABBIT: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Young Rabbit", "🐰", ["herbivore"], "A basic rabbit that eats plants."),
    stage!(1, 50.0, "Swift Rabbit", "🐇", ["herbivore", "fast"], "Quicker at escaping predators."),
    stage!(2, 100.0, "Desert Hare", "🐇", ["herbivore", "fast", "water-efficient"], "Survives on minimal water."),
];

static LIZARD: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Small Lizard", "🦎", ["heat-resistant"], "Adapted to hot environments."),
    stage!(1, 50.0, "Desert Lizard", "🦎", ["heat-resistant", "water-efficient"], "Requires very little water."),
    stage!(2, 100.0, "Armored Lizard", "🦎", ["heat-resistant", "water-efficient", "protective-scales"], "Tough scales protect it and keep water in."),
];

static FISH: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Fry", "🐟", ["herbivore"], "A small fish grazing on algae."),
    stage!(1, 45.0, "Schooling Fish", "🐠", ["herbivore", "fast"], "Swims in quick, evasive schools."),
    stage!(2, 90.0, "Reef Fish", "🐡", ["herbivore", "fast", "camouflaged"], "Blends into the reef."),
];

static FOX: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Fox Kit", "🦊", ["predator"], "A young fox learning to hunt."),
    stage!(1, 60.0, "Cunning Fox", "🦊", ["predator", "efficient-hunter"], "Wastes less energy when hunting."),
    stage!(2, 120.0, "Alpha Fox", "🦊", ["predator", "efficient-hunter", "adaptable-diet"], "Eats whatever it can catch when prey is scarce."),
];

static SNAKE: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Hatchling Snake", "🐍", ["predator"], "A small snake ambushing lizards."),
    stage!(1, 55.0, "Sand Viper", "🐍", ["predator", "heat-resistant"], "Hunts through the hottest hours."),
    stage!(2, 110.0, "Desert King", "🐍", ["predator", "heat-resistant", "efficient-hunter"], "A patient, lethal hunter."),
];

static CRAB: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Hermit Crab", "🦀", ["predator"], "A scavenging crab in a borrowed shell."),
    stage!(1, 50.0, "Shore Crab", "🦀", ["predator", "armored"], "A hard shell shrugs off attacks."),
    stage!(2, 100.0, "King Crab", "🦀", ["predator", "armored", "adaptable-diet"], "Eats almost anything on the seabed."),
];

static FUNGI: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Mushroom", "🍄", ["decomposer"], "Basic fungi that break down dead matter."),
    stage!(1, 40.0, "Spread Fungi", "🍄", ["decomposer", "far-reaching"], "An extensive mycelium network."),
    stage!(2, 80.0, "Robust Fungi", "🍄", ["decomposer", "far-reaching", "toxin-resistant"], "Breaks down even toxic compounds."),
];

static BEETLE: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Larva", "🐛", ["decomposer"], "A grub chewing through leaf litter."),
    stage!(1, 40.0, "Dung Beetle", "🪲", ["decomposer", "armored"], "A tough shell for rough ground."),
    stage!(2, 80.0, "Stag Beetle", "🪲", ["decomposer", "armored", "far-reaching"], "Ranges widely in search of dead matter."),
];

static STARFISH: [EvolutionStage; 3] = [
    stage!(0, 0.0, "Sea Star", "⭐", ["decomposer"], "Slowly cleans the seabed."),
    stage!(1, 45.0, "Brittle Star", "⭐", ["decomposer", "regenerating"], "Regrows lost arms."),
    stage!(2, 90.0, "Crown Star", "🌟", ["decomposer", "regenerating", "current-resistant"], "Holds fast in strong currents."),
];

/// Ordered stage descriptors for a species, empty for the sentinel.
pub fn stages(species: Species) -> &'static [EvolutionStage] {
    match species {
        Species::Tree => &TREE,
        Species::Grass => &GRASS,
        Species::Flower => &FLOWER,
        Species::Cactus => &CACTUS,
        Species::Bush => &BUSH,
        Species::Seaweed => &SEAWEED,
        Species::Coral => &CORAL,
        Species::Rabbit => &RABBIT,
        Species::Lizard => &LIZARD,
        Species::Fish => &FISH,
        Species::Fox => &FOX,
        Species::Snake => &SNAKE,
        Species::Crab => &CRAB,
        Species::Fungi => &FUNGI,
        Species::Beetle => &BEETLE,
        Species::Starfish => &STARFISH,
        Species::Unknown => &[],
    }
}

/// Descriptor for `stage`, or [`UNKNOWN_STAGE`] when out of range.
pub fn info_at(species: Species, stage: u8) -> &'static EvolutionStage {
    stages(species)
        .get(usize::from(stage))
        .unwrap_or(&UNKNOWN_STAGE)
}

/// Traits an organism of `species` carries at `stage`, as owned strings.
pub fn traits_at(species: Species, stage: u8) -> Vec<String> {
    info_at(species, stage)
        .traits
        .iter()
        .map(|t| (*t).to_string())
        .collect()
}

/// Stage reached after one evolution check.
///
/// Advances by at most one step: an organism with enough points for two
/// thresholds still only climbs a single rung per call.
pub fn next_stage(species: Species, current_stage: u8, adaptation_points: f32) -> u8 {
    let ladder = stages(species);
    let next = usize::from(current_stage) + 1;
    match ladder.get(next) {
        Some(descriptor) if adaptation_points >= descriptor.threshold => current_stage + 1,
        _ => current_stage,
    }
}
