#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use biome::simulation::balance::{
    TrophicCounts, average_health, balance_score, biome_health,
};
use biome::simulation::geometric_utils::Position;
use biome::simulation::organism::Organism;
use biome::simulation::species::Species;

fn population(species: &[Species]) -> Vec<Organism> {
    species
        .iter()
        .enumerate()
        .map(|(i, &s)| Organism::new(i as u64, s, Position::new(10.0 * i as f32, 50.0), 0.0))
        .collect()
}

fn counts(producers: usize, consumers: usize, decomposers: usize) -> TrophicCounts {
    TrophicCounts {
        producers,
        consumers,
        decomposers,
    }
}

#[test]
fn test_balanced_population_scores_full() {
    let organisms = population(&[
        Species::Tree,
        Species::Grass,
        Species::Flower,
        Species::Rabbit,
        Species::Fungi,
    ]);

    assert_eq!(TrophicCounts::of(&organisms), counts(3, 1, 1));
    assert_eq!(balance_score(counts(3, 1, 1)), 100.0);
    assert_eq!(biome_health(&organisms), 100.0);
}

#[test]
fn test_ratio_rule_keeps_neutral_gap() {
    assert_eq!(balance_score(counts(4, 2, 1)), 100.0);
    // Between half and all of the producers: neither bonus nor penalty.
    assert_eq!(balance_score(counts(3, 2, 1)), 75.0);
    assert_eq!(balance_score(counts(2, 2, 1)), 75.0);
    assert_eq!(balance_score(counts(1, 4, 1)), 50.0);
}

#[test]
fn test_empty_population() {
    assert_eq!(average_health(&[]), 0.0);
    assert_eq!(balance_score(TrophicCounts::default()), 25.0);
    assert!((biome_health(&[]) - 15.0).abs() < 1e-4);
}

#[test]
fn test_biome_health_floor() {
    let mut organisms = population(&[Species::Fox, Species::Fox, Species::Snake]);
    for org in &mut organisms {
        org.health = 1.0;
    }
    // 0.4 * 1 + 0.6 * 0 is floored.
    assert_eq!(biome_health(&organisms), 10.0);
}

#[test]
fn test_unknown_species_is_not_counted() {
    let organisms = population(&[Species::Unknown, Species::Tree]);
    assert_eq!(TrophicCounts::of(&organisms), counts(1, 0, 0));
}

#[test]
fn test_balance_score_is_deterministic() {
    let organisms = population(&[
        Species::Seaweed,
        Species::Coral,
        Species::Fish,
        Species::Crab,
        Species::Starfish,
    ]);
    let first = biome_health(&organisms);
    let second = biome_health(&organisms);
    assert_eq!(first, second);
    // 2 producers, 2 consumers: 75 balance, 100 average health.
    assert_eq!(first, 0.4 * 100.0 + 0.6 * 75.0);
}
