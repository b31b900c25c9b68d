#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use biome::simulation::ecosystem::{TickContext, tick};
use biome::simulation::environment::{BiomeType, Environment};
use biome::simulation::events::{InteractionKind, SimulationEvent};
use biome::simulation::geometric_utils::Position;
use biome::simulation::organism::Organism;
use biome::simulation::params::Params;
use biome::simulation::reproduction;
use biome::simulation::species::Species;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_params() -> Params {
    Params {
        behaviors_enabled: false,
        // Large enough that every mating draw succeeds.
        base_reproduction_chance: 100.0,
        rng_seed: Some(7),
        ..Params::default()
    }
}

fn context(params: &Params, now: f64, biome: BiomeType, water: f32) -> TickContext<'_> {
    TickContext {
        now,
        speed: 1.0,
        interval_ms: params.base_interval_ms,
        env: Environment::new(water, 60.0, biome, params.season_length_ms).effective(),
        params,
    }
}

fn parents_of(event: &SimulationEvent) -> Option<[u64; 2]> {
    match event {
        SimulationEvent::Reproduction { parent_ids, .. } => Some(*parent_ids),
        _ => None,
    }
}

#[test]
fn test_eligibility_is_symmetric() {
    let params = Params::default();
    let population = vec![
        Organism::new(0, Species::Rabbit, Position::new(50.0, 50.0), 0.0),
        Organism::new(1, Species::Rabbit, Position::new(60.0, 50.0), 0.0),
        Organism::new(2, Species::Rabbit, Position::new(80.0, 50.0), 0.0),
        Organism::new(3, Species::Fox, Position::new(52.0, 50.0), 0.0),
        {
            let mut weak = Organism::new(4, Species::Rabbit, Position::new(48.0, 50.0), 0.0);
            weak.health = 30.0;
            weak
        },
    ];

    for a in &population {
        for b in &population {
            assert_eq!(
                reproduction::eligible(a, b, &params),
                reproduction::eligible(b, a, &params),
                "asymmetric for {} and {}",
                a.id,
                b.id
            );
        }
    }

    assert!(reproduction::eligible(&population[0], &population[1], &params));
    assert!(!reproduction::eligible(&population[0], &population[2], &params));
    assert!(!reproduction::eligible(&population[0], &population[3], &params));
    assert!(!reproduction::eligible(&population[0], &population[4], &params));
}

#[test]
fn test_potential_mates_excludes_self() {
    let params = Params::default();
    let population = vec![
        Organism::new(0, Species::Fish, Position::new(50.0, 50.0), 0.0),
        Organism::new(1, Species::Fish, Position::new(55.0, 50.0), 0.0),
        Organism::new(2, Species::Crab, Position::new(53.0, 50.0), 0.0),
    ];

    let mates: Vec<u64> = reproduction::potential_mates(&population[0], &population, &params)
        .map(|org| org.id)
        .collect();
    assert_eq!(mates, vec![1]);
}

#[test]
fn test_chance_scales_with_breeding_class() {
    let params = Params::default();
    let rabbit_a = Organism::new(0, Species::Rabbit, Position::new(50.0, 50.0), 0.0);
    let rabbit_b = Organism::new(1, Species::Rabbit, Position::new(55.0, 50.0), 0.0);
    let fox_a = Organism::new(2, Species::Fox, Position::new(50.0, 50.0), 0.0);
    let fox_b = Organism::new(3, Species::Fox, Position::new(55.0, 50.0), 0.0);

    let rabbit = reproduction::chance(&rabbit_a, &rabbit_b, 1.0, &params);
    let fox = reproduction::chance(&fox_a, &fox_b, 1.0, &params);

    assert!((rabbit - 0.3).abs() < 1e-6);
    assert!((fox - 0.14).abs() < 1e-6);
}

#[test]
fn test_succeeds_uses_speed_scaled_draw() {
    assert!(reproduction::succeeds(0.5, 5.0, 0.49));
    assert!(!reproduction::succeeds(0.5, 5.0, 0.5));
    assert!(!reproduction::succeeds(0.5, 1.0, 0.2));
    assert!(reproduction::succeeds(0.5, 10.0, 0.99));
}

#[test]
fn test_offspring_adaptation_is_capped() {
    let params = Params::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut a = Organism::new(0, Species::Tree, Position::new(40.0, 40.0), 0.0);
    let mut b = Organism::new(1, Species::Tree, Position::new(50.0, 40.0), 0.0);
    a.adaptation_points = 900.0;
    a.stage = 2;
    b.adaptation_points = 900.0;
    b.stage = 2;

    for id in 2..50 {
        let child = reproduction::offspring(&a, &b, id, 1000.0, &params, &mut rng);
        assert!(child.adaptation_points <= 100.0);
        assert_eq!(child.stage, 0);
        assert_eq!(child.health, 80.0);
        assert_eq!(child.species, Species::Tree);
        assert_eq!(child.birth_time, 1000.0);
        assert!((5.0..=95.0).contains(&child.position.x));
        assert!((child.position.x - 45.0).abs() <= 3.0 + 1e-4);
        assert!((child.position.y - 40.0).abs() <= 3.0 + 1e-4);
    }
}

#[test]
fn test_offspring_inherits_stage_bonus() {
    let params = Params::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut a = Organism::new(0, Species::Grass, Position::new(40.0, 40.0), 0.0);
    let b = Organism::new(1, Species::Grass, Position::new(50.0, 40.0), 0.0);
    a.stage = 1;

    let child = reproduction::offspring(&a, &b, 2, 0.0, &params, &mut rng);
    assert!((child.adaptation_points - 5.0).abs() < 1e-6);
}

#[test]
fn test_reproduction_cooldown() {
    let params = create_test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut population = vec![
        Organism::new(0, Species::Fish, Position::new(50.0, 50.0), 0.0),
        Organism::new(1, Species::Fish, Position::new(55.0, 50.0), 0.0),
    ];

    let ctx = context(&params, 2000.0, BiomeType::Ocean, 80.0);
    let outcome = tick(&population, &ctx, 2, &mut rng);
    assert_eq!(outcome.events.reproduction.len(), 1);
    assert_eq!(parents_of(&outcome.events.reproduction[0]), Some([0, 1]));
    assert!(matches!(
        &outcome.events.interactions[..],
        [SimulationEvent::Interaction { kind: InteractionKind::Mating, organism_ids, .. }]
            if organism_ids == &vec![0, 1]
    ));
    for parent in outcome.organisms.iter().filter(|org| org.id < 2) {
        assert_eq!(parent.last_reproduction_at, Some(2000.0));
    }
    population = outcome.organisms;
    let mut next_id = outcome.next_id;

    // Cooldown is 10000 ms at speed 1.
    for now in [4000.0, 6000.0, 8000.0, 10_000.0] {
        let ctx = context(&params, now, BiomeType::Ocean, 80.0);
        let outcome = tick(&population, &ctx, next_id, &mut rng);
        for event in &outcome.events.reproduction {
            let parents = parents_of(event).unwrap();
            assert!(!parents.contains(&0), "parent 0 bred during cooldown at {now}");
            assert!(!parents.contains(&1), "parent 1 bred during cooldown at {now}");
        }
        population = outcome.organisms;
        next_id = outcome.next_id;
    }

    let ctx = context(&params, 12_000.0, BiomeType::Ocean, 80.0);
    let outcome = tick(&population, &ctx, next_id, &mut rng);
    assert!(
        outcome
            .events
            .reproduction
            .iter()
            .filter_map(parents_of)
            .any(|parents| parents.contains(&0))
    );
}

#[test]
fn test_cooldown_shrinks_with_speed() {
    let mut organism = Organism::new(0, Species::Fish, Position::new(50.0, 50.0), 0.0);
    organism.last_reproduction_at = Some(1000.0);

    assert!(!organism.reproduction_ready(5000.0, 10_000.0));
    assert!(organism.reproduction_ready(3000.0, 10_000.0 / 5.0));
}

#[test]
fn test_population_cap_blocks_offspring() {
    let params = create_test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let population: Vec<Organism> = (0..15)
        .map(|i| {
            let x = 40.0 + (i % 5) as f32 * 2.0;
            let y = 40.0 + (i / 5) as f32 * 2.0;
            Organism::new(i, Species::Rabbit, Position::new(x, y), 0.0)
        })
        .collect();

    let ctx = context(&params, 2000.0, BiomeType::Forest, 50.0);
    let outcome = tick(&population, &ctx, 15, &mut rng);

    assert!(outcome.events.reproduction.is_empty());
    let rabbits = outcome
        .organisms
        .iter()
        .filter(|org| org.species == Species::Rabbit)
        .count();
    assert_eq!(rabbits, 15);
}

#[test]
fn test_population_cap_counts_newborns() {
    let params = create_test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let population: Vec<Organism> = (0..14)
        .map(|i| {
            let x = 40.0 + (i % 5) as f32 * 2.0;
            let y = 40.0 + (i / 5) as f32 * 2.0;
            Organism::new(i, Species::Rabbit, Position::new(x, y), 0.0)
        })
        .collect();

    let ctx = context(&params, 2000.0, BiomeType::Forest, 50.0);
    let outcome = tick(&population, &ctx, 14, &mut rng);

    assert_eq!(outcome.events.reproduction.len(), 1);
    assert_eq!(outcome.organisms.len(), 15);
    assert_eq!(outcome.next_id, 15);
}

#[test]
fn test_parent_health_cost_has_floor() {
    let params = create_test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut a = Organism::new(0, Species::Tree, Position::new(40.0, 40.0), 0.0);
    let mut b = Organism::new(1, Species::Tree, Position::new(48.0, 40.0), 0.0);
    a.health = 100.0;
    b.health = 100.0;

    let ctx = context(&params, 2000.0, BiomeType::Forest, 50.0);
    let outcome = tick(&[a, b], &ctx, 2, &mut rng);
    assert_eq!(outcome.events.reproduction.len(), 1);

    for parent in outcome.organisms.iter().filter(|org| org.id < 2) {
        assert!(parent.health >= params.reproduction_health_floor);
        assert!(parent.health <= 91.0);
    }
}
