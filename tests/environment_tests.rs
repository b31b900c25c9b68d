#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use biome::simulation::clock::TickClock;
use biome::simulation::ecosystem::{Presence, adaptation_gain, environmental_health_change};
use biome::simulation::environment::{
    BiomeType, Environment, Season, SeasonClock, environment_factor,
};
use biome::simulation::geometric_utils::Position;
use biome::simulation::organism::Organism;
use biome::simulation::species::Species;

const SEASON_LENGTH: f64 = 60_000.0;

#[test]
fn test_effective_environment_is_clamped() {
    let env = Environment::new(95.0, 90.0, BiomeType::Forest, SEASON_LENGTH);
    let effective = env.effective();
    assert_eq!(effective.season, Season::Spring);
    assert_eq!(effective.water, 100.0);
    assert_eq!(effective.sunlight, 100.0);
    assert_eq!(effective.growth_modifier, 1.5);

    let mut env = Environment::new(5.0, 10.0, BiomeType::Desert, SEASON_LENGTH);
    env.seasons.force(Season::Summer);
    let effective = env.effective();
    assert_eq!(effective.water, 0.0);
    assert_eq!(effective.sunlight, 35.0);
    assert_eq!(effective.biome, BiomeType::Desert);
}

#[test]
fn test_environment_levels_are_clamped() {
    let mut env = Environment::new(150.0, -20.0, BiomeType::Ocean, SEASON_LENGTH);
    assert_eq!(env.water_level, 100.0);
    assert_eq!(env.sunlight_level, 0.0);

    env.set_water_level(-1.0);
    env.set_sunlight_level(101.0);
    assert_eq!(env.water_level, 0.0);
    assert_eq!(env.sunlight_level, 100.0);
}

#[test]
fn test_environment_factor() {
    // Spring pushes the factor over one, so it is capped.
    let env = Environment::new(50.0, 60.0, BiomeType::Forest, SEASON_LENGTH);
    assert_eq!(environment_factor(&env.effective()), 1.0);

    let mut env = Environment::new(50.0, 60.0, BiomeType::Forest, SEASON_LENGTH);
    env.seasons.force(Season::Winter);
    assert!((environment_factor(&env.effective()) - 0.28).abs() < 1e-6);

    let mut env = Environment::new(90.0, 100.0, BiomeType::Forest, SEASON_LENGTH);
    env.seasons.force(Season::Autumn);
    let expected = 0.7 * 0.7 * 0.8 * 0.7;
    assert!((environment_factor(&env.effective()) - expected).abs() < 1e-6);
}

#[test]
fn test_season_cycle() {
    let mut season = Season::Spring;
    for expected in [Season::Summer, Season::Autumn, Season::Winter, Season::Spring] {
        season = season.next();
        assert_eq!(season, expected);
    }
    assert_eq!(Season::CYCLE.len(), 4);
}

#[test]
fn test_season_clock_progress() {
    let mut clock = SeasonClock::new(SEASON_LENGTH);
    assert_eq!(clock.advance(15_000.0, 1.0), None);
    assert!((clock.progress() - 25.0).abs() < 1e-4);

    assert_eq!(clock.advance(45_000.0, 1.0), Some(Season::Summer));
    assert_eq!(clock.progress(), 0.0);

    // Speed shortens the season.
    assert_eq!(clock.advance(30_000.0, 2.0), Some(Season::Autumn));

    clock.force(Season::Spring);
    assert_eq!(clock.season(), Season::Spring);
    assert_eq!(clock.progress(), 0.0);

    clock.set_season_length(10_000.0);
    assert_eq!(clock.advance(10_000.0, 1.0), Some(Season::Summer));
}

#[test]
fn test_season_clock_carries_overshoot() {
    let mut clock = SeasonClock::new(SEASON_LENGTH);
    assert_eq!(clock.advance(150_000.0, 1.0), Some(Season::Autumn));
    assert!((clock.progress() - 50.0).abs() < 1e-4);

    let mut stepped = SeasonClock::new(SEASON_LENGTH);
    for _ in 0..1500 {
        stepped.advance(100.0, 1.0);
    }
    assert_eq!(stepped, clock);

    clock.set_season_length(SEASON_LENGTH * 2.0);
    assert!((clock.progress() - 50.0).abs() < 1e-4);
}

#[test]
fn test_tick_clock() {
    let mut clock = TickClock::new(2000.0, 1.0);
    assert_eq!(clock.advance(1000.0), 0);
    assert_eq!(clock.pending_ms(), 1000.0);
    assert_eq!(clock.advance(1000.0), 1);
    assert_eq!(clock.advance(5000.0), 2);
    assert_eq!(clock.advance(1000.0), 1);

    clock.set_speed(20.0);
    assert_eq!(clock.speed(), 10.0);
    assert_eq!(clock.interval_ms(), 200.0);
    assert_eq!(clock.advance(1000.0), 5);

    clock.toggle_pause();
    assert!(clock.is_paused());
    assert_eq!(clock.advance(10_000.0), 0);

    clock.toggle_pause();
    assert_eq!(clock.advance(199.0), 0);
}

#[test]
fn test_drought_hurts_unadapted_tree() {
    let mut env = Environment::new(20.0, 60.0, BiomeType::Forest, SEASON_LENGTH);
    // Winter leaves water untouched.
    env.seasons.force(Season::Winter);
    let effective = env.effective();
    assert_eq!(effective.water, 20.0);

    let mut tree = Organism::new(1, Species::Tree, Position::new(50.0, 50.0), 0.0);
    tree.health = 50.0;
    assert!(!tree.has_trait("drought-resistant"));

    let change = environmental_health_change(&tree, &Presence::of(&[]), &effective);
    assert!(change < 0.0);

    tree.adaptation_points = 50.0;
    tree.try_evolve();
    assert!(tree.has_trait("drought-resistant"));
    let adapted = environmental_health_change(&tree, &Presence::of(&[]), &effective);
    assert!(adapted > change);
}

#[test]
fn test_consumers_depend_on_food() {
    let env = Environment::new(50.0, 60.0, BiomeType::Forest, SEASON_LENGTH).effective();
    let rabbit = Organism::new(1, Species::Rabbit, Position::new(50.0, 50.0), 0.0);
    let fox = Organism::new(2, Species::Fox, Position::new(60.0, 50.0), 0.0);
    let grass = Organism::new(3, Species::Grass, Position::new(40.0, 50.0), 0.0);

    let empty = Presence::of(&[]);
    assert_eq!(environmental_health_change(&rabbit, &empty, &env), -3.0);
    assert_eq!(environmental_health_change(&fox, &empty, &env), -2.0);

    let fed = Presence::of(&[rabbit.clone(), fox.clone(), grass]);
    assert_eq!(environmental_health_change(&rabbit, &fed, &env), 1.0);
    assert_eq!(environmental_health_change(&fox, &fed, &env), 1.0);
}

#[test]
fn test_decomposers_feed_on_dead_matter() {
    let env = Environment::new(50.0, 60.0, BiomeType::Forest, SEASON_LENGTH).effective();
    let fungi = Organism::new(1, Species::Fungi, Position::new(50.0, 50.0), 0.0);
    let mut weak = Organism::new(2, Species::Grass, Position::new(60.0, 50.0), 0.0);
    weak.health = 10.0;

    assert_eq!(environmental_health_change(&fungi, &Presence::of(&[]), &env), 1.0);
    assert_eq!(
        environmental_health_change(&fungi, &Presence::of(&[weak]), &env),
        3.0
    );
}

#[test]
fn test_seasonal_adaptation_bonus() {
    let mut env = Environment::new(20.0, 60.0, BiomeType::Desert, SEASON_LENGTH);
    let mut tree = Organism::new(1, Species::Tree, Position::new(50.0, 50.0), 0.0);
    tree.health = 50.0;

    env.seasons.force(Season::Autumn);
    let autumn = adaptation_gain(&tree, &env.effective());

    env.seasons.force(Season::Winter);
    let winter = adaptation_gain(&tree, &env.effective());

    assert!(autumn > 0.0);
    assert!(winter > 0.0);

    tree.health = 85.0;
    assert_eq!(adaptation_gain(&tree, &env.effective()), 0.0);
}

#[test]
fn test_tick_clock_without_interval_stays_idle() {
    let mut clock = TickClock::new(0.0, 1.0);
    assert_eq!(clock.advance(10_000.0), 0);
    assert_eq!(clock.pending_ms(), 0.0);

    let mut clock = TickClock::new(f64::NAN, 1.0);
    assert_eq!(clock.advance(10_000.0), 0);
}
