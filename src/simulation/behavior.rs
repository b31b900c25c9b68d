//! Movement and feeding of mobile animals.
//!
//! Decisions are made against a snapshot of the population, then feeding
//! claims are applied serially so that contested food goes to the first
//! claimant.

use rand::Rng;
use std::collections::HashSet;

use super::ecosystem::TickContext;
use super::events::{InteractionKind, SimulationEvent};
use super::geometric_utils::Position;
use super::organism::{MAX_HEALTH, Organism, OrganismId};
use super::species::TrophicRole;

/// Health below which an organism counts as dead matter for decomposers.
pub const DEAD_MATTER_HEALTH: f32 = 30.0;

/// Whether `eater` can feed on `food`.
pub fn is_food(eater: &Organism, food: &Organism) -> bool {
    if eater.id == food.id || !food.is_alive() {
        return false;
    }
    match eater.species.role() {
        Some(TrophicRole::Herbivore) => food.species.is_producer(),
        Some(TrophicRole::Predator) => {
            eater.species.prey().contains(&food.species)
                || (eater.has_trait("adaptable-diet")
                    && food.species.role() == Some(TrophicRole::Herbivore))
        }
        Some(TrophicRole::Decomposer) => food.health < DEAD_MATTER_HEALTH,
        _ => false,
    }
}

/// Nearest food of `eater` within `range`, as an index into `population`.
pub fn nearest_food(eater: &Organism, population: &[Organism], range: f32) -> Option<(usize, f32)> {
    population
        .iter()
        .enumerate()
        .filter(|(_, other)| is_food(eater, other))
        .map(|(idx, other)| (idx, eater.distance_to(other)))
        .filter(|(_, distance)| *distance <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

struct FeedingClaim {
    eater: usize,
    food: usize,
}

/// Moves animals and resolves their meals.
///
/// Returns the surviving population and the emitted events.
pub fn resolve<R: Rng + ?Sized>(
    population: Vec<Organism>,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> (Vec<Organism>, Vec<SimulationEvent>) {
    let params = ctx.params;
    let snapshot = population;
    let mut next = snapshot.clone();
    let mut events = Vec::new();
    let mut claims = Vec::new();

    for (idx, animal) in next.iter_mut().enumerate() {
        if !animal.species.is_mobile() || !animal.is_alive() {
            continue;
        }

        let hungry = animal.hunger >= params.hunger_seek_threshold;
        let food = if hungry {
            nearest_food(&snapshot[idx], &snapshot, params.sense_range)
        } else {
            None
        };

        if let Some((food_idx, distance)) = food {
            if distance <= params.feeding_range {
                claims.push(FeedingClaim {
                    eater: idx,
                    food: food_idx,
                });
                continue;
            }
        }

        if ctx.now >= animal.next_move_at {
            let target = match food {
                Some((food_idx, _)) => snapshot[food_idx].position,
                None => wander_target(&animal.position, params.wander_radius, rng),
            };
            events.push(SimulationEvent::Movement {
                organism_id: animal.id,
                start: animal.position,
                target,
                start_time: ctx.now,
                duration: travel_time(animal, &target, ctx.interval_ms),
            });
            animal.target_position = Some(target);
            animal.next_move_at = ctx.now + params.movement_cooldown_ms / f64::from(ctx.speed);
        }

        if let Some(target) = animal.target_position {
            let (position, arrived) = animal.position.step_toward(&target, animal.effective_speed());
            animal.position = position.clamped(0.0, 100.0);
            if arrived {
                animal.target_position = None;
            }
        }
    }

    let mut claimed: HashSet<OrganismId> = HashSet::new();
    for claim in claims {
        let food_id = next[claim.food].id;
        if claimed.contains(&food_id) || !next[claim.food].is_alive() || !next[claim.eater].is_alive() {
            continue;
        }
        claimed.insert(food_id);
        events.extend(feed(&mut next, claim, ctx));
    }

    for dead in next.iter().filter(|org| !org.is_alive()) {
        events.push(SimulationEvent::Death {
            organism_id: dead.id,
            species: dead.species,
            position: dead.position,
            timestamp: ctx.now,
        });
    }
    next.retain(Organism::is_alive);

    (next, events)
}

fn feed(population: &mut [Organism], claim: FeedingClaim, ctx: &TickContext<'_>) -> Vec<SimulationEvent> {
    let params = ctx.params;
    let eater = &population[claim.eater];
    let eater_id = eater.id;
    let damage = match eater.species.role() {
        Some(TrophicRole::Predator) if eater.has_trait("efficient-hunter") => {
            params.predation_damage * 1.5
        }
        Some(TrophicRole::Predator) => params.predation_damage,
        Some(TrophicRole::Herbivore) => params.grazing_damage,
        _ => 0.0,
    };
    let predation = eater.species.role() == Some(TrophicRole::Predator);

    let food = &mut population[claim.food];
    food.adjust_health(-damage);
    let food_id = food.id;
    let food_position = food.position;
    let food_killed = !food.is_alive();

    let eater = &mut population[claim.eater];
    eater.hunger = 0.0;
    eater.health = (eater.health + params.feeding_health_gain).min(MAX_HEALTH);
    eater.last_meal_at = Some(ctx.now);
    eater.target_position = None;

    let mut events = vec![SimulationEvent::Feeding {
        predator_id: eater_id,
        prey_id: Some(food_id),
        position: food_position,
        timestamp: ctx.now,
    }];

    if predation {
        events.push(SimulationEvent::Interaction {
            kind: InteractionKind::Feeding,
            organism_ids: vec![eater_id, food_id],
            position: food_position,
            timestamp: ctx.now,
            result: Some(if food_killed { "killed" } else { "wounded" }.to_string()),
        });
    }

    events
}

fn wander_target<R: Rng + ?Sized>(from: &Position, radius: f32, rng: &mut R) -> Position {
    let (dx, dy) = if radius > 0.0 {
        (
            rng.random_range(-radius..=radius),
            rng.random_range(-radius..=radius),
        )
    } else {
        (0.0, 0.0)
    };
    Position::new(from.x + dx, from.y + dy).clamped(5.0, 95.0)
}

fn travel_time(animal: &Organism, target: &Position, interval_ms: f64) -> f64 {
    let speed = animal.effective_speed();
    if speed <= 0.0 {
        return 0.0;
    }
    let ticks = (animal.position.distance(target) / speed).ceil();
    f64::from(ticks) * interval_ms
}
