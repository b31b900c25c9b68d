//! Main ecosystem simulation and its tick function.
//!
//! The ecosystem owns the population, the environment and the RNG. Each tick:
//! - reads a snapshot of the population taken at tick start
//! - updates health, hunger and adaptation of every organism in parallel
//! - removes the dead
//! - moves animals and resolves their meals
//! - pairs mates and creates offspring
//! - rescores biome health
//!
//! Callers observe the result through [`Snapshot`] and drive it with the
//! command methods on [`Ecosystem`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, trace, warn};

use super::adaptation;
use super::balance;
use super::behavior;
use super::clock::TickClock;
use super::environment::{
    BiomeType, EffectiveEnvironment, Environment, Season, environment_factor,
};
use super::event_log::RecentEvents;
use super::events::{EventQueue, InteractionKind, SimulationEvent, TickEvents};
use super::geometric_utils::Position;
use super::organism::{MAX_HEALTH, MAX_HUNGER, Organism, OrganismId};
use super::params::Params;
use super::placement;
use super::reproduction;
use super::species::{Species, TrophicRole};
use super::stats::{StatPoint, StatsRecorder};

/// Read-only inputs shared by every step of one tick.
#[derive(Debug, Clone)]
pub struct TickContext<'a> {
    /// Simulation time of this tick, in milliseconds.
    pub now: f64,
    /// Simulation speed multiplier.
    pub speed: f32,
    /// Length of this tick, in milliseconds.
    pub interval_ms: f64,
    /// Seasonally adjusted environment.
    pub env: EffectiveEnvironment,
    /// Simulation parameters.
    pub params: &'a Params,
}

/// Result of one tick, ready to be committed.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Surviving organisms followed by newborns.
    pub organisms: Vec<Organism>,
    /// Recomputed biome health.
    pub biome_health: f32,
    /// Everything that happened.
    pub events: TickEvents,
    /// Next unused organism ID.
    pub next_id: OrganismId,
}

/// Facts about the tick-start population that health rules depend on.
#[derive(Debug, Clone, Default)]
pub struct Presence {
    species: HashSet<Species>,
    has_herbivore: bool,
    has_dead_matter: bool,
}

impl Presence {
    /// Surveys `population`.
    pub fn of(population: &[Organism]) -> Self {
        let mut presence = Self::default();
        for org in population {
            presence.species.insert(org.species);
            if org.species.role() == Some(TrophicRole::Herbivore) {
                presence.has_herbivore = true;
            }
            if org.health < behavior::DEAD_MATTER_HEALTH {
                presence.has_dead_matter = true;
            }
        }
        presence
    }

    /// Whether any producer exists.
    pub fn has_producer(&self) -> bool {
        self.species.iter().any(|s| s.is_producer())
    }

    /// Whether `predator` has something to hunt.
    pub fn has_prey_for(&self, predator: &Organism) -> bool {
        predator
            .species
            .prey()
            .iter()
            .any(|prey| self.species.contains(prey))
            || (predator.has_trait("adaptable-diet") && self.has_herbivore)
    }

    /// Whether any organism is weak enough to count as dead matter.
    pub fn has_dead_matter(&self) -> bool {
        self.has_dead_matter
    }
}

/// Health change of `org` from its environment and neighbours, before jitter.
pub fn environmental_health_change(
    org: &Organism,
    presence: &Presence,
    env: &EffectiveEnvironment,
) -> f32 {
    match org.species.role() {
        Some(TrophicRole::Producer) => producer_health_change(org, env),
        Some(TrophicRole::Herbivore) => {
            let mut change = if presence.has_producer() { 1.0 } else { -3.0 };
            if env.water < 20.0 && !org.has_trait("water-efficient") {
                change -= 2.0;
            }
            change
        }
        Some(TrophicRole::Predator) => {
            if presence.has_prey_for(org) {
                1.0
            } else {
                -2.0
            }
        }
        Some(TrophicRole::Decomposer) => {
            let mut change = 0.0;
            if presence.has_dead_matter() {
                change += 2.0;
            }
            if env.water > 40.0 {
                change += 1.0;
            }
            change
        }
        None => 0.0,
    }
}

fn producer_health_change(org: &Organism, env: &EffectiveEnvironment) -> f32 {
    let mut change = 0.0;

    if env.sunlight > 90.0 {
        change += if org.has_trait("heat-resistant") { 2.0 } else { -2.0 };
    } else if env.sunlight > 70.0 {
        change += 2.0;
    } else if env.sunlight < 30.0 {
        change -= 2.0;
    }

    if env.water > 60.0 {
        change += 2.0;
    } else if env.water < 30.0 {
        let drought_proof = org.has_trait("drought-resistant") || org.has_trait("water-storing");
        change -= if drought_proof { 1.0 } else { 3.0 };
        if org.has_trait("water-efficient") {
            change += 1.0;
        }
    }

    change *= env.growth_modifier;

    if org.has_trait("fast-growing") && org.health < 50.0 {
        change += 1.0;
    }

    change
}

/// Whether the season speeds up adaptation of `species`.
pub fn seasonal_adaptation_bonus(species: Species, season: Season) -> bool {
    match season {
        Season::Winter => species.is_producer(),
        Season::Summer => matches!(species, Species::Rabbit | Species::Fox),
        _ => false,
    }
}

/// Adaptation points `org` gains this tick, including seasonal bonuses.
pub fn adaptation_gain(org: &Organism, env: &EffectiveEnvironment) -> f32 {
    if org.health <= 20.0 || org.health >= 80.0 {
        return 0.0;
    }
    let gain = adaptation::gain(org.species, org.health, env.water, env.sunlight, env.biome);
    if seasonal_adaptation_bonus(org.species, env.season) {
        gain * 1.5
    } else {
        gain
    }
}

/// Updates one organism from the tick-start snapshot.
///
/// Returns the new state and, when it evolved, the stage it left.
fn update_organism(
    org: &Organism,
    jitter: f32,
    presence: &Presence,
    ctx: &TickContext<'_>,
) -> (Organism, Option<u8>) {
    let params = ctx.params;
    let mut next = org.clone();

    let mut change = environmental_health_change(org, presence, &ctx.env) + jitter;

    if params.behaviors_enabled && org.species.is_mobile() {
        next.hunger = (org.hunger + params.hunger_rate).min(MAX_HUNGER);
        if next.hunger >= params.starvation_threshold {
            change -= params.starvation_damage;
        }
    }

    next.adaptation_points += adaptation_gain(org, &ctx.env);
    let evolved_from = next.try_evolve();

    next.health = (org.health + change).clamp(0.0, MAX_HEALTH);
    next.age_ms += ctx.interval_ms;

    (next, evolved_from)
}

/// Advances `population` by one tick.
///
/// Every per-organism read sees the tick-start `population`, never a value
/// updated earlier in the same tick. All randomness comes from `rng`.
pub fn tick<R: Rng + ?Sized>(
    population: &[Organism],
    ctx: &TickContext<'_>,
    next_id: OrganismId,
    rng: &mut R,
) -> TickOutcome {
    let mut queue = EventQueue::new();
    let presence = Presence::of(population);

    let jitters: Vec<f32> = population
        .iter()
        .map(|_| rng.random_range(-1.0..=1.0))
        .collect();

    let updated: Vec<(Organism, Option<u8>)> = population
        .par_iter()
        .zip(jitters.par_iter())
        .map(|(org, &jitter)| update_organism(org, jitter, &presence, ctx))
        .collect();

    let mut living = Vec::with_capacity(updated.len());
    for (org, evolved_from) in updated {
        if let Some(from_stage) = evolved_from {
            queue.push(SimulationEvent::Evolution {
                organism_id: org.id,
                species: org.species,
                from_stage,
                to_stage: org.stage,
                timestamp: ctx.now,
            });
        }
        if org.is_alive() {
            living.push(org);
        } else {
            queue.push(SimulationEvent::Death {
                organism_id: org.id,
                species: org.species,
                position: org.position,
                timestamp: ctx.now,
            });
        }
    }

    if ctx.params.behaviors_enabled {
        let (moved, behavior_events) = behavior::resolve(living, ctx, rng);
        living = moved;
        queue.extend(behavior_events);
    }

    let mut next_id = next_id;
    let births = resolve_reproduction(&mut living, ctx, &mut next_id, rng);
    queue.extend(births);

    let biome_health = balance::biome_health(&living);
    if !queue.is_empty() {
        trace!(events = queue.len(), "tick produced events");
    }

    TickOutcome {
        organisms: living,
        biome_health,
        events: queue.into_tick_events(),
        next_id,
    }
}

/// Pairs mates and appends their offspring to `population`.
fn resolve_reproduction<R: Rng + ?Sized>(
    population: &mut Vec<Organism>,
    ctx: &TickContext<'_>,
    next_id: &mut OrganismId,
    rng: &mut R,
) -> Vec<SimulationEvent> {
    let params = ctx.params;
    let cooldown = params.reproduction_cooldown_ms / f64::from(ctx.speed);
    let factor = environment_factor(&ctx.env);

    let mut counts: HashMap<Species, usize> = HashMap::new();
    for org in population.iter() {
        *counts.entry(org.species).or_insert(0) += 1;
    }

    let mut bred: HashSet<OrganismId> = HashSet::new();
    let mut newborns = Vec::new();
    let mut events = Vec::new();

    for i in 0..population.len() {
        let parent = &population[i];
        if bred.contains(&parent.id) || !parent.reproduction_ready(ctx.now, cooldown) {
            continue;
        }
        let species_count = counts.get(&parent.species).copied().unwrap_or(0);
        if species_count >= params.population_cap(parent.species) {
            continue;
        }

        let mate = population
            .iter()
            .enumerate()
            .filter(|(j, other)| {
                *j != i
                    && !bred.contains(&other.id)
                    && other.reproduction_ready(ctx.now, cooldown)
                    && reproduction::eligible(parent, other, params)
            })
            .min_by(|a, b| parent.distance_to(a.1).total_cmp(&parent.distance_to(b.1)))
            .map(|(j, _)| j);
        let Some(j) = mate else {
            continue;
        };

        let chance = reproduction::chance(parent, &population[j], factor, params);
        if !reproduction::succeeds(chance, ctx.speed, rng.random()) {
            continue;
        }

        let child = reproduction::offspring(parent, &population[j], *next_id, ctx.now, params, rng);
        *next_id += 1;

        for idx in [i, j] {
            let parent = &mut population[idx];
            parent.health = (parent.health - params.reproduction_health_cost)
                .max(params.reproduction_health_floor);
            parent.last_reproduction_at = Some(ctx.now);
            bred.insert(parent.id);
        }

        *counts.entry(child.species).or_insert(0) += 1;
        events.push(SimulationEvent::Interaction {
            kind: InteractionKind::Mating,
            organism_ids: vec![population[i].id, population[j].id],
            position: population[i].position,
            timestamp: ctx.now,
            result: None,
        });
        events.push(SimulationEvent::Reproduction {
            parent_ids: [population[i].id, population[j].id],
            offspring_id: child.id,
            species: child.species,
            position: child.position,
            timestamp: ctx.now,
        });
        newborns.push(child);
    }

    population.extend(newborns);
    events
}

/// Read-only view of the simulation handed to observers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Habitat type.
    pub biome_type: BiomeType,
    /// Aggregate biome health, 10 to 100.
    pub biome_health: f32,
    /// Living organisms.
    pub organisms: Vec<Organism>,
    /// Base water level.
    pub water_level: f32,
    /// Base sunlight level.
    pub sunlight_level: f32,
    /// Simulation speed multiplier.
    pub simulation_speed: f32,
    /// Whether ticks are suspended.
    pub is_paused: bool,
    /// Current season.
    pub current_season: Season,
    /// Progress through the current season, 0 to 100.
    pub season_progress: f32,
    /// Simulation time, in milliseconds.
    pub time: f64,
    /// Recent births.
    pub reproduction_events: Vec<SimulationEvent>,
    /// Recent meals.
    pub feeding_events: Vec<SimulationEvent>,
    /// Recent movement starts.
    pub movement_events: Vec<SimulationEvent>,
}

/// The main ecosystem containing all simulation state.
#[derive(Debug, Clone)]
pub struct Ecosystem {
    /// All living organisms.
    pub organisms: Vec<Organism>,
    /// Operator-set environment and season cycle.
    pub environment: Environment,
    /// Aggregate biome health, 10 to 100.
    pub biome_health: f32,
    /// Total simulation time elapsed, in milliseconds.
    pub time: f64,
    /// Number of ticks executed.
    pub tick_count: u64,
    next_id: OrganismId,
    clock: TickClock,
    recent: RecentEvents,
    stats: StatsRecorder,
    rng: ChaCha8Rng,
    params: Params,
}

impl Ecosystem {
    /// Creates an empty ecosystem.
    ///
    /// The RNG is seeded from `params.rng_seed`, or from entropy when unset.
    /// Invalid parameters are logged; a tick interval that is not positive
    /// leaves the clock stopped.
    pub fn new(params: Params) -> Self {
        if let Err(err) = params.validate() {
            warn!(%err, "ecosystem created with invalid params");
        }
        let seed = params.rng_seed.unwrap_or_else(rand::random);
        debug!(seed, "seeding ecosystem rng");

        Self {
            organisms: Vec::new(),
            environment: Environment::new(
                params.initial_water_level,
                params.initial_sunlight_level,
                params.initial_biome,
                params.season_length_ms,
            ),
            biome_health: 75.0,
            time: 0.0,
            tick_count: 0,
            next_id: 0,
            clock: TickClock::new(params.base_interval_ms, params.initial_speed),
            recent: RecentEvents::new(params.max_logged_events, params.event_display_ms),
            stats: StatsRecorder::new(params.stats_interval_ms, params.stats_history),
            rng: ChaCha8Rng::seed_from_u64(seed),
            params,
        }
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Recorded statistics.
    pub fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    /// Mutable access to the statistics recorder.
    pub fn stats_mut(&mut self) -> &mut StatsRecorder {
        &mut self.stats
    }

    /// Recently emitted events.
    pub fn recent_events(&self) -> &RecentEvents {
        &self.recent
    }

    /// Tick timer.
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// Environment as the next tick will see it.
    pub fn effective_environment(&self) -> EffectiveEnvironment {
        self.environment.effective()
    }

    /// Looks up a living organism.
    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.iter().find(|org| org.id == id)
    }

    /// Runs one tick and commits its result.
    ///
    /// Does nothing while paused. Season progress is driven by
    /// [`Ecosystem::advance`], not by this method.
    pub fn step(&mut self) -> TickEvents {
        if self.clock.is_paused() {
            return TickEvents::default();
        }

        let interval_ms = self.clock.interval_ms();
        self.time += interval_ms;

        let ctx = TickContext {
            now: self.time,
            speed: self.clock.speed(),
            interval_ms,
            env: self.environment.effective(),
            params: &self.params,
        };
        let outcome = tick(&self.organisms, &ctx, self.next_id, &mut self.rng);

        debug!(
            tick = self.tick_count,
            population = outcome.organisms.len(),
            births = outcome.events.reproduction.len(),
            deaths = outcome.events.deaths.len(),
            meals = outcome.events.feeding.len(),
            biome_health = outcome.biome_health,
            "tick committed"
        );
        for event in &outcome.events.evolution {
            if let SimulationEvent::Evolution {
                organism_id,
                species,
                to_stage,
                ..
            } = event
            {
                info!(organism_id, %species, stage = to_stage, "organism evolved");
            }
        }

        self.organisms = outcome.organisms;
        self.biome_health = outcome.biome_health;
        self.next_id = outcome.next_id;
        self.tick_count += 1;

        self.recent.record(&outcome.events, self.time);
        let (organisms, biome_health, env, time) =
            (&self.organisms, self.biome_health, &self.environment, self.time);
        self.stats.maybe_record(
            || StatPoint::capture(time, organisms, biome_health, env.water_level, env.sunlight_level),
            time,
        );

        outcome.events
    }

    /// Reports `elapsed_ms` of host time and runs every tick that became due.
    ///
    /// Seasons only progress while the simulation is running. Season time is
    /// handed out tick by tick, so each tick sees the season in effect at the
    /// moment it fired however the host slices elapsed time.
    pub fn advance(&mut self, elapsed_ms: f64) -> TickEvents {
        if self.clock.is_paused() {
            return TickEvents::default();
        }

        let interval = self.clock.interval_ms();
        let mut until_tick = interval - self.clock.pending_ms();
        let due = self.clock.advance(elapsed_ms);
        let mut remaining = elapsed_ms;

        let mut events = TickEvents::default();
        for _ in 0..due {
            self.advance_season(until_tick);
            remaining -= until_tick;
            until_tick = interval;

            let tick_events = self.step();
            for event in tick_events.iter() {
                events.push(event.clone());
            }
        }
        self.advance_season(remaining);
        events
    }

    fn advance_season(&mut self, elapsed_ms: f64) {
        if let Some(season) = self
            .environment
            .seasons
            .advance(elapsed_ms, self.clock.speed())
        {
            info!(%season, "season changed");
        }
    }

    /// Builds a read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            biome_type: self.environment.biome,
            biome_health: self.biome_health,
            organisms: self.organisms.clone(),
            water_level: self.environment.water_level,
            sunlight_level: self.environment.sunlight_level,
            simulation_speed: self.clock.speed(),
            is_paused: self.clock.is_paused(),
            current_season: self.environment.season(),
            season_progress: self.environment.seasons.progress(),
            time: self.time,
            reproduction_events: self.recent.reproduction.events().iter().cloned().collect(),
            feeding_events: self.recent.feeding.events().iter().cloned().collect(),
            movement_events: self.recent.movement.events().iter().cloned().collect(),
        }
    }

    /// Places a new organism by species name.
    ///
    /// Unrecognised names are placed as [`Species::Unknown`].
    pub fn place_organism(&mut self, species: &str, position: Position) -> bool {
        self.place(Species::from_name(species), position)
    }

    /// Places a new organism if the spot is free and the environment suits it.
    pub fn place(&mut self, species: Species, position: Position) -> bool {
        let env = self.environment.effective();
        let placed = placement::try_place(
            species,
            position,
            &mut self.organisms,
            &env,
            &self.params,
            self.next_id,
            self.time,
        );
        if placed {
            self.next_id += 1;
        }
        placed
    }

    /// Removes an organism; unknown IDs are ignored.
    pub fn remove_organism(&mut self, id: OrganismId) {
        self.organisms.retain(|org| org.id != id);
    }

    /// Sets the base water level, clamped to 0..=100.
    pub fn set_water_level(&mut self, level: f32) {
        self.environment.set_water_level(level);
    }

    /// Sets the base sunlight level, clamped to 0..=100.
    pub fn set_sunlight_level(&mut self, level: f32) {
        self.environment.set_sunlight_level(level);
    }

    /// Changes the habitat type.
    pub fn set_biome(&mut self, biome: BiomeType) {
        self.environment.biome = biome;
    }

    /// Sets the speed multiplier, clamped to 1..=10.
    ///
    /// Takes effect from the next tick.
    pub fn set_simulation_speed(&mut self, speed: f32) {
        self.clock.set_speed(speed);
        info!(speed = self.clock.speed(), "simulation speed changed");
    }

    /// Pauses a running simulation or resumes a paused one.
    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
        info!(paused = self.clock.is_paused(), "pause toggled");
    }

    /// Whether ticks are suspended.
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Jumps to `season`, restarting its progress.
    pub fn force_season(&mut self, season: Season) {
        self.environment.seasons.force(season);
        info!(%season, "season forced");
    }

    /// Changes the season length at speed 1.
    pub fn set_season_length(&mut self, season_length_ms: f64) {
        self.environment.seasons.set_season_length(season_length_ms);
    }
}
