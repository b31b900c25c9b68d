//! # Biome - Ecosystem Simulation Engine
//!
//! A tick-based simulation of a small biome. Organisms of sixteen species live
//! on a 0-100 surface, lose or gain health from water, sunlight and their
//! neighbours, gain adaptation points under environmental stress, evolve
//! through three stages and reproduce with nearby mates.
//!
//! ## Features
//!
//! - Deterministic ticks driven by a seedable RNG
//! - Parallel per-organism updates against a tick-start snapshot
//! - Four-season cycle modulating water, sunlight and growth
//! - Trophic balance scoring of biome health
//! - Optional movement and feeding behaviour for animals
//! - Periodic statistics and short-lived event logs for observers
//! - JSON load/save of simulation parameters
//!
//! ## Core Modules
//!
//! - [`simulation::ecosystem`] - Tick function and command surface
//! - [`simulation::organism`] - Organism state
//! - [`simulation::evolution`] - Stage tables and evolution rule
//! - [`simulation::environment`] - Biome, seasons and effective conditions
//! - [`simulation::reproduction`] - Mating rules and offspring
//! - [`simulation::events`] - Events emitted by a tick

/// Core simulation logic and data structures.
pub mod simulation {
    /// Adaptation points earned under environmental stress.
    pub mod adaptation;
    /// Trophic balance and biome health scoring.
    pub mod balance;
    /// Movement and feeding of animals.
    pub mod behavior;
    /// Tick timer and simulation speed.
    pub mod clock;
    /// Main ecosystem simulation with parallel updates.
    pub mod ecosystem;
    /// Biome types, seasons and effective environment.
    pub mod environment;
    /// Time-windowed logs of recent events.
    pub mod event_log;
    /// Events emitted by a tick.
    pub mod events;
    /// Evolution stage tables per species.
    pub mod evolution;
    /// Positions on the simulation surface.
    pub mod geometric_utils;
    /// Organism state and lifecycle.
    pub mod organism;
    /// Simulation parameters.
    pub mod params;
    /// Operator placement of new organisms.
    pub mod placement;
    /// Mating eligibility, chance and offspring.
    pub mod reproduction;
    /// Species catalogue.
    pub mod species;
    /// Periodic ecosystem statistics.
    pub mod stats;
}
