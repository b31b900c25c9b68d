//! Domain events emitted by the engine.
//!
//! Events are collected while a tick runs and handed to the caller once the
//! tick commits. Retention and expiry are left to the consumer.

use serde::{Deserialize, Serialize};

use super::geometric_utils::Position;
use super::organism::OrganismId;
use super::species::Species;

/// Kind of a generic organism interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// One organism ate another.
    Feeding,
    /// Two organisms mated.
    Mating,
}

/// Events that describe what happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// Two organisms produced offspring.
    Reproduction {
        /// IDs of both parents.
        parent_ids: [OrganismId; 2],
        /// ID of the newborn.
        offspring_id: OrganismId,
        /// Species of the family.
        species: Species,
        /// Where the newborn appeared.
        position: Position,
        /// Simulation time, in milliseconds.
        timestamp: f64,
    },
    /// An organism ate.
    Feeding {
        /// ID of the eater.
        predator_id: OrganismId,
        /// ID of the eaten organism, if any.
        prey_id: Option<OrganismId>,
        /// Where the meal took place.
        position: Position,
        /// Simulation time, in milliseconds.
        timestamp: f64,
    },
    /// An organism set off toward a new target.
    Movement {
        /// ID of the moving organism.
        organism_id: OrganismId,
        /// Where the move started.
        start: Position,
        /// Where the organism is heading.
        target: Position,
        /// Simulation time the move started, in milliseconds.
        start_time: f64,
        /// Expected duration of the move, in milliseconds.
        duration: f64,
    },
    /// Generic interaction between organisms.
    Interaction {
        /// What kind of interaction it was.
        kind: InteractionKind,
        /// IDs of everyone involved.
        organism_ids: Vec<OrganismId>,
        /// Where it took place.
        position: Position,
        /// Simulation time, in milliseconds.
        timestamp: f64,
        /// Outcome, if notable.
        result: Option<String>,
    },
    /// An organism climbed an evolution stage.
    Evolution {
        /// ID of the organism.
        organism_id: OrganismId,
        /// Its species.
        species: Species,
        /// Stage before the advance.
        from_stage: u8,
        /// Stage after the advance.
        to_stage: u8,
        /// Simulation time, in milliseconds.
        timestamp: f64,
    },
    /// An organism died and was removed.
    Death {
        /// ID of the organism.
        organism_id: OrganismId,
        /// Its species.
        species: Species,
        /// Where it died.
        position: Position,
        /// Simulation time, in milliseconds.
        timestamp: f64,
    },
}

impl SimulationEvent {
    /// Simulation time at which the event happened.
    pub fn timestamp(&self) -> f64 {
        match self {
            Self::Reproduction { timestamp, .. }
            | Self::Feeding { timestamp, .. }
            | Self::Interaction { timestamp, .. }
            | Self::Evolution { timestamp, .. }
            | Self::Death { timestamp, .. } => *timestamp,
            Self::Movement { start_time, .. } => *start_time,
        }
    }
}

/// Queue for collecting simulation events during a tick.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Adds every event from `events`.
    pub fn extend(&mut self, events: impl IntoIterator<Item = SimulationEvent>) {
        self.events.extend(events);
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SimulationEvent> {
        self.events.drain(..)
    }

    /// Splits the queue into per-kind lists.
    pub fn into_tick_events(mut self) -> TickEvents {
        let mut grouped = TickEvents::default();
        for event in self.drain() {
            grouped.push(event);
        }
        grouped
    }
}

/// Events of one tick grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickEvents {
    /// Births.
    pub reproduction: Vec<SimulationEvent>,
    /// Meals.
    pub feeding: Vec<SimulationEvent>,
    /// Movement starts.
    pub movement: Vec<SimulationEvent>,
    /// Generic interactions.
    pub interactions: Vec<SimulationEvent>,
    /// Stage advances.
    pub evolution: Vec<SimulationEvent>,
    /// Deaths.
    pub deaths: Vec<SimulationEvent>,
}

impl TickEvents {
    /// Files `event` under its kind.
    pub fn push(&mut self, event: SimulationEvent) {
        match event {
            SimulationEvent::Reproduction { .. } => self.reproduction.push(event),
            SimulationEvent::Feeding { .. } => self.feeding.push(event),
            SimulationEvent::Movement { .. } => self.movement.push(event),
            SimulationEvent::Interaction { .. } => self.interactions.push(event),
            SimulationEvent::Evolution { .. } => self.evolution.push(event),
            SimulationEvent::Death { .. } => self.deaths.push(event),
        }
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.reproduction.len()
            + self.feeding.len()
            + self.movement.len()
            + self.interactions.len()
            + self.evolution.len()
            + self.deaths.len()
    }

    /// Whether no event happened.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every event, grouped by kind.
    pub fn iter(&self) -> impl Iterator<Item = &SimulationEvent> {
        self.reproduction
            .iter()
            .chain(&self.feeding)
            .chain(&self.movement)
            .chain(&self.interactions)
            .chain(&self.evolution)
            .chain(&self.deaths)
    }
}
