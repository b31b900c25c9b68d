//! Event log tracking recently emitted events for display.
//!
//! The engine only emits events; this log is the consumer-side retention
//! policy, dropping events older than a display window.

use serde::Serialize;
use std::collections::VecDeque;

use super::events::{SimulationEvent, TickEvents};

/// Recent events of one kind, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<SimulationEvent>,
    /// Maximum number of events to keep
    max_events: usize,
    /// How long an event stays visible, in milliseconds
    display_window_ms: f64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(20, 3000.0)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity and display window
    pub fn new(max_events: usize, display_window_ms: f64) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
            display_window_ms,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, event: SimulationEvent) {
        self.events.push_front(event);

        // Keep only the most recent events
        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Drops every event older than the display window at `now`
    pub fn prune(&mut self, now: f64) {
        let cutoff = now - self.display_window_ms;
        self.events.retain(|event| event.timestamp() >= cutoff);
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<SimulationEvent> {
        &self.events
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Recent reproduction, feeding and movement events shown to observers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecentEvents {
    /// Recent births.
    pub reproduction: EventLog,
    /// Recent meals.
    pub feeding: EventLog,
    /// Recent movement starts.
    pub movement: EventLog,
}

impl RecentEvents {
    /// Creates empty logs sharing one capacity and display window.
    pub fn new(max_events: usize, display_window_ms: f64) -> Self {
        Self {
            reproduction: EventLog::new(max_events, display_window_ms),
            feeding: EventLog::new(max_events, display_window_ms),
            movement: EventLog::new(max_events, display_window_ms),
        }
    }

    /// Records a tick's events and expires stale ones.
    pub fn record(&mut self, events: &TickEvents, now: f64) {
        for event in &events.reproduction {
            self.reproduction.log(event.clone());
        }
        for event in &events.feeding {
            self.feeding.log(event.clone());
        }
        for event in &events.movement {
            self.movement.log(event.clone());
        }
        self.prune(now);
    }

    /// Expires stale events from every log.
    pub fn prune(&mut self, now: f64) {
        self.reproduction.prune(now);
        self.feeding.prune(now);
        self.movement.prune(now);
    }
}
