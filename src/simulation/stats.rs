//! Periodic ecosystem statistics.
//!
//! Samples population and evolution metrics on a fixed simulation-time
//! interval and keeps a bounded history of them.

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

use super::evolution::MAX_STAGE;
use super::organism::Organism;
use super::species::Species;

/// One statistics sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatPoint {
    /// Simulation time of the sample, in milliseconds.
    pub timestamp: f64,
    /// Biome health at sample time.
    pub biome_health: f32,
    /// Living organisms.
    pub organism_count: usize,
    /// Living organisms per species.
    pub species_distribution: BTreeMap<Species, usize>,
    /// Living organisms per evolution stage.
    pub stage_distribution: [usize; MAX_STAGE as usize + 1],
    /// Mean adaptation points, 0 for an empty population.
    pub average_adaptation: f32,
    /// Base water level.
    pub water_level: f32,
    /// Base sunlight level.
    pub sunlight_level: f32,
}

impl StatPoint {
    /// Builds a sample from the current population and environment.
    pub fn capture(
        timestamp: f64,
        organisms: &[Organism],
        biome_health: f32,
        water_level: f32,
        sunlight_level: f32,
    ) -> Self {
        let mut species_distribution = BTreeMap::new();
        let mut stage_distribution = [0; MAX_STAGE as usize + 1];
        for org in organisms {
            *species_distribution.entry(org.species).or_insert(0) += 1;
            let stage = usize::from(org.stage.min(MAX_STAGE));
            stage_distribution[stage] += 1;
        }

        let average_adaptation = if organisms.is_empty() {
            0.0
        } else {
            organisms.iter().map(|org| org.adaptation_points).sum::<f32>() / organisms.len() as f32
        };

        Self {
            timestamp,
            biome_health,
            organism_count: organisms.len(),
            species_distribution,
            stage_distribution,
            average_adaptation,
            water_level,
            sunlight_level,
        }
    }
}

/// Records [`StatPoint`]s at a fixed interval.
#[derive(Debug, Clone, Serialize)]
pub struct StatsRecorder {
    history: VecDeque<StatPoint>,
    record_interval_ms: f64,
    max_history: usize,
    last_recorded: Option<f64>,
}

impl StatsRecorder {
    /// Creates an empty recorder.
    pub fn new(record_interval_ms: f64, max_history: usize) -> Self {
        Self {
            history: VecDeque::new(),
            record_interval_ms,
            max_history,
            last_recorded: None,
        }
    }

    /// Whether a new sample is due at `now`.
    pub fn is_due(&self, now: f64) -> bool {
        self.last_recorded
            .is_none_or(|last| now - last >= self.record_interval_ms)
    }

    /// Stores `point` if a sample is due.
    ///
    /// # Returns
    ///
    /// `true` when the point was recorded.
    pub fn maybe_record(&mut self, point: impl FnOnce() -> StatPoint, now: f64) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.history.push_back(point());
        self.last_recorded = Some(now);
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
        true
    }

    /// Changes the sampling interval.
    pub fn set_interval(&mut self, record_interval_ms: f64) {
        self.record_interval_ms = record_interval_ms;
    }

    /// Sampling interval, in milliseconds.
    pub fn interval(&self) -> f64 {
        self.record_interval_ms
    }

    /// Drops every recorded sample.
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_recorded = None;
    }

    /// All samples, oldest first.
    pub fn history(&self) -> &VecDeque<StatPoint> {
        &self.history
    }

    /// Samples taken during the last `minutes` before `now`.
    pub fn recent(&self, minutes: f64, now: f64) -> Vec<&StatPoint> {
        let cutoff = now - minutes * 60.0 * 1000.0;
        self.history
            .iter()
            .filter(|point| point.timestamp >= cutoff)
            .collect()
    }

    /// Sample with the highest average adaptation, if any.
    pub fn peak_adaptation(&self) -> Option<&StatPoint> {
        self.history
            .iter()
            .max_by(|a, b| a.average_adaptation.total_cmp(&b.average_adaptation))
    }
}
