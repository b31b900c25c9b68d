//! Environment scalars, the season cycle and derived suitability factors.
//!
//! The operator sets base water and sunlight levels. The current season adds
//! its modifiers on top to produce the effective environment every tick reads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Habitat type of the biome surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomeType {
    /// Temperate woodland.
    #[default]
    Forest,
    /// Arid sand and rock.
    Desert,
    /// Open water.
    Ocean,
}

/// One of the four seasons, cycling in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Wet, bright and fertile.
    #[default]
    Spring,
    /// Dry and very bright.
    Summer,
    /// Mild rain, fading light.
    Autumn,
    /// Dark and barren.
    Winter,
}

/// Fixed modifiers a season applies to the environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonData {
    /// Added to the base water level.
    pub water_modifier: f32,
    /// Added to the base sunlight level.
    pub sunlight_modifier: f32,
    /// Multiplies producer health deltas.
    pub growth_modifier: f32,
    /// Multiplies the reproduction environment factor.
    pub reproduction_factor: f32,
    /// Display icon.
    pub icon: &'static str,
}

impl Season {
    /// Seasons in cycle order.
    pub const CYCLE: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Season that follows this one.
    pub fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// Modifiers of this season.
    pub fn data(self) -> SeasonData {
        match self {
            Self::Spring => SeasonData {
                water_modifier: 15.0,
                sunlight_modifier: 10.0,
                growth_modifier: 1.5,
                reproduction_factor: 1.5,
                icon: "🌱",
            },
            Self::Summer => SeasonData {
                water_modifier: -10.0,
                sunlight_modifier: 25.0,
                growth_modifier: 1.2,
                reproduction_factor: 1.0,
                icon: "☀️",
            },
            Self::Autumn => SeasonData {
                water_modifier: 5.0,
                sunlight_modifier: -5.0,
                growth_modifier: 0.8,
                reproduction_factor: 0.7,
                icon: "🍂",
            },
            Self::Winter => SeasonData {
                water_modifier: 0.0,
                sunlight_modifier: -20.0,
                growth_modifier: 0.4,
                reproduction_factor: 0.4,
                icon: "❄️",
            },
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        };
        f.write_str(name)
    }
}

/// Tracks the current season and how far through it the simulation is.
///
/// Progress is kept as season time at speed 1, so fine and coarse host time
/// slices add up to the same point in the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonClock {
    season: Season,
    /// Time spent in the current season at speed 1, in milliseconds.
    elapsed_ms: f64,
    /// Length of a season at speed 1, in milliseconds.
    season_length_ms: f64,
}

impl SeasonClock {
    /// Creates a clock at the start of spring.
    pub fn new(season_length_ms: f64) -> Self {
        Self {
            season: Season::Spring,
            elapsed_ms: 0.0,
            season_length_ms: season_length_ms.max(1.0),
        }
    }

    /// Current season.
    pub fn season(&self) -> Season {
        self.season
    }

    /// Progress through the current season, 0 to 100.
    pub fn progress(&self) -> f32 {
        (self.elapsed_ms / self.season_length_ms * 100.0) as f32
    }

    /// Season length at speed 1, in milliseconds.
    pub fn season_length_ms(&self) -> f64 {
        self.season_length_ms
    }

    /// Changes the season length; the progress percentage is kept.
    pub fn set_season_length(&mut self, season_length_ms: f64) {
        let season_length_ms = season_length_ms.max(1.0);
        self.elapsed_ms *= season_length_ms / self.season_length_ms;
        self.season_length_ms = season_length_ms;
    }

    /// Advances progress by `elapsed_ms` of host time at `speed`.
    ///
    /// Every full season crossed moves the cycle on by one and the overshoot
    /// carries into the next season. Returns the season in effect after the
    /// last change, if any happened.
    pub fn advance(&mut self, elapsed_ms: f64, speed: f32) -> Option<Season> {
        if elapsed_ms <= 0.0 {
            return None;
        }
        self.elapsed_ms += elapsed_ms * f64::from(speed.max(1.0));

        let mut changed = None;
        while self.elapsed_ms >= self.season_length_ms {
            self.elapsed_ms -= self.season_length_ms;
            self.season = self.season.next();
            changed = Some(self.season);
        }
        changed
    }

    /// Jumps straight to `season` and restarts its progress.
    pub fn force(&mut self, season: Season) {
        self.season = season;
        self.elapsed_ms = 0.0;
    }
}

/// Operator-controlled environment plus the season cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Base water level, 0 to 100.
    pub water_level: f32,
    /// Base sunlight level, 0 to 100.
    pub sunlight_level: f32,
    /// Habitat type.
    pub biome: BiomeType,
    /// Season cycle.
    pub seasons: SeasonClock,
}

/// Environment after seasonal modifiers, as read by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveEnvironment {
    /// Effective water level, 0 to 100.
    pub water: f32,
    /// Effective sunlight level, 0 to 100.
    pub sunlight: f32,
    /// Producer growth multiplier.
    pub growth_modifier: f32,
    /// Season in effect.
    pub season: Season,
    /// Habitat type.
    pub biome: BiomeType,
}

impl Environment {
    /// Creates an environment with the given base levels, clamped to 0..=100.
    pub fn new(water_level: f32, sunlight_level: f32, biome: BiomeType, season_length_ms: f64) -> Self {
        Self {
            water_level: water_level.clamp(0.0, 100.0),
            sunlight_level: sunlight_level.clamp(0.0, 100.0),
            biome,
            seasons: SeasonClock::new(season_length_ms),
        }
    }

    /// Sets the base water level, clamped to 0..=100.
    pub fn set_water_level(&mut self, level: f32) {
        self.water_level = level.clamp(0.0, 100.0);
    }

    /// Sets the base sunlight level, clamped to 0..=100.
    pub fn set_sunlight_level(&mut self, level: f32) {
        self.sunlight_level = level.clamp(0.0, 100.0);
    }

    /// Current season.
    pub fn season(&self) -> Season {
        self.seasons.season()
    }

    /// Applies the current season's modifiers to the base levels.
    pub fn effective(&self) -> EffectiveEnvironment {
        let season = self.seasons.season();
        let data = season.data();
        EffectiveEnvironment {
            water: (self.water_level + data.water_modifier).clamp(0.0, 100.0),
            sunlight: (self.sunlight_level + data.sunlight_modifier).clamp(0.0, 100.0),
            growth_modifier: data.growth_modifier,
            season,
            biome: self.biome,
        }
    }
}

/// Suitability of the environment for breeding, in 0..=1.
pub fn environment_factor(env: &EffectiveEnvironment) -> f32 {
    let mut factor = 0.7;

    if !(30.0..=70.0).contains(&env.water) {
        factor *= 0.7;
    }
    if !(40.0..=80.0).contains(&env.sunlight) {
        factor *= 0.8;
    }

    factor *= env.season.data().reproduction_factor;
    factor.min(1.0)
}
