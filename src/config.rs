//! Tunables of a run and the two presets observed on real hardware.
//!
//! A `Config` is checked once by [`Config::validate`] (called from
//! [`Builder::build`](crate::builder::Builder::build)); afterwards the game
//! assumes every field is within range.

use core::fmt;

use crate::world::MAX_WORLD_LEN;

/// Probability of a single obstacle trial, `numerator / denominator`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Chance {
    pub numerator: u8,
    pub denominator: u8,
}

impl Chance {
    pub const fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub const fn never() -> Self {
        Self::new(0, 1)
    }

    pub const fn always() -> Self {
        Self::new(1, 1)
    }

    /// Judge a trial from a uniformly drawn byte
    #[inline]
    pub fn hits(&self, draw: u8) -> bool {
        draw % self.denominator < self.numerator
    }
}

/// How the next difficulty threshold is chosen after a step
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ramp {
    /// Step every `period_ms`, measured from the previous step
    Reset { period_ms: u32 },
    /// First step at `first_ms`, every following one `increment_ms` later
    Advance { first_ms: u32, increment_ms: u32 },
}

/// Inter-tick delay and how fast it shrinks
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pace {
    pub initial_wait_ms: u32,
    pub min_wait_ms: u32,
    pub step_ms: u32,
    pub ramp: Ramp,
}

/// Arrangement of the two display rows
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Row 0 shows the score, the player always stays on the track row
    ScoreBar,
    /// Row 0 is a short lane the player jumps into, score in its last columns
    SkyLane,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub world_len: usize,
    pub obstacle_chance: Chance,
    pub jump_ticks: u8,
    pub pace: Pace,
    pub layout: Layout,
    /// How long each game-over chirp is held
    pub game_over_tone_ms: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    /// 1-in-5 obstacles, speed-up every 3 s
    Classic,
    /// 1-in-4 obstacles, speed-ups drift further apart
    Brisk,
}

impl Config {
    pub const fn classic() -> Self {
        Self {
            world_len: 16,
            obstacle_chance: Chance::new(1, 5),
            jump_ticks: 2,
            pace: Pace {
                initial_wait_ms: 300,
                min_wait_ms: 50,
                step_ms: 10,
                ramp: Ramp::Reset { period_ms: 3000 },
            },
            layout: Layout::SkyLane,
            game_over_tone_ms: 150,
        }
    }

    pub const fn brisk() -> Self {
        Self {
            world_len: 16,
            obstacle_chance: Chance::new(1, 4),
            jump_ticks: 2,
            pace: Pace {
                initial_wait_ms: 250,
                min_wait_ms: 40,
                step_ms: 15,
                ramp: Ramp::Advance {
                    first_ms: 2000,
                    increment_ms: 2000,
                },
            },
            layout: Layout::ScoreBar,
            game_over_tone_ms: 150,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_len == 0 || self.world_len > MAX_WORLD_LEN {
            return Err(ConfigError::WorldLength);
        }
        let chance = self.obstacle_chance;
        if chance.denominator == 0 || chance.numerator > chance.denominator {
            return Err(ConfigError::ObstacleChance);
        }
        if self.jump_ticks == 0 {
            return Err(ConfigError::JumpDuration);
        }
        let pace = &self.pace;
        if pace.initial_wait_ms == 0 {
            return Err(ConfigError::InitialWait);
        }
        if pace.min_wait_ms == 0 || pace.min_wait_ms > pace.initial_wait_ms {
            return Err(ConfigError::WaitFloor);
        }
        match pace.ramp {
            Ramp::Reset { period_ms: 0 } => Err(ConfigError::RampInterval),
            Ramp::Advance { increment_ms: 0, .. } => Err(ConfigError::RampInterval),
            _ => Ok(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::classic()
    }
}

impl From<Preset> for Config {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self::classic(),
            Preset::Brisk => Self::brisk(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    WorldLength,
    ObstacleChance,
    JumpDuration,
    InitialWait,
    WaitFloor,
    RampInterval,
}

impl ConfigError {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ConfigError::WorldLength => "World length must be between 1 and 32 cells",
            ConfigError::ObstacleChance => "Obstacle chance must lie within [0, 1]",
            ConfigError::JumpDuration => "Jump must last at least one tick",
            ConfigError::InitialWait => "Initial wait time must be positive",
            ConfigError::WaitFloor => "Wait floor must be positive and not above initial wait",
            ConfigError::RampInterval => "Difficulty ramp interval must be positive",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
