//! Endless-runner game core for a two-row character display.
//!
//! The game loop lives in [`Runner`]; everything it needs from the hardware
//! goes through a [`Context`], while interrupt handlers share a millisecond
//! clock, the jump request and the game-over tone gate through [`Signals`].

#![no_std]

#[cfg(test)]
extern crate std;

pub mod builder;
pub mod collision;
pub mod config;
pub mod context;
pub mod difficulty;
pub mod frame;
pub mod glyph;
pub mod jump;
pub mod render;
pub mod runner;
pub mod signals;
pub mod state;
pub mod tone;
pub mod world;

pub use builder::Builder;
pub use config::{Config, Preset};
pub use context::Context;
pub use frame::Frame;
pub use runner::{Outcome, Runner, Summary};
pub use signals::Signals;
pub use tone::{SquareWave, Tone, ToneOutput, GAME_OVER_TONE, JUMP_TONE};

#[cfg(feature = "embedded-graphics")]
pub use embedded_graphics;
pub use nb;
