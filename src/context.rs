//! Context for accessing functionalities of the platform the game runs on.
//!
//! Interrupt-driven parts (clock, tone generators, jump edge) are not part of
//! it; those talk to the game through [`Signals`](crate::signals::Signals).

use core::convert::Infallible;

use crate::frame::Frame;

/// Trait aggregating platform functionalities
pub trait Context {
    /// Show a frame on the character display
    ///
    /// Called by `tick` once per tick and by `game_over` for each screen
    fn on_frame(&mut self, frame: &Frame);
    /// Block for `ms` milliseconds
    ///
    /// Called by `tick` with the current wait time, and between game-over chirps
    fn delay_ms(&mut self, ms: u32);
    /// Sample the restart input
    ///
    /// `WouldBlock` while released
    fn poll_restart(&mut self) -> nb::Result<(), Infallible>;
    /// Sleep until something may have changed, e.g. the next interrupt
    ///
    /// Called between restart polls instead of spinning
    fn wait_for_event(&mut self);
    /// Generate random 8-bit number
    ///
    /// Called by `tick` for each obstacle trial
    fn gen_random(&mut self) -> u8;
}
