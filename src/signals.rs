//! Values crossing the boundary between interrupt handlers and the game loop.
//!
//! Every field is a single-word atomic so handlers never block. `Signals::new`
//! is `const`, which lets firmware keep one instance in a `static` and hand
//! out `&'static` references to both sides.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[derive(Debug)]
pub struct Signals {
    elapsed_ms: AtomicU32,
    tone_request: AtomicBool,
    jump_request: AtomicBool,
}

impl Signals {
    pub const fn new() -> Self {
        Self {
            elapsed_ms: AtomicU32::new(0),
            tone_request: AtomicBool::new(false),
            jump_request: AtomicBool::new(false),
        }
    }

    /// Millisecond timer interrupt
    #[inline]
    pub fn on_millisecond(&self) {
        self.elapsed_ms.fetch_add(1, Ordering::Relaxed);
    }

    /// Jump button edge interrupt
    #[inline]
    pub fn on_jump_edge(&self) {
        self.jump_request.store(true, Ordering::Release);
    }

    #[inline]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms.load(Ordering::Relaxed)
    }

    /// Gate of the game-over tone generator
    #[inline]
    pub fn tone_requested(&self) -> bool {
        self.tone_request.load(Ordering::Acquire)
    }

    #[inline]
    pub fn jump_pending(&self) -> bool {
        self.jump_request.load(Ordering::Acquire)
    }

    pub(crate) fn set_tone_request(&self, on: bool) {
        self.tone_request.store(on, Ordering::Release);
    }

    /// Consume a latched jump request, each edge is observed once
    pub(crate) fn take_jump_request(&self) -> bool {
        self.jump_request.swap(false, Ordering::AcqRel)
    }

    /// Return to power-on values
    ///
    /// Callers run this inside a critical section together with the rest of the
    /// restart so no handler sees a half-reset state.
    pub(crate) fn reset(&self) {
        self.elapsed_ms.store(0, Ordering::Relaxed);
        self.tone_request.store(false, Ordering::Release);
        self.jump_request.store(false, Ordering::Release);
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}
