//! Square-wave audio driven from timer interrupts.
//!
//! Pitch comes entirely from how often the owning timer fires: a handler calls
//! [`SquareWave::on_overflow`] on every expiry, which flips the line while the
//! gate is open. Two expiries make one period, so the timer runs at twice the
//! tone frequency.

use embedded_hal::digital::v2::OutputPin;

/// A fixed pitch, kept in millihertz to hold musical frequencies exactly
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tone(u32);

/// Played while the jump button is held
pub const JUMP_TONE: Tone = Tone::from_millihertz(523_251);
/// Played in short chirps on game over
pub const GAME_OVER_TONE: Tone = Tone::from_millihertz(195_998);

impl Tone {
    pub const fn from_millihertz(millihertz: u32) -> Self {
        Self(millihertz)
    }

    pub const fn from_hertz(hertz: u32) -> Self {
        Self(hertz * 1000)
    }

    pub const fn millihertz(&self) -> u32 {
        self.0
    }

    /// Countdown value for a 16-bit timer ticking at `timer_clock_hz`
    ///
    /// `None` when the tone cannot be produced by such a timer.
    pub fn reload(&self, timer_clock_hz: u32) -> Option<u16> {
        if self.0 == 0 {
            return None;
        }
        let half_period = 2 * self.0 as u64;
        let ticks = (timer_clock_hz as u64 * 1000 + self.0 as u64) / half_period;
        match ticks {
            0 => None,
            t if t > u16::MAX as u64 => None,
            t => Some(t as u16),
        }
    }

    /// Expiry rate of an auto-reload timer producing this tone
    pub fn toggle_rate_hz(&self) -> u32 {
        ((2 * self.0 as u64 + 500) / 1000) as u32
    }
}

/// Anything able to sound a fixed pitch on demand
pub trait ToneOutput {
    type Error;

    fn enable(&mut self, tone: Tone) -> Result<(), Self::Error>;

    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Reload-and-toggle generator owning one output line
#[derive(Debug)]
pub struct SquareWave<P> {
    line: P,
    tone: Option<Tone>,
    high: bool,
}

impl<P: OutputPin> SquareWave<P> {
    pub fn new(line: P) -> Self {
        Self {
            line,
            tone: None,
            high: false,
        }
    }

    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Timer expiry handler
    ///
    /// Flips the line when enabled and `gate` is open, otherwise lets it rest low.
    pub fn on_overflow(&mut self, gate: bool) -> Result<(), P::Error> {
        if self.tone.is_some() && gate {
            self.drive(!self.high)
        } else if self.high {
            self.drive(false)
        } else {
            Ok(())
        }
    }

    pub fn release(self) -> P {
        self.line
    }

    fn drive(&mut self, high: bool) -> Result<(), P::Error> {
        if high {
            self.line.set_high()?;
        } else {
            self.line.set_low()?;
        }
        self.high = high;
        Ok(())
    }
}

impl<P: OutputPin> ToneOutput for SquareWave<P> {
    type Error = P::Error;

    fn enable(&mut self, tone: Tone) -> Result<(), Self::Error> {
        self.tone = Some(tone);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.tone = None;
        self.drive(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct Line {
        high: bool,
        edges: usize,
    }

    impl OutputPin for Line {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.high {
                self.edges += 1;
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if !self.high {
                self.edges += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn reload_values_at_10mhz() {
        assert_eq!(JUMP_TONE.reload(10_000_000), Some(9556));
        assert_eq!(GAME_OVER_TONE.reload(10_000_000), Some(25510));
    }

    #[test]
    fn reload_out_of_range() {
        assert_eq!(Tone::from_hertz(0).reload(10_000_000), None);
        assert_eq!(Tone::from_hertz(1).reload(10_000_000), None);
        assert_eq!(Tone::from_hertz(1_000_000).reload(1_000), None);
    }

    #[test]
    fn toggle_rate_is_twice_the_pitch() {
        assert_eq!(Tone::from_hertz(440).toggle_rate_hz(), 880);
        assert_eq!(JUMP_TONE.toggle_rate_hz(), 1047);
        assert_eq!(GAME_OVER_TONE.toggle_rate_hz(), 392);
    }

    #[test]
    fn toggles_only_while_gate_open() {
        let mut wave = SquareWave::new(Line::default());
        wave.enable(JUMP_TONE).unwrap();

        for _ in 0..10 {
            wave.on_overflow(true).unwrap();
        }
        assert!(!wave.is_high());
        assert_eq!(wave.line.edges, 10);

        wave.on_overflow(true).unwrap();
        assert!(wave.is_high());
        for _ in 0..5 {
            wave.on_overflow(false).unwrap();
        }
        assert!(!wave.is_high());
        assert_eq!(wave.release().edges, 12);
    }

    #[test]
    fn silent_until_enabled() {
        let mut wave = SquareWave::new(Line::default());
        for _ in 0..4 {
            wave.on_overflow(true).unwrap();
        }
        assert_eq!(wave.line.edges, 0);
        assert_eq!(wave.tone(), None);
    }

    #[test]
    fn disable_rests_line_low() {
        let mut wave = SquareWave::new(Line::default());
        wave.enable(GAME_OVER_TONE).unwrap();
        wave.on_overflow(true).unwrap();
        assert!(wave.is_high());
        wave.disable().unwrap();
        assert!(!wave.is_high());
        assert!(!wave.line.high);
        wave.on_overflow(true).unwrap();
        assert!(!wave.line.high);
    }
}
