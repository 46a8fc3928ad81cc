//! Timers pacing the square-wave tone generators.
//!
//! Each tone timer counts at [`TONE_TIMER_CLOCK_HZ`] and expires after a
//! reload computed for the tone, so its update interrupt fires at twice the
//! tone frequency.

use stm32f3xx_hal as stm32f303;

use stm32f303::{
    pac::{TIM3, TIM4},
    rcc,
    time::U32Ext,
    timer::Timer,
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Counting rate of the tone timers after prescaling
pub const TONE_TIMER_CLOCK_HZ: u32 = 1_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Reload of zero, or a tone out of reach of a 16-bit counter
    Reload,
    /// Kernel clock cannot be divided down to the counting rate
    Prescaler,
}

impl Error {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::Reload => "Tone does not fit a 16-bit timer",
            Error::Prescaler => "Timer clock cannot be prescaled to 1MHz",
        }
    }
}

/// Clearing the expiry flag, to be called on every update interrupt
pub trait Acknowledge {
    fn acknowledge(&mut self);
}

pub struct ToneTimer<TIM> {
    tim: TIM,
}

macro_rules! tone_timers {
    ($($TIM:ident: $tim:ident,)+) => {
        $(
            impl ToneTimer<$TIM> {
                /// Start counting with the update interrupt enabled
                ///
                /// `timer_clock` is the kernel clock of the timer, see
                /// [`apb1_timer_clock`](crate::apb1_timer_clock).
                pub fn $tim(
                    tim: $TIM,
                    reload: Option<u16>,
                    timer_clock: u32,
                    clocks: rcc::Clocks,
                    apb1: &mut rcc::APB1,
                ) -> Result<Self, Error> {
                    let reload = match reload {
                        Some(reload) if reload > 0 => reload,
                        _ => return Err(Error::Reload),
                    };
                    let psc = timer_clock / TONE_TIMER_CLOCK_HZ;
                    if psc == 0 || psc > u16::MAX as u32 + 1 {
                        return Err(Error::Prescaler);
                    }

                    info!("configuring {} as tone timer", stringify!($tim));
                    debug!("prescaler: {}, reload: {}", psc, reload);
                    // the HAL only powers the timer up, counting is set up below
                    let tim = Timer::$tim(tim, TONE_TIMER_CLOCK_HZ.hz(), clocks, apb1).release();

                    tim.psc.write(|w| unsafe { w.bits(psc - 1) });
                    tim.arr.write(|w| unsafe { w.bits(reload as u32 - 1) });
                    tim.egr.write(|w| w.ug().set_bit());
                    tim.sr.modify(|_, w| w.uif().clear_bit());
                    tim.dier.modify(|_, w| w.uie().set_bit());
                    tim.cr1.modify(|_, w| w.cen().set_bit());
                    Ok(Self { tim })
                }
            }

            impl Acknowledge for ToneTimer<$TIM> {
                fn acknowledge(&mut self) {
                    self.tim.sr.modify(|_, w| w.uif().clear_bit());
                }
            }
        )+
    };
}

tone_timers! {
    TIM3: tim3,
    TIM4: tim4,
}
