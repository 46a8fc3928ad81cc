//! Push buttons wired between a GPIO and VDD.
//!
//! The jump button sits on PA0 (the Discovery user button) and is reported to
//! the game twice: as a rising edge through EXTI0 and as a level sampled by the
//! jump-tone interrupt. The restart button is only ever polled.

use stm32f3xx_hal as stm32f303;

use core::convert::Infallible;

use stm32f303::{hal::digital::v2::InputPin, pac};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Active-high button
pub struct Button<P> {
    pin: P,
}

impl<P: InputPin<Error = Infallible>> Button<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.pin.is_high(), Ok(true))
    }

    pub fn release(self) -> P {
        self.pin
    }
}

/// Route PA0 to EXTI0 and raise the interrupt on its rising edge
///
/// SYSCFG has to be clocked before, see [`enable_syscfg`].
pub fn listen_pa0_rising(exti: &pac::EXTI, syscfg: &pac::SYSCFG) {
    info!("configuring exti0 on pa0 rising edge");
    syscfg
        .exticr1
        .modify(|_, w| unsafe { w.exti0().bits(0b000) });
    exti.rtsr1.modify(|_, w| w.tr0().set_bit());
    exti.ftsr1.modify(|_, w| w.tr0().clear_bit());
    exti.imr1.modify(|_, w| w.mr0().set_bit());
}

/// Must run before the RCC is handed over to the HAL
pub fn enable_syscfg(rcc: &pac::RCC) {
    rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());
}

/// Clear the pending EXTI0 edge, to be called from its handler
pub fn acknowledge_pa0_edge() {
    // pr1 is write-one-to-clear, other lines stay untouched
    unsafe { (*pac::EXTI::ptr()).pr1.write(|w| w.pr0().set_bit()) }
}
