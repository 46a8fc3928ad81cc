use core::convert::Infallible;

use cortex_m::asm;
use dino_run::{nb, Context, Frame, Signals};
use nanorand::{rand::pcg64::Pcg64, RNG};
use peripherals::Button;
use ssd1306::prelude::*;
use stm32f3xx_hal::hal::digital::v2::InputPin;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

pub(crate) struct DiscoveryContext<DI: WriteOnlyDataCommand, R> {
    pub display: GraphicsMode<DI>,
    pub restart: Button<R>,
    pub signals: &'static Signals,
    pub rng: Pcg64,
}

impl<DI, R> Context for DiscoveryContext<DI, R>
where
    DI: WriteOnlyDataCommand,
    R: InputPin<Error = Infallible>,
{
    /// 16x2 character cells drawn onto the 128x64 panel
    fn on_frame(&mut self, frame: &Frame) {
        if frame.draw(&mut self.display).is_err() {
            warn!("frame did not fit the display");
        }
        if self.display.flush().is_err() {
            warn!("display flush failed");
        }
    }

    /// Sleeps on the millisecond clock, TIM2 wakes the core every tick
    fn delay_ms(&mut self, ms: u32) {
        let start = self.signals.elapsed_ms();
        while self.signals.elapsed_ms().wrapping_sub(start) < ms {
            asm::wfi();
        }
    }

    fn poll_restart(&mut self) -> nb::Result<(), Infallible> {
        if self.restart.is_pressed() {
            // the moment of the press is the only entropy around
            let seed = self.signals.elapsed_ms() as u128;
            debug!("reseeding obstacles with {}", seed);
            self.rng = Pcg64::new_seed(seed);
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn wait_for_event(&mut self) {
        asm::wfi();
    }

    fn gen_random(&mut self) -> u8 {
        self.rng.generate::<u8>()
    }
}
