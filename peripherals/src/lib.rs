#![no_std]

use stm32f3xx_hal as stm32f303;

use stm32f303::{
    flash,
    pac, rcc,
    time::{Hertz, MegaHertz, U32Ext},
    timer::{Event, Timer},
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

pub mod buttons;
pub mod logger;
pub mod ppu;
pub mod spu;

pub use buttons::Button;

/// Baud rate of the ITM trace port
pub const TRACE_BAUD_RATE: u32 = 2;

/// tpiu is a bridge for ITM, it's asynchronous clock prescaller
/// has to be updated, otherwise logging through ITM won't work
pub trait ClocksExt {
    fn set_tpiu_async_cpr(self, baud_rate: MegaHertz) -> Self;
}

impl ClocksExt for rcc::Clocks {
    fn set_tpiu_async_cpr(self, baud_rate: MegaHertz) -> Self {
        let tpiu_async_presc = self.hclk().0 / (baud_rate.0 * 1_000_000) - 1;
        unsafe { (*pac::TPIU::ptr()).acpr.write(tpiu_async_presc) }
        trace!("HCLK set to: {}hz", self.hclk().0);
        trace!("setting tpiu baud rate to: {}mhz", baud_rate.0);
        trace!("setting async clock prescaller: {}", tpiu_async_presc);
        self
    }
}

/// Run the core at `sysclk` with APB1 at half of it, keeping ITM usable
pub fn freeze_clocks(
    sysclk: MegaHertz,
    cfgr: rcc::CFGR,
    flash: &mut flash::Parts,
) -> rcc::Clocks {
    let pclk1 = (sysclk.0 / 2).mhz();
    let clocks = cfgr
        .use_hse(8.mhz())
        .sysclk(sysclk)
        .pclk1(pclk1)
        .freeze(&mut flash.acr)
        .set_tpiu_async_cpr(TRACE_BAUD_RATE.mhz());
    debug!(
        "sysclk: {}hz, pclk1: {}hz, pclk2: {}hz",
        clocks.sysclk().0,
        clocks.pclk1().0,
        clocks.pclk2().0
    );
    clocks
}

/// Kernel clock of timers on APB1, doubled whenever APB1 is divided
pub fn apb1_timer_clock(clocks: &rcc::Clocks) -> Hertz {
    match clocks.ppre1() {
        1 => clocks.pclk1(),
        _ => Hertz(clocks.pclk1().0 * 2),
    }
}

/// TIM2 expiring every millisecond with its update interrupt enabled
pub fn init_millisecond_timer(
    tim2: pac::TIM2,
    clocks: rcc::Clocks,
    apb1: &mut rcc::APB1,
) -> Timer<pac::TIM2> {
    info!("configuring timer2 as millisecond clock");
    let mut timer = Timer::tim2(tim2, 1.khz(), clocks, apb1);
    timer.listen(Event::Update);
    timer
}
