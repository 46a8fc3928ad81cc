#![no_main]
#![no_std]

use core::cell::RefCell;

// sets default panic handler
use panic_itm as _;

use cortex_m::{asm, interrupt::Mutex, peripheral::NVIC};
// provides _start symbol
use cortex_m_rt::entry;

use stm32f3xx_hal as stm32f303;

use stm32f303::{
    gpio::{
        gpioa::PA0,
        gpioc::{PC1, PC2},
        Floating, Input, Output, PushPull,
    },
    hal::digital::v2::OutputPin,
    pac::{self, interrupt, TIM2, TIM3, TIM4},
    prelude::*,
    timer::Timer,
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use dino_run::{Builder, Preset, Signals, SquareWave, ToneOutput, GAME_OVER_TONE, JUMP_TONE};
use nanorand::rand::pcg64::Pcg64;
use peripherals::{
    apb1_timer_clock, buttons, freeze_clocks, init_millisecond_timer,
    logger::{self, LevelFilter},
    ppu::{self, DisplayPins},
    spu::{Acknowledge, ToneTimer, TONE_TIMER_CLOCK_HZ},
    Button,
};

mod context;
mod critical;

use context::DiscoveryContext;

/// Timer expiring at twice a tone's pitch, plus the line it toggles
struct Voice<TIM, P> {
    timer: ToneTimer<TIM>,
    wave: SquareWave<P>,
}

struct JumpVoice {
    voice: Voice<TIM3, PC1<Output<PushPull>>>,
    button: Button<PA0<Input<Floating>>>,
}

type GameOverVoice = Voice<TIM4, PC2<Output<PushPull>>>;

static SIGNALS: Signals = Signals::new();

static CLOCK: Mutex<RefCell<Option<Timer<TIM2>>>> = Mutex::new(RefCell::new(None));
static JUMP_VOICE: Mutex<RefCell<Option<JumpVoice>>> = Mutex::new(RefCell::new(None));
static GAME_OVER_VOICE: Mutex<RefCell<Option<GameOverVoice>>> = Mutex::new(RefCell::new(None));

const RNG_SEED: u128 = 0x5eed;

fn halt(reason: &str) -> ! {
    error!("{}", reason);
    loop {
        asm::wfi();
    }
}

#[entry]
fn main() -> ! {
    let cp = match cortex_m::Peripherals::take() {
        Some(cp) => cp,
        None => halt("core peripherals already taken"),
    };
    let dp = match pac::Peripherals::take() {
        Some(dp) => dp,
        None => halt("device peripherals already taken"),
    };

    #[cfg(not(feature = "semihosting"))]
    let logged = logger::init_itm(LevelFilter::Info, cp.ITM);
    #[cfg(feature = "semihosting")]
    let logged = logger::init_semihosting(LevelFilter::Info);
    if let Err(err) = logged {
        halt(err.as_str());
    }
    info!("init process started");

    buttons::enable_syscfg(&dp.RCC);

    info!("configuring clocks");
    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = freeze_clocks(36.mhz(), rcc.cfgr, &mut flash);
    let timer_clock = apb1_timer_clock(&clocks).0;

    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);
    let mut gpiob = dp.GPIOB.split(&mut rcc.ahb);
    let mut gpioc = dp.GPIOC.split(&mut rcc.ahb);

    info!("configuring buttons, jump on pa0 and restart on pa1");
    let jump = gpioa
        .pa0
        .into_floating_input(&mut gpioa.moder, &mut gpioa.pupdr);
    let restart = gpioa
        .pa1
        .into_pull_down_input(&mut gpioa.moder, &mut gpioa.pupdr);
    buttons::listen_pa0_rising(&dp.EXTI, &dp.SYSCFG);

    info!("configuring speakers on pc1 and pc2");
    let jump_line = gpioc
        .pc1
        .into_push_pull_output(&mut gpioc.moder, &mut gpioc.otyper);
    let game_over_line = gpioc
        .pc2
        .into_push_pull_output(&mut gpioc.moder, &mut gpioc.otyper);

    let mut jump_wave = SquareWave::new(jump_line);
    let mut game_over_wave = SquareWave::new(game_over_line);
    if jump_wave.enable(JUMP_TONE).is_err() || game_over_wave.enable(GAME_OVER_TONE).is_err() {
        halt("speaker line failed");
    }

    let jump_timer = ToneTimer::tim3(
        dp.TIM3,
        JUMP_TONE.reload(TONE_TIMER_CLOCK_HZ),
        timer_clock,
        clocks,
        &mut rcc.apb1,
    );
    let game_over_timer = ToneTimer::tim4(
        dp.TIM4,
        GAME_OVER_TONE.reload(TONE_TIMER_CLOCK_HZ),
        timer_clock,
        clocks,
        &mut rcc.apb1,
    );
    let (jump_timer, game_over_timer) = match (jump_timer, game_over_timer) {
        (Ok(jump), Ok(game_over)) => (jump, game_over),
        (Err(err), _) | (_, Err(err)) => halt(err.as_str()),
    };

    info!("configuring ssd1306 display via spi2");
    let pins = DisplayPins {
        sck: gpiob.pb13.into_af5(&mut gpiob.moder, &mut gpiob.afrh),
        miso: gpiob.pb14.into_af5(&mut gpiob.moder, &mut gpiob.afrh),
        mosi: gpiob.pb15.into_af5(&mut gpiob.moder, &mut gpiob.afrh),
        cs: gpiob
            .pb11
            .into_push_pull_output(&mut gpiob.moder, &mut gpiob.otyper),
        dc: gpiob
            .pb1
            .into_push_pull_output(&mut gpiob.moder, &mut gpiob.otyper),
        rst: gpiob
            .pb0
            .into_push_pull_output(&mut gpiob.moder, &mut gpiob.otyper),
    };
    let display =
        match ppu::init_ssd1306_on_spi2(8.mhz(), dp.SPI2, pins, &mut rcc.apb1, cp.SYST, clocks) {
            Ok((display, _syst)) => display,
            Err(err) => halt(err.as_str()),
        };

    let clock = init_millisecond_timer(dp.TIM2, clocks, &mut rcc.apb1);

    cortex_m::interrupt::free(|cs| {
        CLOCK.borrow(cs).replace(Some(clock));
        JUMP_VOICE.borrow(cs).replace(Some(JumpVoice {
            voice: Voice {
                timer: jump_timer,
                wave: jump_wave,
            },
            button: Button::new(jump),
        }));
        GAME_OVER_VOICE.borrow(cs).replace(Some(Voice {
            timer: game_over_timer,
            wave: game_over_wave,
        }));
    });

    let ctx = DiscoveryContext {
        display,
        restart: Button::new(restart),
        signals: &SIGNALS,
        rng: Pcg64::new_seed(RNG_SEED),
    };
    let mut runner = match Builder::new()
        .with_context(ctx)
        .with_signals(&SIGNALS)
        .with_preset(Preset::Classic)
        .build()
    {
        Ok(runner) => runner,
        Err(err) => halt(err.as_str()),
    };

    info!("unmasking interrupts");
    unsafe {
        NVIC::unmask(pac::Interrupt::TIM2);
        NVIC::unmask(pac::Interrupt::TIM3);
        NVIC::unmask(pac::Interrupt::TIM4);
        NVIC::unmask(pac::Interrupt::EXTI0);
    }

    info!("running");
    runner.run()
}

impl<TIM, P> Voice<TIM, P>
where
    ToneTimer<TIM>: Acknowledge,
    P: OutputPin,
{
    fn expire(&mut self, gate: bool) {
        self.timer.acknowledge();
        if self.wave.on_overflow(gate).is_err() {
            warn!("speaker line failed");
        }
    }
}

#[interrupt]
fn TIM2() {
    cortex_m::interrupt::free(|cs| {
        if let Some(clock) = CLOCK.borrow(cs).borrow_mut().as_mut() {
            // clears the update flag
            let _ = clock.wait();
        }
    });
    SIGNALS.on_millisecond();
}

#[interrupt]
fn TIM3() {
    cortex_m::interrupt::free(|cs| {
        if let Some(jump) = JUMP_VOICE.borrow(cs).borrow_mut().as_mut() {
            let held = jump.button.is_pressed();
            jump.voice.expire(held);
        }
    });
}

#[interrupt]
fn TIM4() {
    cortex_m::interrupt::free(|cs| {
        if let Some(voice) = GAME_OVER_VOICE.borrow(cs).borrow_mut().as_mut() {
            voice.expire(SIGNALS.tone_requested());
        }
    });
}

#[interrupt]
fn EXTI0() {
    buttons::acknowledge_pa0_edge();
    SIGNALS.on_jump_edge();
}
