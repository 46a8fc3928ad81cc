//! Hooks the `log` facade up to a debug probe.
//!
//! Two sinks are available through cortex_m_log, both printing with
//! interrupts disabled so records from handlers never interleave:
//! - Instrumentation Trace Macrocell, stimulus port 0
//! - Semihosting STDERR, slow but needs no trace wiring
//!
//! Each logger lives in a `singleton!` slot, so installing one needs no unsafe
//! lifetime tricks. Only the first install per program succeeds.
//!
//! # Examples
//!
//! ```no_run
//! # use peripherals::logger::{self, LevelFilter};
//! # use log::info;
//! let p = cortex_m::Peripherals::take().unwrap();
//! logger::init_itm(LevelFilter::Info, p.ITM).unwrap();
//!
//! info!("game started");
//! ```

use core::fmt;

use cortex_m::peripheral::ITM;
use cortex_m_log::{
    destination,
    log::Logger,
    modes::InterruptFree,
    printer::{
        itm::ItmSync,
        semihosting::{hio::HStderr, Semihosting},
        Printer,
    },
};

pub use log::LevelFilter;

pub type ItmLogger = Logger<ItmSync<InterruptFree>>;
pub type HostLogger = Logger<Semihosting<InterruptFree, HStderr>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The static slot of this logger was already used
    Taken,
    /// Debugger did not answer the semihosting call
    NoHost,
    /// Another logger is registered with the facade
    Facade,
}

impl Error {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::Taken => "Logger already created",
            Error::NoHost => "Semihosting stderr unavailable",
            Error::Facade => "Logger already installed",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log through ITM
///
/// Requires the TPIU prescaler set up, see [`ClocksExt`](crate::ClocksExt),
/// and tracing enabled in openocd:
///
/// ```gdb
/// monitor tpiu config internal itm.out uart off 8000000
/// monitor itm port 0 on
/// ```
///
/// ```sh
/// itmdump -F -f itm.out
/// ```
pub fn init_itm(level: LevelFilter, itm: ITM) -> Result<(), Error> {
    let inner = ItmSync::<InterruptFree>::new(destination::Itm::new(itm));
    let logger = cortex_m::singleton!(: ItmLogger = Logger { level, inner }).ok_or(Error::Taken)?;
    install(logger)
}

/// Log through semihosting, after `monitor arm semihosting enable`
pub fn init_semihosting(level: LevelFilter) -> Result<(), Error> {
    let inner = Semihosting::<InterruptFree, _>::stderr().map_err(|_| Error::NoHost)?;
    let logger =
        cortex_m::singleton!(: HostLogger = Logger { level, inner }).ok_or(Error::Taken)?;
    install(logger)
}

fn install<P>(logger: &'static Logger<P>) -> Result<(), Error>
where
    P: Printer + Send + Sync + 'static,
{
    log::set_logger(logger).map_err(|_| Error::Facade)?;
    log::set_max_level(logger.level);
    Ok(())
}
