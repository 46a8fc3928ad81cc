use stm32f3xx_hal as stm32f303;

use cortex_m::peripheral::SYST;
use ssd1306::{prelude::*, Builder};
use stm32f303::{
    delay::Delay,
    hal::digital::v2::OutputPin,
    rcc,
    spi::{MisoPin, Mode, MosiPin, Phase, Polarity, SckPin, Spi},
    stm32::SPI2,
    time::Hertz,
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// SSD1306 wiring: SPI2 bus lines and the chip-select, data/command and reset lines
pub struct DisplayPins<SCK, MISO, MOSI, CS, DC, RST> {
    pub sck: SCK,
    pub miso: MISO,
    pub mosi: MOSI,
    pub cs: CS,
    pub dc: DC,
    pub rst: RST,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Reset,
    Init,
}

impl Error {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::Reset => "Display reset line failed",
            Error::Init => "Display did not accept init sequence",
        }
    }
}

/// Bring up a 128x64 SSD1306 on SPI2 and blank it
///
/// SYST is borrowed for the reset pulse only and released on return.
pub fn init_ssd1306_on_spi2<H, SCK, MISO, MOSI, CS, DC, RST>(
    freq: H,
    spi2: SPI2,
    pins: DisplayPins<SCK, MISO, MOSI, CS, DC, RST>,
    apb1: &mut rcc::APB1,
    syst: SYST,
    clocks: rcc::Clocks,
) -> Result<(GraphicsMode<impl WriteOnlyDataCommand>, SYST), Error>
where
    H: Into<Hertz>,
    SCK: SckPin<SPI2>,
    MISO: MisoPin<SPI2>,
    MOSI: MosiPin<SPI2>,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    let DisplayPins {
        sck,
        miso,
        mosi,
        cs,
        dc,
        mut rst,
    } = pins;
    let freq = freq.into();
    info!("configuring ssd1306 on spi2 at {}hz", freq.0);

    let spi_mode = Mode {
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };
    let spi = Spi::spi2(spi2, (sck, miso, mosi), spi_mode, freq, clocks, apb1);

    let mut delay = Delay::new(syst, clocks);
    let interface = SPIInterface::new(spi, dc, cs);
    let mut disp: GraphicsMode<_> = Builder::new()
        .with_rotation(DisplayRotation::Rotate0)
        .connect(interface)
        .into();

    disp.reset(&mut rst, &mut delay).map_err(|_| Error::Reset)?;
    disp.init().map_err(|_| Error::Init)?;
    disp.clear();
    disp.flush().map_err(|_| Error::Init)?;
    debug!("display ready");
    Ok((disp, delay.free()))
}
