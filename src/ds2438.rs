use embedded_hal::delay::DelayNs;

use crate::{
    page::select_vad, Address, Channel, Command, Config, Device, Error, OneWire, OpCode, Page,
    PageZero, Reading,
};

/// Temperature conversion time, ms
pub const TEMPERATURE_CONVERSION_MS: u32 = 10;
/// Voltage A/D conversion time, ms
pub const VOLTAGE_CONVERSION_MS: u32 = 8;
/// Extra wait between the conversions and the page read, ms
pub const SETTLE_MS: u32 = 10;

/// How the cached values relate to the last `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Freshness {
    /// No update succeeded since `begin`, values are zero
    #[default]
    Empty,
    /// The last update succeeded
    Fresh,
    /// An earlier update succeeded but the last one failed
    Stale,
}

/// DS2438 smart battery monitor
///
/// The driver keeps the calibration and the last decoded reading. The bus
/// and the delay source stay with the caller and are lent to every call that
/// talks to the chip.
#[derive(Debug, Clone, Copy)]
pub struct Ds2438 {
    address: Address,
    config: Config,
    reading: Reading,
    freshness: Freshness,
}

impl From<Ds2438> for Address {
    fn from(device: Ds2438) -> Self {
        device.address
    }
}

impl Ds2438 {
    pub fn new(address: Address) -> Self {
        Ds2438 {
            address,
            config: Config::default(),
            reading: Reading::default(),
            freshness: Freshness::Empty,
        }
    }

    /// Stores the calibration, clears the cache and switches the voltage
    /// A/D to the VAD input.
    ///
    /// When page zero cannot be read the status register is left alone, the
    /// calibration and the cleared cache are kept all the same.
    pub fn begin<B: OneWire>(&mut self, bus: &mut B, config: Config) -> Result<(), Error<B::Error>> {
        self.reading = Reading::default();
        self.freshness = Freshness::Empty;
        self.config = config;

        let mut raw = [0u8; PageZero::BYTES];
        let page = self.read_page_zero(bus, &mut raw)?;
        let status = select_vad(page.status_byte());
        debug!(
            "ds2438 {}: status {:#x} -> {:#x}",
            self.address,
            page.status_byte(),
            status
        );
        self.write_page_zero(bus, &page.with_status(status))
    }

    /// Runs a temperature conversion followed by a voltage conversion,
    /// waiting for each to finish before the next command.
    pub fn start_conversion<B: OneWire>(
        &self,
        bus: &mut B,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error<B::Error>> {
        trace!("ds2438 {}: convert", self.address);
        bus.reset_select_write_only(&self.address, &[Command::ConvertT.op_code()])?;
        delay.delay_ms(TEMPERATURE_CONVERSION_MS);
        bus.reset_select_write_only(&self.address, &[Command::ConvertV.op_code()])?;
        delay.delay_ms(VOLTAGE_CONVERSION_MS);
        Ok(())
    }

    /// Writes `data` to the scratchpad and copies it to page zero
    pub fn write_page_zero<B: OneWire>(
        &self,
        bus: &mut B,
        data: &[u8; PageZero::DATA_BYTES],
    ) -> Result<(), Error<B::Error>> {
        bus.reset_select_write_only(
            &self.address,
            &[Command::WriteScratchpad.op_code(), Page::Zero.op_code()],
        )?;
        bus.write_bytes(data)?;
        bus.reset_select_write_only(
            &self.address,
            &[Command::CopyScratchpad.op_code(), Page::Zero.op_code()],
        )?;
        Ok(())
    }

    /// Recalls page zero into the scratchpad and reads it back into `data`
    ///
    /// `data` holds whatever came off the bus even when the CRC check fails.
    pub fn read_page_zero<B: OneWire>(
        &self,
        bus: &mut B,
        data: &mut [u8; PageZero::BYTES],
    ) -> Result<PageZero, Error<B::Error>> {
        bus.reset_select_write_only(
            &self.address,
            &[Command::RecallMemory.op_code(), Page::Zero.op_code()],
        )?;
        bus.reset_select_write_read(
            &self.address,
            &[Command::ReadScratchpad.op_code(), Page::Zero.op_code()],
            &mut data[..],
        )?;
        let (payload, crc) = data.split_at(PageZero::DATA_BYTES);
        if let Err(error) = bus.ensure_correct_crc8(payload, crc[0]) {
            warn!("ds2438 {}: page zero crc mismatch", self.address);
            return Err(error);
        }
        Ok(PageZero::verified(*data))
    }

    /// Converts, reads page zero and replaces the cached reading
    ///
    /// On any failure the cached values are kept and marked stale.
    pub fn update<B: OneWire>(
        &mut self,
        bus: &mut B,
        delay: &mut impl DelayNs,
    ) -> Result<Reading, Error<B::Error>> {
        match self.sample(bus, delay) {
            Ok(reading) => {
                trace!(
                    "ds2438 {}: {} C, a {}, b {}",
                    self.address,
                    reading.temperature,
                    reading.raw_a,
                    reading.raw_b
                );
                self.reading = reading;
                self.freshness = Freshness::Fresh;
                Ok(reading)
            }
            Err(error) => {
                if self.freshness == Freshness::Fresh {
                    self.freshness = Freshness::Stale;
                }
                Err(error)
            }
        }
    }

    fn sample<B: OneWire>(
        &self,
        bus: &mut B,
        delay: &mut impl DelayNs,
    ) -> Result<Reading, Error<B::Error>> {
        self.start_conversion(bus, delay)?;
        delay.delay_ms(SETTLE_MS);
        let mut raw = [0u8; PageZero::BYTES];
        Ok(self.read_page_zero(bus, &mut raw)?.reading())
    }

    /// Last temperature, °C
    pub fn temperature(&self) -> f64 {
        self.reading.temperature
    }

    /// Last value of `channel`: volts for A, ADC counts for B
    pub fn raw_data(&self, channel: Channel) -> f32 {
        self.reading.raw(channel)
    }

    /// Last value of `channel` through its calibration, 0 outside of 0..=30 A
    pub fn current(&self, channel: Channel) -> f32 {
        self.reading.current(channel, &self.config)
    }

    /// The cached reading, unless no update succeeded since `begin`
    pub fn reading(&self) -> Option<Reading> {
        match self.freshness {
            Freshness::Empty => None,
            Freshness::Fresh | Freshness::Stale => Some(self.reading),
        }
    }

    pub fn state(&self) -> Freshness {
        self.freshness
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Device for Ds2438 {
    const FAMILY_CODE: u8 = 0x26;

    fn address(&self) -> &Address {
        &self.address
    }

    fn from_address_unchecked(address: Address) -> Self {
        Self::new(address)
    }
}
