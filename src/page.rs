//! Page zero layout and the register decoding
//!
//! | byte | content                                   |
//! |------|-------------------------------------------|
//! | 0    | status/configuration                      |
//! | 1-2  | temperature, 13 bit signed, 1/32 °C, LSB first |
//! | 3-4  | channel A ADC, 10 bit, LSB first          |
//! | 5-6  | channel B ADC, 10 bit, LSB first          |
//! | 7    | current register MSB                      |
//! | 8    | CRC-8 over bytes 0-7                      |

use crate::{Channel, Config};
use bitflags::bitflags;
use byteorder::{ByteOrder, LittleEndian};

bitflags! {
    /// Status/configuration register (page 0, byte 0)
    pub struct Status: u8 {
        /// Current A/D and ICA enabled
        const IAD = 0b0000_0001;
        /// Current accumulator configuration
        const CA  = 0b0000_0010;
        /// Current accumulator shadow selector
        const EE  = 0b0000_0100;
        /// Voltage A/D input select: set for VDD, clear for VAD
        const AD  = 0b0000_1000;
        /// Temperature conversion busy
        const TB  = 0b0001_0000;
        /// Nonvolatile memory busy
        const NVB = 0b0010_0000;
        /// A/D converter busy
        const ADB = 0b0100_0000;
    }
}

/// Degrees Celsius per temperature LSB
pub const TEMPERATURE_RESOLUTION: f64 = 0.03125;

const ADC_MASK: u16 = 0x03FF;

/// Clears the AD flag so the voltage A/D samples VAD instead of VDD,
/// every other bit of `status` is kept
pub fn select_vad(status: u8) -> u8 {
    status & !Status::AD.bits()
}

/// Temperature in °C from bytes 1-2
pub fn decode_temperature(bytes: [u8; 2]) -> f64 {
    (LittleEndian::read_i16(&bytes) >> 3) as f64 * TEMPERATURE_RESOLUTION
}

/// Register bytes for a temperature of `units` × 1/32 °C
///
/// `units` is a 13 bit signed value (-4096..=4095), wider values wrap.
pub fn encode_temperature(units: i16) -> [u8; 2] {
    let mut bytes = [0u8; 2];
    LittleEndian::write_i16(&mut bytes, units << 3);
    bytes
}

/// 10 bit ADC value from an LSB/MSB pair, the upper six MSB bits are ignored
pub fn decode_adc(bytes: [u8; 2]) -> u16 {
    LittleEndian::read_u16(&bytes) & ADC_MASK
}

pub fn encode_adc(raw: u16) -> [u8; 2] {
    let mut bytes = [0u8; 2];
    LittleEndian::write_u16(&mut bytes, raw & ADC_MASK);
    bytes
}

/// Channel A value: the ADC counts in volts (10 mV per count)
pub fn decode_channel_a(bytes: [u8; 2]) -> f32 {
    (decode_adc(bytes) as f64 / 100.0) as f32
}

/// Channel B value: the ADC counts without any scaling
///
/// Unlike channel A this is not divided by 100; calibration coefficients
/// for channel B apply to raw counts.
pub fn decode_channel_b(bytes: [u8; 2]) -> f32 {
    decode_adc(bytes) as f32
}

/// Decoded content of page zero
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// °C
    pub temperature: f64,
    pub raw_a: f32,
    pub raw_b: f32,
}

impl Default for Reading {
    fn default() -> Self {
        Reading {
            temperature: 0.0,
            raw_a: 0.0,
            raw_b: 0.0,
        }
    }
}

impl Reading {
    pub fn raw(&self, channel: Channel) -> f32 {
        match channel {
            Channel::A => self.raw_a,
            Channel::B => self.raw_b,
        }
    }

    /// Calibrated current of `channel`, saturated to 0 outside of 0..=30 A
    pub fn current(&self, channel: Channel, config: &Config) -> f32 {
        config.calibration(channel).apply(self.raw(channel))
    }
}

/// A CRC verified image of page zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageZero {
    raw: [u8; Self::BYTES],
}

impl PageZero {
    /// Bytes read back, including the CRC
    pub const BYTES: usize = 9;
    /// Bytes written to the scratchpad
    pub const DATA_BYTES: usize = 8;

    /// Wraps bytes whose CRC has already been checked
    pub(crate) fn verified(raw: [u8; Self::BYTES]) -> Self {
        PageZero { raw }
    }

    pub fn as_bytes(&self) -> &[u8; Self::BYTES] {
        &self.raw
    }

    /// Bytes 0-7, without the CRC
    pub fn data(&self) -> [u8; Self::DATA_BYTES] {
        let mut data = [0u8; Self::DATA_BYTES];
        data.copy_from_slice(&self.raw[..Self::DATA_BYTES]);
        data
    }

    pub fn crc(&self) -> u8 {
        self.raw[Self::DATA_BYTES]
    }

    pub fn status_byte(&self) -> u8 {
        self.raw[0]
    }

    pub fn status(&self) -> Status {
        Status::from_bits_truncate(self.raw[0])
    }

    /// Page payload with the status byte replaced
    pub fn with_status(&self, status: u8) -> [u8; Self::DATA_BYTES] {
        let mut data = self.data();
        data[0] = status;
        data
    }

    pub fn temperature(&self) -> f64 {
        decode_temperature([self.raw[1], self.raw[2]])
    }

    pub fn raw(&self, channel: Channel) -> f32 {
        match channel {
            Channel::A => decode_channel_a([self.raw[3], self.raw[4]]),
            Channel::B => decode_channel_b([self.raw[5], self.raw[6]]),
        }
    }

    pub fn reading(&self) -> Reading {
        Reading {
            temperature: self.temperature(),
            raw_a: self.raw(Channel::A),
            raw_b: self.raw(Channel::B),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_round_trip() {
        for units in [-4096i16, -800, -1, 0, 1, 32, 800, 3200, 4095] {
            let bytes = encode_temperature(units);
            assert_eq!(decode_temperature(bytes), units as f64 * 0.03125);
        }
    }

    #[test]
    fn temperature_from_datasheet() {
        // +125 °C, +25.0625 °C, +0.5 °C, -0.5 °C, -25.0625 °C, -55 °C
        assert_eq!(decode_temperature([0x00, 0x7D]), 125.0);
        assert_eq!(decode_temperature([0x10, 0x19]), 25.0625);
        assert_eq!(decode_temperature([0x80, 0x00]), 0.5);
        assert_eq!(decode_temperature([0x80, 0xFF]), -0.5);
        assert_eq!(decode_temperature([0xF0, 0xE6]), -25.0625);
        assert_eq!(decode_temperature([0x00, 0xC9]), -55.0);
    }

    #[test]
    fn temperature_ignores_unused_low_bits() {
        assert_eq!(decode_temperature([0x87, 0x00]), 0.5);
    }

    #[test]
    fn channel_a_scaling() {
        assert_eq!(decode_channel_a(encode_adc(0)), 0.0);
        assert_eq!(decode_channel_a(encode_adc(1000)), 10.0);
        assert_eq!(decode_channel_a([0xF4, 0x01]), 5.0);
    }

    #[test]
    fn channel_b_is_raw() {
        assert_eq!(decode_channel_b(encode_adc(0)), 0.0);
        assert_eq!(decode_channel_b(encode_adc(1000)), 1000.0);
        assert_eq!(decode_channel_b([0xFF, 0x03]), 1023.0);
    }

    #[test]
    fn adc_keeps_ten_bits() {
        assert_eq!(decode_adc([0xFF, 0xFF]), 0x3FF);
        assert_eq!(decode_adc([0x12, 0xFD]), 0x112);
        assert_eq!(encode_adc(1000), [0xE8, 0x03]);
    }

    #[test]
    fn select_vad_clears_only_ad() {
        for status in 0..=u8::MAX {
            let cleared = select_vad(status);
            assert_eq!(cleared & Status::AD.bits(), 0);
            assert_eq!(cleared | (status & Status::AD.bits()), status);
        }
        assert_eq!(select_vad(0xFF), 0xF7);
        assert_eq!(select_vad(0x0F), 0x07);
    }

    #[test]
    fn page_zero_fields() {
        let temperature = encode_temperature(800);
        let a = encode_adc(1000);
        let b = encode_adc(512);
        let page = PageZero::verified([
            0x0F,
            temperature[0],
            temperature[1],
            a[0],
            a[1],
            b[0],
            b[1],
            0x42,
            0xAB,
        ]);
        assert_eq!(page.status(), Status::IAD | Status::CA | Status::EE | Status::AD);
        assert_eq!(page.temperature(), 25.0);
        assert_eq!(
            page.reading(),
            Reading {
                temperature: 25.0,
                raw_a: 10.0,
                raw_b: 512.0,
            }
        );
        assert_eq!(page.crc(), 0xAB);
        assert_eq!(page.with_status(0x07)[0], 0x07);
        assert_eq!(page.with_status(0x07)[1..], page.data()[1..]);
    }

    #[test]
    fn reading_current_uses_channel_calibration() {
        let reading = Reading {
            temperature: 20.0,
            raw_a: 4.0,
            raw_b: 20.0,
        };
        let config = Config::new(2.0, 1.0, 0.5, 0.0);
        assert_eq!(reading.current(Channel::A, &config), 9.0);
        assert_eq!(reading.current(Channel::B, &config), 10.0);
    }
}
