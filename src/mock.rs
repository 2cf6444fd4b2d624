//! Test doubles for the bus transport and the delay source

extern crate std;

use crate::{Address, OneWire};
use embedded_hal::delay::DelayNs;
use std::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Reset,
    Select(Address),
    Write(u8, bool),
    Read(u8),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BusFault {
    /// Read past the end of the scripted bytes
    Underrun,
    /// Reset found nobody on the wire
    NoPresence,
}

/// Records every bus operation and answers reads from a script
pub struct ScriptedBus {
    ops: Vec<Op>,
    replies: Vec<u8>,
    cursor: usize,
    present: bool,
}

impl ScriptedBus {
    pub fn new(replies: &[u8]) -> Self {
        ScriptedBus {
            ops: Vec::new(),
            replies: replies.to_vec(),
            cursor: 0,
            present: true,
        }
    }

    pub fn absent() -> Self {
        ScriptedBus {
            present: false,
            ..Self::new(&[])
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn push_replies(&mut self, replies: &[u8]) {
        self.replies.extend_from_slice(replies);
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl OneWire for ScriptedBus {
    type Error = BusFault;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.ops.push(Op::Reset);
        if self.present {
            Ok(())
        } else {
            Err(BusFault::NoPresence)
        }
    }

    fn select(&mut self, address: &Address) -> Result<(), Self::Error> {
        self.ops.push(Op::Select(*address));
        Ok(())
    }

    fn write(&mut self, byte: u8, power: bool) -> Result<(), Self::Error> {
        self.ops.push(Op::Write(byte, power));
        Ok(())
    }

    fn read(&mut self) -> Result<u8, Self::Error> {
        let byte = *self.replies.get(self.cursor).ok_or(BusFault::Underrun)?;
        self.cursor += 1;
        self.ops.push(Op::Read(byte));
        Ok(byte)
    }

    fn crc8(&self, data: &[u8]) -> u8 {
        maxim_crc8(data)
    }
}

/// Reflected polynomial 0x31, as computed by the bus masters
pub fn maxim_crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for byte in data {
        let mut byte = *byte;
        for _ in 0..8 {
            let mix = (crc ^ byte) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            byte >>= 1;
        }
    }
    crc
}

/// Appends the CRC byte to an 8 byte page payload
pub fn sealed_page(payload: [u8; 8]) -> [u8; 9] {
    let mut page = [0u8; 9];
    page[..8].copy_from_slice(&payload);
    page[8] = maxim_crc8(&payload);
    page
}

/// Keeps the millisecond waits requested through `DelayNs`
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::maxim_crc8;

    #[test]
    fn crc8_known_rom() {
        // DS18B20 ROM code from the Maxim application note 27 example
        let rom = [0x02, 0x1C, 0xB8, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(maxim_crc8(&rom), 0xA2);
    }
}
