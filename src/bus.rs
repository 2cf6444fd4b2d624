use crate::{Address, Error, OpCode};
use core::fmt::Debug;

/// Bus transport the driver talks through
///
/// Implementations own the electrical layer (reset pulse, presence detect,
/// bit timing, ROM matching) and the CRC-8 arithmetic. The caller owns the
/// transport and lends it to the driver for each transaction; nothing
/// between a `reset` and the end of a transaction may touch the bus.
pub trait OneWire {
    type Error: Sized + Debug;

    /// Issues a reset pulse
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Addresses a single device by its ROM code (Match ROM)
    fn select(&mut self, address: &Address) -> Result<(), Self::Error>;

    /// Transmits one byte, `power` keeps the strong pull-up on afterwards
    fn write(&mut self, byte: u8, power: bool) -> Result<(), Self::Error>;

    /// Receives one byte
    fn read(&mut self) -> Result<u8, Self::Error>;

    /// Dallas/Maxim CRC-8 over `data`
    fn crc8(&self, data: &[u8]) -> u8;

    fn reset_select(&mut self, address: &Address) -> Result<(), Self::Error> {
        self.reset()?;
        self.select(address)
    }

    fn write_command(&mut self, cmd: impl OpCode) -> Result<(), Self::Error> {
        self.write(cmd.op_code(), false)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for b in bytes {
            self.write(*b, false)?;
        }
        Ok(())
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        for d in dst {
            *d = self.read()?;
        }
        Ok(())
    }

    fn reset_select_write_only(
        &mut self,
        address: &Address,
        write: &[u8],
    ) -> Result<(), Error<Self::Error>> {
        self.reset_select(address)?;
        self.write_bytes(write)?;
        Ok(())
    }

    fn reset_select_write_read(
        &mut self,
        address: &Address,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Error<Self::Error>> {
        self.reset_select(address)?;
        self.write_bytes(write)?;
        self.read_bytes(read)?;
        Ok(())
    }

    /// Checks `data` against the trailing CRC byte read from the device
    fn ensure_correct_crc8(&self, data: &[u8], crc8: u8) -> Result<(), Error<Self::Error>> {
        let computed = self.crc8(data);
        if computed != crc8 {
            Err(Error::CrcMismatch(computed, crc8))
        } else {
            Ok(())
        }
    }
}
