use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
    str::FromStr,
};

/// 64-bit ROM registration number of a device on the bus
///
/// Byte 0 is the family code, bytes 1..7 the serial number and byte 7 the
/// ROM CRC. The driver treats it as an opaque selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Address {
    raw: [u8; Self::BYTES],
}

impl From<[u8; Address::BYTES]> for Address {
    fn from(raw: [u8; Address::BYTES]) -> Self {
        Address { raw }
    }
}

impl From<Address> for [u8; Address::BYTES] {
    fn from(addr: Address) -> [u8; Address::BYTES] {
        addr.raw
    }
}

impl Deref for Address {
    type Target = [u8; Self::BYTES];

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Address {
    /// The length of device address in bytes
    pub const BYTES: usize = 8;

    pub const fn new(raw: [u8; Self::BYTES]) -> Self {
        Address { raw }
    }

    pub fn family_code(&self) -> u8 {
        self.raw[0]
    }

    pub fn serial_number(&self) -> &[u8] {
        &self.raw[1..7]
    }

    pub fn rom_crc(&self) -> u8 {
        self.raw[7]
    }
}

/// Address parse error
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Fewer than 16 hex digits
    NotEnough,
    /// More than 16 hex digits
    TooMany,
    /// Non hex character
    Invalid,
}

impl FromStr for Address {
    type Err = AddressError;

    /// Accepts 16 hex digits, optionally grouped with spaces or colons
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut raw = [0u8; Self::BYTES];
        let mut digits = s.chars().filter(|c| !c.is_whitespace() && *c != ':');

        for byte in raw.iter_mut() {
            let (high, low) = match (digits.next(), digits.next()) {
                (Some(high), Some(low)) => (high, low),
                _ => return Err(AddressError::NotEnough),
            };
            let high = high.to_digit(16).ok_or(AddressError::Invalid)?;
            let low = low.to_digit(16).ok_or(AddressError::Invalid)?;
            *byte = ((high << 4) | low) as u8;
        }

        if digits.next().is_some() {
            return Err(AddressError::TooMany);
        }

        Ok(Address { raw })
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (i, byte) in self.raw.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
