use core::fmt::Debug;

/// Error type
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: Sized + Debug> {
    /// Page checksum did not match: (computed, received)
    CrcMismatch(u8, u8),
    /// Address does not belong to the device family: (expected, actual)
    FamilyCodeMismatch(u8, u8),
    /// Bus transport failure
    PortError(E),
}

impl<E: Sized + Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::PortError(e)
    }
}

impl<E: Sized + Debug> Error<E> {
    /// True when the bus answered but the data failed the integrity check
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Error::CrcMismatch(..))
    }
}
