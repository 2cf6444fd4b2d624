use crate::{Address, Error};
use core::fmt::Debug;

/// A device type identified by the family code in its ROM address
pub trait Device: Sized {
    /// Device family code
    const FAMILY_CODE: u8;

    fn address(&self) -> &Address;

    /// Wraps `address` without looking at its family code
    fn from_address_unchecked(address: Address) -> Self;

    fn is_compatible(address: &Address) -> bool {
        address.family_code() == Self::FAMILY_CODE
    }

    /// Wraps `address` if it carries this device's family code
    fn from_address<E: Sized + Debug>(address: Address) -> Result<Self, Error<E>> {
        if Self::is_compatible(&address) {
            Ok(Self::from_address_unchecked(address))
        } else {
            Err(Error::FamilyCodeMismatch(
                Self::FAMILY_CODE,
                address.family_code(),
            ))
        }
    }
}
