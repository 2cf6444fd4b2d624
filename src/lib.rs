#![no_std]
#![doc = include_str!("../README.md")]

#[macro_use]
mod fmt;

mod address;
mod bus;
mod command;
mod config;
mod device;
mod ds2438;
#[cfg(test)]
mod mock;
pub mod page;
mod result;

pub use address::{Address, AddressError};
pub use bus::OneWire;
pub use command::{Command, OpCode, Page};
pub use config::{Calibration, Channel, Config, CURRENT_LIMIT};
pub use device::Device;
pub use ds2438::{
    Ds2438, Freshness, SETTLE_MS, TEMPERATURE_CONVERSION_MS, VOLTAGE_CONVERSION_MS,
};
pub use page::{PageZero, Reading, Status};
pub use result::Error;
