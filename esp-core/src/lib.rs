//! ESP I2C Core - Platform-agnostic I2C Register-Zugriff
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert den Bitbang-Driver-Trait, die Typen und die
//! Sequenzierung der Register-Transaktionen.

#![no_std]

#[macro_use]
mod macros;

pub mod device;
pub mod hal_i2c;
pub mod logic;
pub mod sequencer;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use device::RegisterDevice;
pub use logic::{address_byte, is_valid_address, parse_u8_literal, register_bytes};
pub use sequencer::{I2cMaster, SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS};
pub use traits::BitbangDriver;
pub use types::{
    Direction, I2cError, I2cStatus, MAX_REGISTER_WIDTH, MAX_SLAVE_ADDRESS, NackPhase,
    RegisterPointer, SlaveAddress,
};
