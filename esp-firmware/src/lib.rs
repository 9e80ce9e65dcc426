// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-i2c-core
pub use esp_i2c_core::{
    BitbangDriver, I2cError, I2cMaster, I2cStatus, RegisterDevice, SlaveAddress,
};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;

use crate::hal::GpioBitbang;

// ============================================================================
// Type-Aliase für den geteilten Bus
// ============================================================================
//
// Statt:  Mutex<NoopRawMutex, I2cMaster<GpioBitbang<'static>>>
// Nutze:  SharedI2cMaster

/// I2C Master auf den echten GPIOs
pub type BusMaster = I2cMaster<GpioBitbang<'static>>;

/// Geteilter I2C Master für alle Tasks
///
/// NoopRawMutex reicht, weil alle Tasks auf demselben Executor laufen.
/// Der Lock schützt nur vor verschachtelten Transaktionen über `.await` hinweg.
pub type SharedI2cMaster = Mutex<NoopRawMutex, BusMaster>;
