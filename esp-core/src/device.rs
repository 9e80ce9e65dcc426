//! Device Handle mit fester Slave-Adresse
//!
//! Bindet Adresse und Register-Breite eines Chips an den Master, damit
//! Treiber-Code nur noch Register und Daten angeben muss.

use crate::sequencer::I2cMaster;
use crate::traits::BitbangDriver;
use crate::types::{I2cError, I2cStatus, SlaveAddress};

/// Register-orientierter Zugriff auf einen einzelnen Slave
///
/// Wird mit [`I2cMaster::device`] erzeugt und leiht sich den Master
/// exklusiv für die Lebensdauer des Handles.
pub struct RegisterDevice<'a, D: BitbangDriver> {
    master: &'a mut I2cMaster<D>,
    address: SlaveAddress,
    register_width: u8,
}

impl<'a, D: BitbangDriver> RegisterDevice<'a, D> {
    pub(crate) fn new(master: &'a mut I2cMaster<D>, address: SlaveAddress, register_width: u8) -> Self {
        Self {
            master,
            address,
            register_width,
        }
    }

    pub fn address(&self) -> SlaveAddress {
        self.address
    }

    pub fn register_width(&self) -> u8 {
        self.register_width
    }

    /// Status der letzten Transaktion auf dem Master
    pub fn status(&self) -> I2cStatus {
        self.master.status()
    }

    pub fn write_register(&mut self, register: u32, value: u8) -> Result<(), I2cError> {
        self.master
            .write_byte(self.address.get(), register, self.register_width, value)
    }

    pub fn write_registers(&mut self, register: u32, data: &[u8]) -> Result<(), I2cError> {
        self.master
            .write_bytes(self.address.get(), register, self.register_width, data)
    }

    pub fn read_register(&mut self, register: u32) -> Result<u8, I2cError> {
        self.master
            .read_byte(self.address.get(), register, self.register_width)
    }

    pub fn read_registers(&mut self, register: u32, buffer: &mut [u8]) -> Result<(), I2cError> {
        self.master
            .read_bytes(self.address.get(), register, self.register_width, buffer)
    }

    /// Read-Modify-Write eines einzelnen Registers
    ///
    /// Schreibt nur, wenn sich der Wert tatsächlich ändert.
    /// Liefert den neuen Registerwert.
    pub fn modify_register<F>(&mut self, register: u32, f: F) -> Result<u8, I2cError>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.read_register(register)?;
        let updated = f(current);
        if updated != current {
            self.write_register(register, updated)?;
        }
        Ok(updated)
    }
}
