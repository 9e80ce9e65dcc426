//! Transaction Sequencer
//!
//! Setzt die Bus-Primitive des Bitbang-Drivers zu den üblichen
//! Register-Zugriffen zusammen:
//!
//! ```text
//! Schreiben: START | ADDR+W | REG (MSB zuerst) | DATEN...           | STOP
//! Lesen:     START | ADDR+W | REG (MSB zuerst) | START | ADDR+R | DATEN... | STOP
//! ```
//!
//! Debug-, Status- und Init-Flag gehören zur jeweiligen `I2cMaster` Instanz.
//! Wer den Bus aus mehreren Tasks benutzt, legt den Master hinter einen Mutex.

use heapless::Vec;

use crate::device::RegisterDevice;
use crate::traits::BitbangDriver;
use crate::types::{I2cError, I2cStatus, NackPhase, RegisterPointer, SlaveAddress};

/// Erste Adresse beim Bus-Scan (0x00-0x07 sind reserviert)
pub const SCAN_FIRST_ADDRESS: u8 = 0x08;

/// Letzte Adresse beim Bus-Scan (0x78-0x7F sind reserviert)
pub const SCAN_LAST_ADDRESS: u8 = 0x77;

/// I2C Master über einem Bitbang-Driver
///
/// Jede Register-Transaktion läuft als feste Sequenz ab. Ein NACK in der
/// Adress- oder Register-Phase bricht die Sequenz nicht ab, wird aber als
/// Fehler gemeldet. Der Status spiegelt immer das Ergebnis der letzten
/// Transaktion wider.
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `D: BitbangDriver` ermöglicht:
/// - Real Hardware (GpioBitbang) im Production-Code
/// - Mock Implementation (MockBitbangDriver) in Tests
pub struct I2cMaster<D: BitbangDriver> {
    driver: D,
    pub(crate) debug: bool,
    status: I2cStatus,
    initialized: bool,
}

impl<D: BitbangDriver> I2cMaster<D> {
    /// Übernimmt den Driver. Die Hardware wird erst mit `initialize()` aufgesetzt.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            debug: true,
            status: I2cStatus::Ok,
            initialized: false,
        }
    }

    /// Initialisiert GPIOs und Bitbang-Master genau einmal
    ///
    /// Setzt Status auf `Ok` und schaltet Debug-Ausgaben ein.
    /// Weitere Aufrufe haben keine Wirkung.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.driver.gpio_init();
        self.driver.master_init();

        self.status = I2cStatus::Ok;
        self.debug = true;
        self.initialized = true;

        bus_trace!(self, "I2C: bitbang master initialized");
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn status(&self) -> I2cStatus {
        self.status
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Gibt den Driver zurück
    pub fn release(self) -> D {
        self.driver
    }

    // ========================================================================
    // Register-Transaktionen
    // ========================================================================

    /// Schreibt ein Byte in das Register `register` des Slaves
    ///
    /// # Parameter
    /// - `address`: 7-Bit Slave-Adresse (1..=0x7F)
    /// - `register`: Register-Pointer
    /// - `register_width`: Breite des Pointers in Bytes (1..=4)
    /// - `value`: Datenbyte
    ///
    /// # Fehlerbehandlung
    /// Ungültige Argumente werden ohne Bus-Aktivität abgewiesen.
    /// NACKs werden gemeldet, die Sequenz läuft trotzdem bis zum STOP.
    pub fn write_byte(
        &mut self,
        address: u8,
        register: u32,
        register_width: u8,
        value: u8,
    ) -> Result<(), I2cError> {
        let (slave, pointer) = self.validate(address, register, register_width)?;
        let mut nack = None;

        self.send_preamble(slave, pointer, &mut nack);
        self.write_checked(value, NackPhase::Data { index: 0 }, &mut nack);
        self.driver.stop();

        self.finish(nack)
    }

    /// Schreibt mehrere Bytes ab Register `register`
    ///
    /// Ein leerer Buffer erzeugt nur Adresse, Register-Pointer und STOP.
    /// Bei einem NACK in der Datenphase wird der Transfer abgebrochen und
    /// genau ein STOP gesendet.
    pub fn write_bytes(
        &mut self,
        address: u8,
        register: u32,
        register_width: u8,
        data: &[u8],
    ) -> Result<(), I2cError> {
        let (slave, pointer) = self.validate(address, register, register_width)?;
        let mut nack = None;

        self.send_preamble(slave, pointer, &mut nack);
        for (index, &byte) in data.iter().enumerate() {
            if !self.write_checked(byte, NackPhase::Data { index }, &mut nack) {
                bus_warn!(
                    self,
                    "I2C: aborting write after {=usize} of {=usize} bytes",
                    index,
                    data.len()
                );
                break;
            }
        }
        self.driver.stop();

        self.finish(nack)
    }

    /// Liest ein Byte aus Register `register` (mit Repeated Start)
    pub fn read_byte(
        &mut self,
        address: u8,
        register: u32,
        register_width: u8,
    ) -> Result<u8, I2cError> {
        let (slave, pointer) = self.validate(address, register, register_width)?;
        let mut nack = None;

        self.send_read_preamble(slave, pointer, &mut nack);
        let value = self.driver.read_byte();
        self.driver.send_nack();
        self.driver.stop();

        bus_trace!(self, "I2C: read {=u8:#x}", value);
        self.finish(nack).map(|()| value)
    }

    /// Liest `buffer.len()` Bytes ab Register `register`
    ///
    /// Nach jedem Byte außer dem letzten folgt ein ACK, nach dem letzten ein NACK.
    /// Ein leerer Buffer wird ohne Bus-Aktivität abgewiesen.
    pub fn read_bytes(
        &mut self,
        address: u8,
        register: u32,
        register_width: u8,
        buffer: &mut [u8],
    ) -> Result<(), I2cError> {
        let (slave, pointer) = self.validate(address, register, register_width)?;
        if buffer.is_empty() {
            return Err(self.reject(I2cError::EmptyBuffer));
        }
        let mut nack = None;

        self.send_read_preamble(slave, pointer, &mut nack);
        let last = buffer.len() - 1;
        for (index, slot) in buffer.iter_mut().enumerate() {
            *slot = self.driver.read_byte();
            if index < last {
                self.driver.send_ack();
            } else {
                self.driver.send_nack();
            }
        }
        self.driver.stop();

        self.finish(nack)
    }

    // ========================================================================
    // Rohe Bus-Primitive
    // ========================================================================

    pub fn send_start(&mut self) {
        self.driver.start();
    }

    pub fn send_stop(&mut self) {
        self.driver.stop();
    }

    /// Legt ein Byte auf den Bus und liefert `true` bei ACK
    pub fn send_byte(&mut self, value: u8) -> bool {
        self.driver.write_byte(value);
        self.driver.check_ack()
    }

    // ========================================================================
    // Bus-Scan und Device-Handles
    // ========================================================================

    /// Prüft ob ein Slave unter `address` antwortet
    ///
    /// Sendet nur START, Adresse mit Write-Bit und STOP.
    pub fn probe(&mut self, address: u8) -> Result<bool, I2cError> {
        let slave = match SlaveAddress::new(address) {
            Ok(slave) => slave,
            Err(e) => return Err(self.reject(e)),
        };

        let present = self.probe_slave(slave);
        self.status = I2cStatus::Ok;
        Ok(present)
    }

    /// Sucht alle Slaves im Bereich 0x08..=0x77
    ///
    /// Bricht ab, sobald `N` Adressen gefunden wurden.
    pub fn scan<const N: usize>(&mut self) -> Vec<SlaveAddress, N> {
        let mut found = Vec::new();

        for address in SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS {
            let Ok(slave) = SlaveAddress::new(address) else {
                continue;
            };
            if !self.probe_slave(slave) {
                continue;
            }
            bus_trace!(self, "I2C: device found at {=u8:#x}", address);
            if found.push(slave).is_err() || found.is_full() {
                bus_warn!(self, "I2C: scan stopped, result full with {=usize} devices", N);
                break;
            }
        }

        self.status = I2cStatus::Ok;
        found
    }

    /// Handle für einen Slave mit fester Adresse und Register-Breite
    pub fn device(
        &mut self,
        address: u8,
        register_width: u8,
    ) -> Result<RegisterDevice<'_, D>, I2cError> {
        let checked = SlaveAddress::new(address)
            .and_then(|slave| RegisterPointer::new(0, register_width).map(|_| slave));

        match checked {
            Ok(slave) => Ok(RegisterDevice::new(self, slave, register_width)),
            Err(e) => Err(self.reject(e)),
        }
    }

    // ========================================================================
    // Interne Helfer
    // ========================================================================

    fn validate(
        &mut self,
        address: u8,
        register: u32,
        register_width: u8,
    ) -> Result<(SlaveAddress, RegisterPointer), I2cError> {
        if !self.initialized {
            bus_warn!(self, "I2C: transaction before initialize()");
        }

        let checked = SlaveAddress::new(address).and_then(|slave| {
            RegisterPointer::new(register, register_width).map(|pointer| (slave, pointer))
        });

        checked.map_err(|e| self.reject(e))
    }

    /// Markiert den Status als Fehler und gibt den Fehler zurück
    pub(crate) fn reject(&mut self, error: I2cError) -> I2cError {
        self.status = I2cStatus::Error;
        bus_warn!(self, "I2C: rejected: {}", error);
        error
    }

    fn send_preamble(
        &mut self,
        slave: SlaveAddress,
        pointer: RegisterPointer,
        nack: &mut Option<NackPhase>,
    ) {
        bus_trace!(
            self,
            "I2C: start, address {=u8:#x}, register {=u32:#x} ({=u8} bytes)",
            slave.get(),
            pointer.value(),
            pointer.width()
        );

        self.driver.start();
        self.write_checked(slave.write_byte(), NackPhase::Address, nack);
        for (index, byte) in pointer.bytes().enumerate() {
            self.write_checked(
                byte,
                NackPhase::Register {
                    index: index as u8,
                },
                nack,
            );
        }
    }

    fn send_read_preamble(
        &mut self,
        slave: SlaveAddress,
        pointer: RegisterPointer,
        nack: &mut Option<NackPhase>,
    ) {
        self.send_preamble(slave, pointer, nack);

        bus_trace!(self, "I2C: repeated start, read address {=u8:#x}", slave.read_byte());
        self.driver.start();
        self.write_checked(slave.read_byte(), NackPhase::ReadAddress, nack);
    }

    /// Sendet ein Byte und merkt sich den ersten NACK, ohne abzubrechen
    fn write_checked(&mut self, byte: u8, phase: NackPhase, nack: &mut Option<NackPhase>) -> bool {
        match self.write_acked(byte, phase) {
            Ok(()) => true,
            Err(_) => {
                nack.get_or_insert(phase);
                false
            }
        }
    }

    /// Sendet ein Byte und liefert einen Fehler bei NACK
    pub(crate) fn write_acked(&mut self, byte: u8, phase: NackPhase) -> Result<(), I2cError> {
        self.driver.write_byte(byte);
        if self.driver.check_ack() {
            Ok(())
        } else {
            bus_warn!(self, "I2C: slave responded NACK ({})", phase);
            Err(I2cError::Nack(phase))
        }
    }

    fn probe_slave(&mut self, slave: SlaveAddress) -> bool {
        self.driver.start();
        self.driver.write_byte(slave.write_byte());
        let present = self.driver.check_ack();
        self.driver.stop();
        present
    }

    /// Schließt eine Transaktion ab und setzt den Status
    fn finish(&mut self, nack: Option<NackPhase>) -> Result<(), I2cError> {
        self.record(match nack {
            Some(phase) => Err(I2cError::Nack(phase)),
            None => Ok(()),
        })
    }

    /// Übernimmt das Ergebnis einer Transaktion in den Status
    pub(crate) fn record(&mut self, result: Result<(), I2cError>) -> Result<(), I2cError> {
        self.status = match result {
            Ok(()) => I2cStatus::Ok,
            Err(_) => I2cStatus::Error,
        };
        result
    }
}
