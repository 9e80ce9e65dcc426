//! embedded-hal 1.0 Adapter
//!
//! Damit lassen sich bestehende Sensor-Treiber (`embedded_hal::i2c::I2c`)
//! direkt auf dem Bitbang-Master betreiben.
//!
//! Anders als die Register-Helfer bricht `transaction` beim ersten NACK ab,
//! sendet STOP und liefert den Fehler.

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

use crate::sequencer::I2cMaster;
use crate::traits::BitbangDriver;
use crate::types::{Direction, I2cError, NackPhase, SlaveAddress};

impl<D: BitbangDriver> ErrorType for I2cMaster<D> {
    type Error = I2cError;
}

impl<D: BitbangDriver> I2c<SevenBitAddress> for I2cMaster<D> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let slave = match SlaveAddress::new(address) {
            Ok(slave) => slave,
            Err(e) => return Err(self.reject(e)),
        };
        // Nur leere Reads (oder gar nichts): kein Byte zu übertragen
        if operations.iter().all(is_empty_read) {
            return self.record(Ok(()));
        }

        let result = run_operations(self, slave, operations);
        self.driver_mut().stop();

        self.record(result)
    }
}

fn direction_of(operation: &Operation<'_>) -> Direction {
    match operation {
        Operation::Write(_) => Direction::Write,
        Operation::Read(_) => Direction::Read,
    }
}

/// Leere Reads erzeugen keinen Bus-Verkehr und zählen für die
/// Block-Bildung nicht mit
fn is_empty_read(operation: &Operation<'_>) -> bool {
    matches!(operation, Operation::Read(buffer) if buffer.is_empty())
}

/// Richtung der nächsten Operation nach `index`, die Bytes überträgt
fn next_direction(operations: &[Operation<'_>], index: usize) -> Option<Direction> {
    operations
        .iter()
        .skip(index + 1)
        .find(|operation| !is_empty_read(operation))
        .map(direction_of)
}

/// Führt die Operationen aus, ohne das abschließende STOP
///
/// Aufeinanderfolgende Operationen gleicher Richtung teilen sich eine
/// Adressierung. Bei Richtungswechsel folgt ein Repeated Start.
fn run_operations<D: BitbangDriver>(
    master: &mut I2cMaster<D>,
    slave: SlaveAddress,
    operations: &mut [Operation<'_>],
) -> Result<(), I2cError> {
    let mut previous: Option<Direction> = None;
    let mut data_index = 0;

    for i in 0..operations.len() {
        if is_empty_read(&operations[i]) {
            continue;
        }
        let next = next_direction(operations, i);

        match &mut operations[i] {
            Operation::Write(bytes) => {
                if previous != Some(Direction::Write) {
                    master.driver_mut().start();
                    master.write_acked(slave.write_byte(), NackPhase::Address)?;
                    data_index = 0;
                }
                for &byte in bytes.iter() {
                    master.write_acked(byte, NackPhase::Data { index: data_index })?;
                    data_index += 1;
                }
                previous = Some(Direction::Write);
            }
            Operation::Read(buffer) => {
                if previous != Some(Direction::Read) {
                    master.driver_mut().start();
                    master.write_acked(slave.read_byte(), NackPhase::ReadAddress)?;
                }
                // Das letzte Byte eines Lese-Blocks bekommt NACK
                let ends_run = next != Some(Direction::Read);
                let len = buffer.len();
                for (index, slot) in buffer.iter_mut().enumerate() {
                    *slot = master.driver_mut().read_byte();
                    if ends_run && index + 1 == len {
                        master.driver_mut().send_nack();
                    } else {
                        master.driver_mut().send_ack();
                    }
                }
                previous = Some(Direction::Read);
            }
        }
    }

    Ok(())
}
