//! Gemeinsamer Mock für die Integration Tests
//!
//! MockBitbangDriver zeichnet jedes Bus-Ereignis auf und simuliert
//! einen Slave, der ACK/NACK und Lese-Daten liefert.

#![allow(dead_code)]

use std::collections::VecDeque;

use esp_i2c_core::{BitbangDriver, I2cMaster};

/// Ein Ereignis auf dem Bus, so wie der Driver es gesehen hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Start,
    Stop,
    Write(u8),
    Read(u8),
    Ack,
    Nack,
}

#[derive(Default)]
pub struct MockBitbangDriver {
    /// Alle Bus-Ereignisse in Reihenfolge
    pub events: Vec<BusEvent>,
    /// Anzahl gpio_init() Aufrufe
    pub gpio_init_count: usize,
    /// Anzahl master_init() Aufrufe
    pub master_init_count: usize,
    /// Bytes, die der Slave beim Lesen liefert (danach 0xFF)
    pub read_data: VecDeque<u8>,
    /// Indizes geschriebener Bytes (0-basiert, über alle Writes), die NACK bekommen
    pub nack_writes: Vec<usize>,
    /// Wenn gesetzt: nur diese Adressen bestätigen ihr Adress-Byte
    pub present_devices: Option<Vec<u8>>,
    /// Anzahl write_byte() Aufrufe
    pub write_count: usize,
    /// Letztes geschriebenes Byte und ob es direkt nach START kam
    pub last_write: Option<u8>,
    pub last_write_was_address: bool,
    pub after_start: bool,
}

impl MockBitbangDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_data(data: &[u8]) -> Self {
        Self {
            read_data: data.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn with_nack_on(indices: &[usize]) -> Self {
        Self {
            nack_writes: indices.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_devices(addresses: &[u8]) -> Self {
        Self {
            present_devices: Some(addresses.to_vec()),
            ..Self::default()
        }
    }

    /// Nur die geschriebenen Bytes
    pub fn written(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BusEvent::Write(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: BusEvent) -> usize {
        self.events.iter().filter(|event| **event == wanted).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BitbangDriver for MockBitbangDriver {
    fn gpio_init(&mut self) {
        self.gpio_init_count += 1;
    }

    fn master_init(&mut self) {
        self.master_init_count += 1;
    }

    fn start(&mut self) {
        self.events.push(BusEvent::Start);
        self.after_start = true;
    }

    fn stop(&mut self) {
        self.events.push(BusEvent::Stop);
        self.after_start = false;
    }

    fn write_byte(&mut self, byte: u8) {
        self.events.push(BusEvent::Write(byte));
        self.last_write = Some(byte);
        self.last_write_was_address = self.after_start;
        self.after_start = false;
        self.write_count += 1;
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.read_data.pop_front().unwrap_or(0xFF);
        self.events.push(BusEvent::Read(byte));
        byte
    }

    fn check_ack(&mut self) -> bool {
        let index = self.write_count.saturating_sub(1);
        if self.nack_writes.contains(&index) {
            return false;
        }
        match (&self.present_devices, self.last_write) {
            (Some(devices), Some(byte)) if self.last_write_was_address => {
                devices.contains(&(byte >> 1))
            }
            _ => true,
        }
    }

    fn send_ack(&mut self) {
        self.events.push(BusEvent::Ack);
    }

    fn send_nack(&mut self) {
        self.events.push(BusEvent::Nack);
    }
}

/// Initialisierter Master über einem frischen Mock
pub fn master_with(driver: MockBitbangDriver) -> I2cMaster<MockBitbangDriver> {
    let mut master = I2cMaster::new(driver);
    master.initialize();
    master
}
