// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use esp_i2c_core::{is_valid_address, parse_u8_literal};

// ============================================================================
// I2C Bus Konfiguration
// ============================================================================

/// GPIO-Pin für die Taktleitung (SCL)
/// Muss zu `peripherals.GPIO7` in main.rs passen
pub const I2C_SCL_GPIO_PIN: u8 = 7;

/// GPIO-Pin für die Datenleitung (SDA)
/// Muss zu `peripherals.GPIO6` in main.rs passen
pub const I2C_SDA_GPIO_PIN: u8 = 6;

/// Halbe Bit-Periode in Mikrosekunden
/// 5 µs → ca. 100 kHz (Standard Mode), Software-Overhead kommt dazu
pub const I2C_HALF_PERIOD_US: u32 = 5;

/// Trace-Ausgaben des Sequencers (eine Zeile pro Bus-Phase)
/// Für den Dauerbetrieb aus, bei der Inbetriebnahme an
pub const I2C_DEBUG_TRACE: bool = false;

// ============================================================================
// Demo-Device Konfiguration
// ============================================================================

/// Default Slave-Adresse: 24Cxx EEPROM mit A0..A2 auf GND
const DEFAULT_DEVICE_ADDRESS: u8 = 0x50;

/// 7-Bit Slave-Adresse des Demo-Devices
/// Wird zur Build-Zeit aus der Environment Variable I2C_DEVICE_ADDRESS geladen
/// (dezimal oder mit 0x Prefix, siehe .env.example). Ohne Variable gilt 0x50.
pub const DEVICE_ADDRESS: u8 = match option_env!("I2C_DEVICE_ADDRESS") {
    Some(text) => match parse_u8_literal(text) {
        Some(address) => address,
        None => panic!("I2C_DEVICE_ADDRESS ist keine gültige Byte-Zahl"),
    },
    None => DEFAULT_DEVICE_ADDRESS,
};

// 0 und 8-Bit Werte würden erst zur Laufzeit bei jedem Zyklus abgelehnt
const _: () = assert!(
    is_valid_address(DEVICE_ADDRESS),
    "I2C_DEVICE_ADDRESS muss im Bereich 1..=0x7F liegen"
);

/// Breite des Register-Pointers in Bytes
/// 24C32 und größer nutzen 16-Bit Speicheradressen
pub const DEVICE_REGISTER_WIDTH: u8 = 2;

/// Register (Speicheradresse), in das der Zähler geschrieben wird
pub const POLL_REGISTER: u32 = 0x0000;

/// Intervall zwischen zwei Schreib-/Lese-Zyklen in Sekunden
pub const POLL_INTERVAL_SECS: u64 = 5;

/// Schreibzyklus-Zeit des EEPROMs in Millisekunden
/// Solange antwortet der Chip mit NACK
pub const EEPROM_WRITE_CYCLE_MS: u64 = 10;

// ============================================================================
// Bus-Scan Konfiguration
// ============================================================================

/// Maximale Anzahl gemeldeter Devices beim Bus-Scan
pub const SCAN_CAPACITY: usize = 16;
