//! Pure Business Logic Functions
//!
//! Kodierung der Bus-Bytes ohne Hardware-Dependencies (testbar!)

use crate::types::{Direction, MAX_SLAVE_ADDRESS};

/// Baut das Adress-Byte aus 7-Bit Adresse und Transfer-Richtung
///
/// # Beispiele
///
/// ```
/// # use esp_i2c_core::{address_byte, Direction};
/// assert_eq!(address_byte(0x50, Direction::Write), 0xA0);
/// assert_eq!(address_byte(0x50, Direction::Read), 0xA1);
/// ```
pub const fn address_byte(address: u8, direction: Direction) -> u8 {
    (address << 1) | direction.rw_bit()
}

/// Prüft, ob ein Wert als 7-Bit Slave-Adresse taugt (1..=0x7F)
///
/// `const`, damit die Firmware ihre Build-Konfiguration schon beim
/// Kompilieren prüfen kann.
///
/// ```
/// # use esp_i2c_core::is_valid_address;
/// assert!(is_valid_address(0x50));
/// assert!(!is_valid_address(0));
/// assert!(!is_valid_address(0xA0));
/// ```
pub const fn is_valid_address(address: u8) -> bool {
    address != 0 && address <= MAX_SLAVE_ADDRESS
}

/// Zerlegt einen Register-Pointer in `width` Bytes, MSB zuerst
///
/// Liefert einen festen Buffer und die Anzahl gültiger Bytes.
/// Breiten über 4 werden auf 4 begrenzt.
///
/// ```
/// # use esp_i2c_core::register_bytes;
/// let (bytes, len) = register_bytes(0x1234, 2);
/// assert_eq!(&bytes[..len], &[0x12, 0x34]);
/// ```
pub const fn register_bytes(value: u32, width: u8) -> ([u8; 4], usize) {
    let len = if width > 4 { 4 } else { width as usize };
    let be = value.to_be_bytes();
    let mut out = [0u8; 4];
    let mut i = 0;
    while i < len {
        out[i] = be[4 - len + i];
        i += 1;
    }
    (out, len)
}

/// Parst eine Byte-Konstante aus der Build-Konfiguration
///
/// Akzeptiert Dezimal (`80`) und Hex mit `0x` Prefix (`0x50`).
/// Leerzeichen am Rand werden ignoriert.
pub const fn parse_u8_literal(text: &str) -> Option<u8> {
    let bytes = text.trim_ascii().as_bytes();
    let (radix, mut i) = if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
        (16u32, 2)
    } else {
        (10u32, 0)
    };
    if i >= bytes.len() {
        return None;
    }

    let mut value: u32 = 0;
    while i < bytes.len() {
        let digit = match bytes[i] {
            b'0'..=b'9' => (bytes[i] - b'0') as u32,
            b'a'..=b'f' if radix == 16 => (bytes[i] - b'a' + 10) as u32,
            b'A'..=b'F' if radix == 16 => (bytes[i] - b'A' + 10) as u32,
            _ => return None,
        };
        value = value * radix + digit;
        if value > u8::MAX as u32 {
            return None;
        }
        i += 1;
    }
    Some(value as u8)
}
