//! Core Types für den I2C Register-Zugriff
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

use crate::logic::{address_byte, is_valid_address, register_bytes};

/// Höchste gültige 7-Bit Slave-Adresse
pub const MAX_SLAVE_ADDRESS: u8 = 0x7F;

/// Maximale Breite eines Register-Pointers in Bytes
pub const MAX_REGISTER_WIDTH: u8 = 4;

/// Transfer-Richtung, kodiert als R/W-Bit im Adress-Byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Write,
    Read,
}

impl Direction {
    /// Wert des niederwertigsten Bits im Adress-Byte (Write = 0, Read = 1)
    pub const fn rw_bit(self) -> u8 {
        match self {
            Direction::Write => 0,
            Direction::Read => 1,
        }
    }
}

/// Validierte 7-Bit Slave-Adresse (1..=0x7F)
///
/// Die Adresse selbst geht nie auf den Bus. Erst beim Senden wird sie um
/// ein Bit nach links geschoben und mit dem R/W-Bit kombiniert.
///
/// Serialisiert als nackte Zahl. Beim Deserialisieren wird erneut geprüft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct SlaveAddress(u8);

impl SlaveAddress {
    /// Prüft die Adresse. 0 ist reserviert, Werte über 0x7F passen nicht in 7 Bit.
    pub const fn new(address: u8) -> Result<Self, I2cError> {
        if !is_valid_address(address) {
            Err(I2cError::InvalidAddress(address))
        } else {
            Ok(Self(address))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Adress-Byte wie es auf dem Bus erscheint
    pub const fn address_byte(self, direction: Direction) -> u8 {
        address_byte(self.0, direction)
    }

    pub const fn write_byte(self) -> u8 {
        self.address_byte(Direction::Write)
    }

    pub const fn read_byte(self) -> u8 {
        self.address_byte(Direction::Read)
    }
}

impl TryFrom<u8> for SlaveAddress {
    type Error = I2cError;

    fn try_from(address: u8) -> Result<Self, Self::Error> {
        Self::new(address)
    }
}

impl From<SlaveAddress> for u8 {
    fn from(address: SlaveAddress) -> Self {
        address.0
    }
}

/// Register-Pointer mit Breite 1..=4 Bytes
///
/// Wird vor der Datenphase MSB zuerst gesendet. Der Wert muss in die
/// angegebene Breite passen. Serde-Form ist das Paar `(value, width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(u32, u8)", into = "(u32, u8)"))]
pub struct RegisterPointer {
    value: u32,
    width: u8,
}

impl RegisterPointer {
    pub const fn new(value: u32, width: u8) -> Result<Self, I2cError> {
        if width == 0 || width > MAX_REGISTER_WIDTH {
            return Err(I2cError::InvalidRegisterWidth(width));
        }
        if width < MAX_REGISTER_WIDTH && value >> (width as u32 * 8) != 0 {
            return Err(I2cError::RegisterOutOfRange { value, width });
        }
        Ok(Self { value, width })
    }

    pub const fn value(self) -> u32 {
        self.value
    }

    pub const fn width(self) -> u8 {
        self.width
    }

    /// Bytes in Sende-Reihenfolge (Big Endian, genau `width` Stück)
    pub fn bytes(self) -> impl Iterator<Item = u8> {
        let (bytes, len) = register_bytes(self.value, self.width);
        bytes.into_iter().take(len)
    }
}

impl TryFrom<(u32, u8)> for RegisterPointer {
    type Error = I2cError;

    fn try_from((value, width): (u32, u8)) -> Result<Self, Self::Error> {
        Self::new(value, width)
    }
}

impl From<RegisterPointer> for (u32, u8) {
    fn from(pointer: RegisterPointer) -> Self {
        (pointer.value, pointer.width)
    }
}

/// Status der letzten Transaktion
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum I2cStatus {
    #[default]
    Ok,
    Error,
}

/// Phase einer Transaktion, in der der Slave mit NACK geantwortet hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NackPhase {
    /// Adress-Byte mit Write-Bit
    Address,
    /// Byte `index` des Register-Pointers
    Register { index: u8 },
    /// Datenbyte `index`
    Data { index: usize },
    /// Adress-Byte mit Read-Bit nach dem Repeated Start
    ReadAddress,
}

/// Fehler-Typ für I2C-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum I2cError {
    /// Slave-Adresse ist 0 oder größer als 0x7F
    InvalidAddress(u8),
    /// Register-Breite außerhalb von 1..=4
    InvalidRegisterWidth(u8),
    /// Register-Pointer passt nicht in die angegebene Breite
    RegisterOutOfRange { value: u32, width: u8 },
    /// Lesen mit leerem Buffer
    EmptyBuffer,
    /// Slave hat ein Byte nicht bestätigt
    Nack(NackPhase),
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I2cError::InvalidAddress(address) => {
                write!(f, "invalid i2c slave address {address:#04x}")
            }
            I2cError::InvalidRegisterWidth(width) => {
                write!(f, "register width {width} outside of 1..=4")
            }
            I2cError::RegisterOutOfRange { value, width } => {
                write!(f, "register pointer {value:#x} does not fit in {width} byte(s)")
            }
            I2cError::EmptyBuffer => f.write_str("read buffer is empty"),
            I2cError::Nack(NackPhase::Address) => f.write_str("NACK on write address"),
            I2cError::Nack(NackPhase::Register { index }) => {
                write!(f, "NACK on register pointer byte {index}")
            }
            I2cError::Nack(NackPhase::Data { index }) => write!(f, "NACK on data byte {index}"),
            I2cError::Nack(NackPhase::ReadAddress) => f.write_str("NACK on read address"),
        }
    }
}

impl core::error::Error for I2cError {}

impl embedded_hal::i2c::Error for I2cError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

        match self {
            I2cError::Nack(NackPhase::Address | NackPhase::ReadAddress) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
            I2cError::Nack(NackPhase::Register { .. } | NackPhase::Data { .. }) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            }
            _ => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slave_address_rejects_zero() {
        assert_eq!(SlaveAddress::new(0), Err(I2cError::InvalidAddress(0)));
    }

    #[test]
    fn test_slave_address_rejects_eight_bit_values() {
        assert_eq!(SlaveAddress::new(0x80), Err(I2cError::InvalidAddress(0x80)));
        assert_eq!(SlaveAddress::new(0xFF), Err(I2cError::InvalidAddress(0xFF)));
    }

    #[test]
    fn test_slave_address_wire_bytes() {
        let address = SlaveAddress::new(0x50).unwrap();
        assert_eq!(address.get(), 0x50);
        assert_eq!(address.write_byte(), 0xA0);
        assert_eq!(address.read_byte(), 0xA1);
    }

    #[test]
    fn test_register_pointer_width_limits() {
        assert_eq!(
            RegisterPointer::new(0, 0),
            Err(I2cError::InvalidRegisterWidth(0))
        );
        assert_eq!(
            RegisterPointer::new(0, 5),
            Err(I2cError::InvalidRegisterWidth(5))
        );
        assert!(RegisterPointer::new(u32::MAX, 4).is_ok());
    }

    #[test]
    fn test_register_pointer_out_of_range() {
        assert_eq!(
            RegisterPointer::new(0x100, 1),
            Err(I2cError::RegisterOutOfRange {
                value: 0x100,
                width: 1
            })
        );
        assert!(RegisterPointer::new(0xFF, 1).is_ok());
        assert!(RegisterPointer::new(0xFFFF, 2).is_ok());
    }

    #[test]
    fn test_register_pointer_bytes_big_endian() {
        let pointer = RegisterPointer::new(0x1234, 2).unwrap();
        let mut bytes = pointer.bytes();
        assert_eq!(bytes.next(), Some(0x12));
        assert_eq!(bytes.next(), Some(0x34));
        assert_eq!(bytes.next(), None);
    }

    #[test]
    fn test_status_default_is_ok() {
        assert_eq!(I2cStatus::default(), I2cStatus::Ok);
    }

    #[test]
    fn test_error_kind_mapping() {
        use embedded_hal::i2c::{Error, ErrorKind, NoAcknowledgeSource};

        assert_eq!(
            I2cError::Nack(NackPhase::ReadAddress).kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        );
        assert_eq!(
            I2cError::Nack(NackPhase::Data { index: 3 }).kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
        );
        assert_eq!(I2cError::EmptyBuffer.kind(), ErrorKind::Other);
    }
}
