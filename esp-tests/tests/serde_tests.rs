//! Integration Tests für das `serde` Feature
//!
//! Status und Fehler sollen sich z.B. als JSON an einen Host melden lassen.

mod common;

use common::{MockBitbangDriver, master_with};
use esp_i2c_core::{I2cError, I2cStatus, RegisterPointer, SlaveAddress};

fn to_json<T: serde::Serialize>(value: &T) -> String {
    let mut buffer = [0u8; 64];
    let len = serde_json_core::to_slice(value, &mut buffer).unwrap();
    String::from_utf8(buffer[..len].to_vec()).unwrap()
}

#[test]
fn test_status_after_nack_serializes_as_error() {
    let mut master = master_with(MockBitbangDriver::with_devices(&[]));
    let _ = master.write_byte(0x50, 0x00, 1, 0xAB);

    assert_eq!(to_json(&master.status()), "\"Error\"");
}

#[test]
fn test_status_round_trip() {
    let (status, _) = serde_json_core::from_slice::<I2cStatus>(b"\"Ok\"").unwrap();
    assert_eq!(status, I2cStatus::Ok);
    assert_eq!(to_json(&I2cStatus::Error), "\"Error\"");
}

#[test]
fn test_unit_error_round_trip() {
    assert_eq!(to_json(&I2cError::EmptyBuffer), "\"EmptyBuffer\"");

    let (error, _) = serde_json_core::from_slice::<I2cError>(b"\"EmptyBuffer\"").unwrap();
    assert_eq!(error, I2cError::EmptyBuffer);
}

#[test]
fn test_slave_address_serializes_as_plain_number() {
    let address = SlaveAddress::new(0x50).unwrap();
    assert_eq!(to_json(&address), "80");

    let (parsed, _) = serde_json_core::from_slice::<SlaveAddress>(b"80").unwrap();
    assert_eq!(parsed, address);
}

#[test]
fn test_slave_address_deserialize_validates() {
    assert!(serde_json_core::from_slice::<SlaveAddress>(b"0").is_err());
    assert!(serde_json_core::from_slice::<SlaveAddress>(b"128").is_err());
}

#[test]
fn test_register_pointer_round_trip() {
    let pointer = RegisterPointer::new(0x1234, 2).unwrap();
    assert_eq!(to_json(&pointer), "[4660,2]");

    let (parsed, _) = serde_json_core::from_slice::<RegisterPointer>(b"[4660,2]").unwrap();
    assert_eq!(parsed, pointer);
}

#[test]
fn test_register_pointer_deserialize_validates() {
    assert!(serde_json_core::from_slice::<RegisterPointer>(b"[0,5]").is_err());
    assert!(serde_json_core::from_slice::<RegisterPointer>(b"[256,1]").is_err());
}
