//! Integration Tests für den embedded-hal Adapter
//!
//! Prüft, dass I2cMaster als `embedded_hal::i2c::I2c` für fremde
//! Treiber-Crates nutzbar ist.

mod common;

use common::BusEvent::{Ack, Nack, Read, Start, Stop, Write};
use common::{MockBitbangDriver, master_with};
use embedded_hal::i2c::{Error, ErrorKind, I2c, NoAcknowledgeSource, Operation};
use esp_i2c_core::{I2cError, I2cStatus, NackPhase};

#[test]
fn test_write_read_uses_repeated_start() {
    let mut master = master_with(MockBitbangDriver::with_read_data(&[0xAA, 0xBB]));
    let mut buffer = [0u8; 2];

    master.write_read(0x50, &[0x10], &mut buffer).unwrap();

    assert_eq!(buffer, [0xAA, 0xBB]);
    assert_eq!(
        master.driver().events,
        vec![
            Start,
            Write(0xA0),
            Write(0x10),
            Start,
            Write(0xA1),
            Read(0xAA),
            Ack,
            Read(0xBB),
            Nack,
            Stop
        ]
    );
}

#[test]
fn test_plain_write() {
    let mut master = master_with(MockBitbangDriver::new());

    master.write(0x3C, &[0x00, 0xAF]).unwrap();

    assert_eq!(
        master.driver().events,
        vec![Start, Write(0x78), Write(0x00), Write(0xAF), Stop]
    );
    assert_eq!(master.status(), I2cStatus::Ok);
}

#[test]
fn test_adjacent_writes_are_merged() {
    let mut master = master_with(MockBitbangDriver::new());

    master
        .transaction(
            0x50,
            &mut [Operation::Write(&[0x00, 0x10]), Operation::Write(&[0x42])],
        )
        .unwrap();

    assert_eq!(
        master.driver().events,
        vec![Start, Write(0xA0), Write(0x00), Write(0x10), Write(0x42), Stop]
    );
}

#[test]
fn test_adjacent_reads_nack_only_final_byte() {
    let mut master = master_with(MockBitbangDriver::with_read_data(&[1, 2, 3]));
    let mut first = [0u8; 1];
    let mut second = [0u8; 2];

    master
        .transaction(
            0x50,
            &mut [Operation::Read(&mut first), Operation::Read(&mut second)],
        )
        .unwrap();

    assert_eq!(first, [1]);
    assert_eq!(second, [2, 3]);
    assert_eq!(
        master.driver().events,
        vec![
            Start,
            Write(0xA1),
            Read(1),
            Ack,
            Read(2),
            Ack,
            Read(3),
            Nack,
            Stop
        ]
    );
}

#[test]
fn test_address_nack_aborts_transaction() {
    let mut master = master_with(MockBitbangDriver::with_devices(&[]));

    let result = master.write(0x50, &[0x00, 0x01]);

    assert_eq!(result, Err(I2cError::Nack(NackPhase::Address)));
    assert_eq!(master.driver().events, vec![Start, Write(0xA0), Stop]);
    assert_eq!(master.status(), I2cStatus::Error);
    assert_eq!(
        result.unwrap_err().kind(),
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    );
}

#[test]
fn test_data_nack_aborts_transaction() {
    let mut master = master_with(MockBitbangDriver::with_nack_on(&[2]));

    let result = master.write(0x50, &[0x00, 0x01, 0x02]);

    assert_eq!(result, Err(I2cError::Nack(NackPhase::Data { index: 1 })));
    assert_eq!(
        master.driver().events,
        vec![Start, Write(0xA0), Write(0x00), Write(0x01), Stop]
    );
}

#[test]
fn test_invalid_address_has_no_bus_activity() {
    let mut master = master_with(MockBitbangDriver::new());

    assert_eq!(master.write(0, &[0x00]), Err(I2cError::InvalidAddress(0)));
    assert!(master.driver().events.is_empty());
}

#[test]
fn test_empty_transaction_has_no_bus_activity() {
    let mut master = master_with(MockBitbangDriver::new());

    master.transaction(0x50, &mut []).unwrap();

    assert!(master.driver().events.is_empty());
}

#[test]
fn test_trailing_empty_read_keeps_nack_on_last_byte() {
    let mut master = master_with(MockBitbangDriver::with_read_data(&[0x5A]));
    let mut data = [0u8; 1];
    let mut empty = [0u8; 0];

    master
        .transaction(
            0x50,
            &mut [Operation::Read(&mut data), Operation::Read(&mut empty)],
        )
        .unwrap();

    assert_eq!(data, [0x5A]);
    assert_eq!(
        master.driver().events,
        vec![Start, Write(0xA1), Read(0x5A), Nack, Stop]
    );
}

#[test]
fn test_lone_empty_read_has_no_bus_activity() {
    let mut master = master_with(MockBitbangDriver::new());
    let mut empty = [0u8; 0];

    master
        .transaction(0x50, &mut [Operation::Read(&mut empty)])
        .unwrap();

    assert!(master.driver().events.is_empty());
    assert_eq!(master.status(), I2cStatus::Ok);
}

#[test]
fn test_empty_read_between_writes_is_skipped() {
    let mut master = master_with(MockBitbangDriver::new());
    let mut empty = [0u8; 0];

    master
        .transaction(
            0x50,
            &mut [
                Operation::Write(&[0x00]),
                Operation::Read(&mut empty),
                Operation::Write(&[0x42]),
            ],
        )
        .unwrap();

    assert_eq!(
        master.driver().events,
        vec![Start, Write(0xA0), Write(0x00), Write(0x42), Stop]
    );
}
