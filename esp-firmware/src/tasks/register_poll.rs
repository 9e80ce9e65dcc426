// Register Poll Task - Schreibt einen Zähler ins Demo-Device und liest ihn zurück
use defmt::{error, info, warn};
use embassy_time::{Duration, Timer};

use crate::config::{
    DEVICE_ADDRESS, DEVICE_REGISTER_WIDTH, EEPROM_WRITE_CYCLE_MS, POLL_INTERVAL_SECS, POLL_REGISTER,
};
use crate::{BitbangDriver, I2cError, I2cMaster, SharedI2cMaster};

/// Schreibt `value` in das Poll-Register
pub fn write_counter<D: BitbangDriver>(master: &mut I2cMaster<D>, value: u8) -> Result<(), I2cError> {
    master
        .device(DEVICE_ADDRESS, DEVICE_REGISTER_WIDTH)?
        .write_register(POLL_REGISTER, value)
}

/// Liest das Poll-Register zurück
pub fn read_counter<D: BitbangDriver>(master: &mut I2cMaster<D>) -> Result<u8, I2cError> {
    master
        .device(DEVICE_ADDRESS, DEVICE_REGISTER_WIDTH)?
        .read_register(POLL_REGISTER)
}

/// Register Poll Task - Embassy Task für parallele Ausführung
///
/// Pro Zyklus:
/// 1. Zähler schreiben (Bus wird danach freigegeben)
/// 2. Schreibzyklus des EEPROMs abwarten
/// 3. Register zurücklesen und vergleichen
///
/// Fehler werden geloggt, der Task läuft weiter.
///
/// # Parameter
/// - `bus`: Geteilter I2C Master (Mutex)
#[embassy_executor::task]
pub async fn register_poll_task(bus: &'static SharedI2cMaster) {
    info!(
        "I2C: Polling device {=u8:#x}, register {=u32:#x}",
        DEVICE_ADDRESS, POLL_REGISTER
    );

    let mut counter: u8 = 0;

    loop {
        let written = {
            let mut master = bus.lock().await;
            write_counter(&mut *master, counter)
        };

        match written {
            Ok(()) => {
                Timer::after(Duration::from_millis(EEPROM_WRITE_CYCLE_MS)).await;

                let read = {
                    let mut master = bus.lock().await;
                    read_counter(&mut *master)
                };
                match read {
                    Ok(value) if value == counter => info!("I2C: Register verified: {}", value),
                    Ok(value) => warn!("I2C: Register mismatch: wrote {}, read {}", counter, value),
                    Err(e) => error!("I2C: Read failed: {}", e),
                }
            }
            Err(e) => error!("I2C: Write failed: {}", e),
        }

        let status = bus.lock().await.status();
        info!("I2C: Status after cycle: {}", status);

        counter = counter.wrapping_add(1);
        Timer::after(Duration::from_secs(POLL_INTERVAL_SECS)).await;
    }
}
