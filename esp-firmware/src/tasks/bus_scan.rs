// Bus-Scan Task - Meldet alle Slaves auf dem I2C Bus einmal beim Boot
use defmt::{info, warn};
use heapless::Vec;

use crate::config::SCAN_CAPACITY;
use crate::{BitbangDriver, I2cMaster, SharedI2cMaster, SlaveAddress};

/// Bus-Scan Logic - Testbare Logik ohne Hardware-Abhängigkeit
///
/// Probt alle Adressen 0x08..=0x77 und loggt jeden Treffer.
///
/// # Parameter
/// - `master`: I2C Master (Hardware oder Mock)
pub fn bus_scan_logic<D: BitbangDriver>(master: &mut I2cMaster<D>) -> Vec<SlaveAddress, SCAN_CAPACITY> {
    let found = master.scan::<SCAN_CAPACITY>();

    if found.is_empty() {
        warn!("I2C: No devices found, check wiring and pull-ups");
    }
    for address in found.iter() {
        info!("I2C: Found device @ {=u8:#x}", address.get());
    }
    found
}

/// Bus-Scan Task - Embassy Task, läuft einmal und endet
///
/// # Parameter
/// - `bus`: Geteilter I2C Master (Mutex)
#[embassy_executor::task]
pub async fn bus_scan_task(bus: &'static SharedI2cMaster) {
    info!("I2C: Scanning bus...");
    let found = {
        let mut master = bus.lock().await;
        bus_scan_logic(&mut *master)
    };
    info!("I2C: Scan finished, {} device(s)", found.len());
}
