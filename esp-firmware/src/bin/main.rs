// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::Flex;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_i2c_firmware::config::{I2C_DEBUG_TRACE, I2C_HALF_PERIOD_US, I2C_SCL_GPIO_PIN, I2C_SDA_GPIO_PIN};
use esp_i2c_firmware::hal::GpioBitbang;
use esp_i2c_firmware::tasks::{bus_scan_task, register_poll_task};
use esp_i2c_firmware::{I2cMaster, SharedI2cMaster};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware und Bitbang-I2C, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    // Höherer Takt = weniger Software-Overhead pro Bus-Bit
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Bitbang-I2C auf GPIO7 (SCL) und GPIO6 (SDA)
    info!(
        "I2C: Bitbang master on SCL=GPIO{}, SDA=GPIO{}",
        I2C_SCL_GPIO_PIN, I2C_SDA_GPIO_PIN
    );
    let scl = Flex::new(peripherals.GPIO7);
    let sda = Flex::new(peripherals.GPIO6);
    let mut master = I2cMaster::new(GpioBitbang::new(scl, sda, I2C_HALF_PERIOD_US));
    master.initialize();
    master.set_debug(I2C_DEBUG_TRACE);

    // Master muss 'static sein für Tasks
    // Mutex serialisiert Transaktionen zwischen den Tasks
    static I2C_BUS: static_cell::StaticCell<SharedI2cMaster> = static_cell::StaticCell::new();
    let bus = &*I2C_BUS.init(Mutex::new(master));

    // Spawn Bus-Scan (einmalig) und Register-Poll (zyklisch)
    spawner.spawn(bus_scan_task(bus)).unwrap();
    spawner.spawn(register_poll_task(bus)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
