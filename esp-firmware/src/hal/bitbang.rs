// GPIO Bitbang-Driver für den I2C Master
//
// Erzeugt die I2C-Signale per Software auf zwei Open-Drain GPIOs.
// Kein Clock Stretching, keine Arbitrierung (Single-Master Bus).

use esp_hal::delay::Delay;
use esp_hal::gpio::{DriveMode, Flex, InputConfig, OutputConfig, Pull};
use esp_i2c_core::BitbangDriver;

/// Anzahl Takte zum Freigeben eines hängenden Slaves in `master_init`
const BUS_RECOVERY_CLOCKS: u8 = 9;

/// Real Hardware Bitbang-Driver
///
/// Beide Leitungen laufen als Open-Drain mit internem Pull-Up.
/// "High" bedeutet Leitung freigeben, "Low" bedeutet aktiv auf GND ziehen.
/// Externe Pull-Ups (4.7 kΩ) sind trotzdem empfohlen.
pub struct GpioBitbang<'a> {
    scl: Flex<'a>,
    sda: Flex<'a>,
    delay: Delay,
    half_period_us: u32,
}

impl<'a> GpioBitbang<'a> {
    /// Erstellt einen neuen GpioBitbang
    ///
    /// # Parameter
    /// - `scl`: Flex GPIO für die Taktleitung
    /// - `sda`: Flex GPIO für die Datenleitung
    /// - `half_period_us`: halbe Bit-Periode in µs (5 → ca. 100 kHz)
    ///
    /// Die Pins werden erst in `gpio_init()` konfiguriert.
    pub fn new(scl: Flex<'a>, sda: Flex<'a>, half_period_us: u32) -> Self {
        Self {
            scl,
            sda,
            delay: Delay::new(),
            half_period_us,
        }
    }

    fn wait(&self) {
        self.delay.delay_micros(self.half_period_us);
    }

    fn scl_high(&mut self) {
        self.scl.set_high();
    }

    fn scl_low(&mut self) {
        self.scl.set_low();
    }

    fn sda_release(&mut self) {
        self.sda.set_high();
    }

    fn sda_low(&mut self) {
        self.sda.set_low();
    }

    /// Ein Takt auf SCL, SDA bleibt unverändert
    fn clock_pulse(&mut self) {
        self.scl_high();
        self.wait();
        self.scl_low();
        self.wait();
    }
}

impl BitbangDriver for GpioBitbang<'_> {
    fn gpio_init(&mut self) {
        let output = OutputConfig::default()
            .with_drive_mode(DriveMode::OpenDrain)
            .with_pull(Pull::Up);
        let input = InputConfig::default().with_pull(Pull::Up);

        for pin in [&mut self.scl, &mut self.sda] {
            pin.apply_output_config(&output);
            pin.apply_input_config(&input);
            pin.set_high();
            pin.set_output_enable(true);
            pin.set_input_enable(true);
        }
    }

    fn master_init(&mut self) {
        // Bus freigeben: ein Slave, der mitten in einem Byte hängt,
        // gibt SDA spätestens nach 9 Takten wieder frei
        self.sda_release();
        self.scl_low();
        self.wait();
        for _ in 0..BUS_RECOVERY_CLOCKS {
            self.clock_pulse();
        }
        self.stop();
    }

    fn start(&mut self) {
        // SCL ist hier low (nach Byte/ACK) oder der Bus ist idle
        self.sda_release();
        self.wait();
        self.scl_high();
        self.wait();
        self.sda_low();
        self.wait();
        self.scl_low();
        self.wait();
    }

    fn stop(&mut self) {
        self.sda_low();
        self.wait();
        self.scl_high();
        self.wait();
        self.sda_release();
        self.wait();
    }

    fn write_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.sda_release();
            } else {
                self.sda_low();
            }
            self.wait();
            self.clock_pulse();
        }
    }

    fn read_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        self.sda_release();
        for _ in 0..8 {
            self.wait();
            self.scl_high();
            self.wait();
            byte = (byte << 1) | u8::from(self.sda.is_high());
            self.scl_low();
        }
        self.wait();
        byte
    }

    fn check_ack(&mut self) -> bool {
        self.sda_release();
        self.wait();
        self.scl_high();
        self.wait();
        let ack = self.sda.is_low();
        self.scl_low();
        self.wait();
        ack
    }

    fn send_ack(&mut self) {
        self.sda_low();
        self.wait();
        self.clock_pulse();
        self.sda_release();
    }

    fn send_nack(&mut self) {
        self.sda_release();
        self.wait();
        self.clock_pulse();
    }
}
