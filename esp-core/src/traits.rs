//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Schnittstelle zum Bitbang-I2C-Master
//! ohne konkrete Implementierung.

/// Trait für den Software-I2C-Master (Bitbanging)
///
/// Abstrahiert die Bit-Ebene des Busses: Timing, Taktleitung, Datenleitung
/// und das Abtasten von ACK/NACK. Der Sequencer ruft nur diese Primitive auf.
///
/// Alle Methoden blockieren für die Dauer der Bus-Aktivität und kennen
/// keinen Timeout. Ein nicht antwortender Slave zeigt sich nur als NACK.
///
/// # Implementierungen
/// - **Production:** GpioBitbang (ESP32 Open-Drain GPIOs)
/// - **Testing:** MockBitbangDriver (zeichnet alle Bus-Ereignisse auf)
pub trait BitbangDriver {
    /// Konfiguriert SDA und SCL als Open-Drain Leitungen
    fn gpio_init(&mut self);

    /// Bringt den Bus in den Ruhezustand (beide Leitungen High)
    fn master_init(&mut self);

    /// Start-Bedingung (auch für Repeated Start)
    fn start(&mut self);

    /// Stop-Bedingung
    fn stop(&mut self);

    /// Schreibt 8 Bit, MSB zuerst. Das ACK-Bit wird mit `check_ack` gelesen.
    fn write_byte(&mut self, byte: u8);

    /// Liest 8 Bit vom Slave. Danach muss `send_ack` oder `send_nack` folgen.
    fn read_byte(&mut self) -> u8;

    /// Taktet das ACK-Bit nach `write_byte`
    ///
    /// `true` wenn der Slave das Byte bestätigt hat (SDA low).
    fn check_ack(&mut self) -> bool;

    /// Signalisiert dem Slave, dass weitere Bytes gelesen werden
    fn send_ack(&mut self);

    /// Signalisiert dem Slave, dass dies das letzte Byte war
    fn send_nack(&mut self);
}

impl<T: BitbangDriver + ?Sized> BitbangDriver for &mut T {
    fn gpio_init(&mut self) {
        (**self).gpio_init()
    }

    fn master_init(&mut self) {
        (**self).master_init()
    }

    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }

    fn check_ack(&mut self) -> bool {
        (**self).check_ack()
    }

    fn send_ack(&mut self) {
        (**self).send_ack()
    }

    fn send_nack(&mut self) {
        (**self).send_nack()
    }
}
