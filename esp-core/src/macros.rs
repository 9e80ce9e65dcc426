// Trace-Makros für den Sequencer
//
// Alle Ausgaben hängen am Debug-Flag des jeweiligen I2cMaster.
// Ohne `defmt` Feature kompilieren die Makros zu nichts.

#[cfg(feature = "defmt")]
macro_rules! bus_trace {
    ($master:expr, $($arg:tt)*) => {
        if $master.debug {
            defmt::debug!($($arg)*);
        }
    };
}

#[cfg(feature = "defmt")]
macro_rules! bus_warn {
    ($master:expr, $($arg:tt)*) => {
        if $master.debug {
            defmt::warn!($($arg)*);
        }
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! bus_trace {
    ($master:expr, $($arg:tt)*) => {{
        let _ = $master.debug;
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! bus_warn {
    ($master:expr, $($arg:tt)*) => {{
        let _ = $master.debug;
    }};
}
