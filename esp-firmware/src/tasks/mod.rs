// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Der I2C Bus wird über einen Mutex geteilt (Scan ↔ Register Poll).

pub mod bus_scan;
pub mod register_poll;

// Re-export Tasks für einfachen Import
pub use bus_scan::bus_scan_task;
pub use register_poll::register_poll_task;
