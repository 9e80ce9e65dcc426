// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul enthält die Hardware-Implementierung des BitbangDriver Traits.
// Tests laufen gegen MockBitbangDriver in esp-tests.

pub mod bitbang;

pub use bitbang::GpioBitbang;
