pub mod emulator;
pub mod params;

pub use emulator::FpgaEmulator;
