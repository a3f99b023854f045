//! Host-side emulator of the slave CPU firmware driving one phased
//! transducer array node over EtherCAT.
//!
//! [`CpuFirmware`] mirrors the firmware's two entry points, `recv` per
//! received frame and `update` per periodic tick, and [`FpgaEmulator`]
//! exposes the co-processor memory the firmware writes into, so a test can
//! feed raw frames and inspect exactly what would reach the hardware.

pub mod cpu;
pub mod error;
pub mod ethercat;
pub mod fpga;

pub use cpu::{CpuFirmware, FocusPoint};
pub use error::FirmwareError;
pub use ethercat::{DcClock, DcSysTime, EmulatedDcClock};
pub use fpga::FpgaEmulator;
