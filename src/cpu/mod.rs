mod firmware;
pub mod frame;
pub mod operation;
pub mod params;

pub use firmware::CpuFirmware;
pub use operation::FocusPoint;
