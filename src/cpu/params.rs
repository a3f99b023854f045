pub use crate::fpga::params::*;

pub const NANOSECONDS: u64 = 1;
pub const MICROSECONDS: u64 = NANOSECONDS * 1000;
pub const MILLISECONDS: u64 = MICROSECONDS * 1000;

pub const CPU_VERSION: u16 = 0x001C;

pub const TRANS_NUM: usize = 249;

pub const CMD_OP: u8 = 0x00;
pub const CMD_RD_CPU_V_LSB: u8 = 0x02;
pub const CMD_RD_CPU_V_MSB: u8 = 0x03;
pub const CMD_RD_FPGA_V_LSB: u8 = 0x04;
pub const CMD_RD_FPGA_V_MSB: u8 = 0x05;
pub const CMD_SEQ_FOCUS_MODE: u8 = 0x06;
pub const CMD_CLEAR: u8 = 0x09;
pub const CMD_SEQ_GAIN_MODE: u8 = 0x0D;
pub const CMD_SET_DELAY_OFFSET: u8 = 0x0E;

// CPU-facing flags; consumed by the firmware, never forwarded to the FPGA.
pub const CPU_CTL_FLAG_MOD_BEGIN: u8 = 1 << 0;
pub const CPU_CTL_FLAG_MOD_END: u8 = 1 << 1;
pub const CPU_CTL_FLAG_SEQ_BEGIN: u8 = 1 << 2;
pub const CPU_CTL_FLAG_SEQ_END: u8 = 1 << 3;
pub const CPU_CTL_FLAG_DELAY_OFFSET: u8 = 1 << 4;
pub const CPU_CTL_FLAG_READS_FPGA_INFO: u8 = 1 << 5;

pub const GAIN_DATA_MODE_DUTY_PHASE_FULL: u8 = 0x00;
pub const GAIN_DATA_MODE_PHASE_FULL: u8 = 0x01;
pub const GAIN_DATA_MODE_PHASE_HALF: u8 = 0x02;

/// Full-drive duty substituted when a gain record carries phase only.
pub const GAIN_DUTY_MASK: u16 = 0xFF00;

/// How far past a cycle boundary the sync engine must observe the clock
/// before trusting that the boundary has occurred.
pub const SYNC0_GUARD: u64 = 200 * MICROSECONDS;
/// Sleep between polls of the clock and of the handshake bit.
pub const SYNC_POLL_INTERVAL: u64 = 50 * MICROSECONDS;
/// Handshake poll budget; the reference hardware clears the bit within a few
/// hundred microseconds, so this is generous.
pub const SYNC_POLL_BUDGET: usize = 2000;
