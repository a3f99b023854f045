pub const BRAM_SELECT_CONTROLLER: u8 = 0x0;
pub const BRAM_SELECT_MOD: u8 = 0x1;
pub const BRAM_SELECT_NORMAL: u8 = 0x2;
pub const BRAM_SELECT_SEQ: u8 = 0x3;

pub const ADDR_CTL_FLAG: usize = 0x00;
pub const ADDR_FPGA_INFO: usize = 0x01;
pub const ADDR_SEQ_CYCLE: usize = 0x02;
pub const ADDR_SEQ_DIV: usize = 0x03;
pub const ADDR_SEQ_BRAM_ADDR_OFFSET: usize = 0x04;
pub const ADDR_MOD_BRAM_ADDR_OFFSET: usize = 0x05;
pub const ADDR_MOD_CYCLE: usize = 0x06;
pub const ADDR_MOD_SYNC_TIME_0: usize = 0x08;
pub const ADDR_MOD_SYNC_TIME_1: usize = 0x09;
pub const ADDR_MOD_SYNC_TIME_2: usize = 0x0A;
pub const ADDR_MOD_SYNC_TIME_3: usize = 0x0B;
pub const ADDR_SEQ_SYNC_TIME_0: usize = 0x0C;
pub const ADDR_SEQ_SYNC_TIME_1: usize = 0x0D;
pub const ADDR_SEQ_SYNC_TIME_2: usize = 0x0E;
pub const ADDR_SEQ_SYNC_TIME_3: usize = 0x0F;
pub const ADDR_VERSION_NUM: usize = 0xFF;
pub const ADDR_DELAY_OFFSET_BASE: usize = 0x100;

// Low byte of CTL_FLAG mirrors the frame's FPGA-facing flags verbatim.
pub const CTL_FLAG_OUTPUT_ENABLE: u16 = 1 << 0;
pub const CTL_FLAG_OUTPUT_BALANCE: u16 = 1 << 1;
pub const CTL_FLAG_SILENT: u16 = 1 << 3;
pub const CTL_FLAG_FORCE_FAN: u16 = 1 << 4;
pub const CTL_FLAG_OP_MODE: u16 = 1 << 5;
pub const CTL_FLAG_SEQ_MODE: u16 = 1 << 6;

// High byte carries the arm handshake bits; the FPGA clears them once the
// corresponding start tick has been latched.
pub const CTL_FLAG_MOD_INIT: u16 = 1 << 8;
pub const CTL_FLAG_SEQ_INIT: u16 = 1 << 9;

pub const FPGA_VERSION_NUM: u16 = 0x001C;

/// Modulation ring window, in samples. The BRAM behind it is word addressed,
/// so one window is `MOD_BUF_SEGMENT_SIZE >> 1` words.
pub const MOD_BUF_SEGMENT_SIZE_WIDTH: u32 = 15;
pub const MOD_BUF_SEGMENT_SIZE: u32 = 1 << MOD_BUF_SEGMENT_SIZE_WIDTH;
pub const MOD_BUF_SEGMENT_SIZE_MASK: u32 = MOD_BUF_SEGMENT_SIZE - 1;
pub const MOD_BUF_SIZE_MAX: u32 = 0x10000;

/// Focus-record segment, in records of 4 words; one segment fills a 14-bit
/// BRAM window exactly.
pub const SEQ_FOCUS_SEGMENT_SIZE_WIDTH: u32 = 12;
pub const SEQ_FOCUS_SEGMENT_SIZE: u32 = 1 << SEQ_FOCUS_SEGMENT_SIZE_WIDTH;
pub const SEQ_FOCUS_SEGMENT_SIZE_MASK: u32 = SEQ_FOCUS_SEGMENT_SIZE - 1;
pub const SEQ_FOCUS_BUF_SIZE_MAX: u32 = 0x10000;

/// Gain-record segment, in cycles of 256 words.
pub const SEQ_GAIN_SEGMENT_SIZE_WIDTH: u32 = 6;
pub const SEQ_GAIN_SEGMENT_SIZE: u32 = 1 << SEQ_GAIN_SEGMENT_SIZE_WIDTH;
pub const SEQ_GAIN_SEGMENT_SIZE_MASK: u32 = SEQ_GAIN_SEGMENT_SIZE - 1;
pub const SEQ_GAIN_BUF_SIZE_MAX: u32 = 0x400;
