use crate::ethercat::EC_OUTPUT_FRAME_SIZE;

pub const HEADER_SIZE: usize = 4;
pub const PAYLOAD_SIZE: usize = 124;
pub const BODY_OFFSET: usize = HEADER_SIZE + PAYLOAD_SIZE;
/// Number of 16-bit words in the bulk region.
pub const BODY_NUM_WORDS: usize = (EC_OUTPUT_FRAME_SIZE - BODY_OFFSET) / 2;
/// Largest modulation chunk one frame can carry (payload minus the length
/// field and its alignment pad).
pub const MOD_FRAME_SIZE: usize = PAYLOAD_SIZE - 2;
/// Largest number of focus records one frame can carry in the bulk region.
pub const SEQ_FOCUS_FRAME_SIZE: usize = BODY_NUM_WORDS / 4;

/// Zero-copy view of one received frame.
///
/// Field offsets are fixed by the transport:
///
/// | offset | size | field        |
/// |--------|------|--------------|
/// | 0      | 1    | `msg_id`     |
/// | 1      | 1    | `fpga_flags` |
/// | 2      | 1    | `cpu_flags`  |
/// | 3      | 1    | `command`    |
/// | 4      | 124  | payload      |
/// | 128    | 498  | bulk region (little-endian u16 words) |
///
/// Decoding cannot fail: the transport delivers exactly
/// [`EC_OUTPUT_FRAME_SIZE`] bytes, which the array reference enforces.
#[derive(Clone, Copy)]
pub struct CommandFrame<'a> {
    data: &'a [u8; EC_OUTPUT_FRAME_SIZE],
}

impl<'a> CommandFrame<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8; EC_OUTPUT_FRAME_SIZE]) -> Self {
        Self { data }
    }

    #[must_use]
    pub const fn msg_id(&self) -> u8 {
        self.data[0]
    }

    #[must_use]
    pub const fn fpga_flags(&self) -> u8 {
        self.data[1]
    }

    #[must_use]
    pub const fn cpu_flags(&self) -> u8 {
        self.data[2]
    }

    #[must_use]
    pub const fn command(&self) -> u8 {
        self.data[3]
    }

    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        &self.data[HEADER_SIZE..BODY_OFFSET]
    }

    /// `idx`-th little-endian word of the payload.
    #[must_use]
    pub fn payload_word(&self, idx: usize) -> u16 {
        let i = HEADER_SIZE + (idx << 1);
        u16::from_le_bytes([self.data[i], self.data[i + 1]])
    }

    /// Modulation chunk carried by an operate frame: payload word 0 holds the
    /// chunk length, samples start at payload byte 2.
    #[must_use]
    pub fn mod_chunk(&self) -> &'a [u8] {
        let len = (self.data[HEADER_SIZE] as usize).min(MOD_FRAME_SIZE);
        &self.data[HEADER_SIZE + 2..HEADER_SIZE + 2 + len]
    }

    /// `idx`-th little-endian word of the bulk region.
    #[must_use]
    pub fn body_word(&self, idx: usize) -> u16 {
        let i = BODY_OFFSET + (idx << 1);
        u16::from_le_bytes([self.data[i], self.data[i + 1]])
    }
}
