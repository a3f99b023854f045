use crate::{
    cpu::{
        frame::{CommandFrame, SEQ_FOCUS_FRAME_SIZE},
        params::*,
    },
    ethercat::DcClock,
    CpuFirmware,
};

/// One focus record: a 3D coordinate in signed 18-bit fixed point plus an
/// 8-bit duty, packed LSB-first into four little-endian words:
///
/// ```text
/// word0 = x[15:0]
/// word1 = y[13:0] << 2 | x[17:16]
/// word2 = z[11:0] << 4 | y[17:14]
/// word3 = duty    << 6 | z[17:12]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusPoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub duty: u8,
}

impl FocusPoint {
    pub const COORD_BITS: u32 = 18;

    #[must_use]
    pub fn encode(&self) -> [u16; 4] {
        let x = (self.x as u32) & 0x3FFFF;
        let y = (self.y as u32) & 0x3FFFF;
        let z = (self.z as u32) & 0x3FFFF;
        [
            x as u16,
            ((y << 2) | (x >> 16)) as u16,
            ((z << 4) | (y >> 14)) as u16,
            (((self.duty as u32) << 6) | (z >> 12)) as u16,
        ]
    }

    #[must_use]
    pub fn decode(words: [u16; 4]) -> Self {
        let sign_extend = |v: u32| ((v << (32 - Self::COORD_BITS)) as i32) >> (32 - Self::COORD_BITS);
        let x = (words[0] as u32) | (((words[1] & 0x0003) as u32) << 16);
        let y = ((words[1] >> 2) as u32) | (((words[2] & 0x000F) as u32) << 14);
        let z = ((words[2] >> 4) as u32) | (((words[3] & 0x003F) as u32) << 12);
        Self {
            x: sign_extend(x),
            y: sign_extend(y),
            z: sign_extend(z),
            duty: (words[3] >> 6) as u8,
        }
    }
}

impl<C: DcClock> CpuFirmware<C> {
    /// `CMD_SEQ_FOCUS_MODE`: append the frame's focus records to the
    /// sequence ring. Records are copied into physical slots verbatim, four
    /// words per record; the bank-offset register advances whenever the
    /// cursor wraps a segment.
    pub(crate) fn write_focus_seq(&mut self, frame: &CommandFrame) {
        let flags = frame.cpu_flags();

        if (flags & CPU_CTL_FLAG_SEQ_BEGIN) == CPU_CTL_FLAG_SEQ_BEGIN {
            self.seq_cycle = 0;
            self.bram_write(
                BRAM_SELECT_CONTROLLER,
                ADDR_SEQ_DIV as u16,
                frame.payload_word(1),
            );
            self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_SEQ_BRAM_ADDR_OFFSET as u16, 0x0000);
        }

        // Count field is clamped to what one bulk region can actually hold.
        let write = (frame.payload_word(0) as usize).min(SEQ_FOCUS_FRAME_SIZE);
        (0..write).for_each(|i| {
            let dst = ((self.seq_cycle & SEQ_FOCUS_SEGMENT_SIZE_MASK) << 2) as u16;
            (0..4).for_each(|w| {
                self.bram_write(BRAM_SELECT_SEQ, dst + w as u16, frame.body_word((i << 2) + w));
            });
            self.seq_cycle += 1;
            if self.seq_cycle & SEQ_FOCUS_SEGMENT_SIZE_MASK == 0 {
                self.bram_write(
                    BRAM_SELECT_CONTROLLER,
                    ADDR_SEQ_BRAM_ADDR_OFFSET as u16,
                    (self.seq_cycle >> SEQ_FOCUS_SEGMENT_SIZE_WIDTH) as u16,
                );
            }
        });

        if (flags & CPU_CTL_FLAG_SEQ_END) == CPU_CTL_FLAG_SEQ_END {
            self.bram_write(
                BRAM_SELECT_CONTROLLER,
                ADDR_SEQ_CYCLE as u16,
                (self.seq_cycle.max(1) - 1) as u16,
            );
            self.seq_write_done = true;
        }

        self.apply_fpga_flags(frame.fpga_flags());
    }
}
