use crate::{
    cpu::{frame::CommandFrame, params::*},
    ethercat::DcClock,
    CpuFirmware,
};

impl<C: DcClock> CpuFirmware<C> {
    /// Appends one modulation chunk to the windowed ring.
    ///
    /// The payload is byte-granular but the BRAM is word addressed, so a
    /// trailing odd byte is latched in `mod_word` and merged with the first
    /// byte of the next chunk. Whenever the cursor wraps the physical window
    /// the bank-offset register is advanced, keeping the invariant
    /// `offset_reg == cursor >> MOD_BUF_SEGMENT_SIZE_WIDTH` at every write.
    pub(crate) fn write_mod(&mut self, frame: &CommandFrame) {
        let flags = frame.cpu_flags();

        if (flags & CPU_CTL_FLAG_MOD_BEGIN) == CPU_CTL_FLAG_MOD_BEGIN {
            self.mod_cycle = 0;
            self.mod_word = 0x0000;
            self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_MOD_BRAM_ADDR_OFFSET as u16, 0x0000);
        }

        for &sample in frame.mod_chunk() {
            if self.mod_cycle & 1 == 0 {
                self.mod_word = sample as u16;
            } else {
                let addr = ((self.mod_cycle & MOD_BUF_SEGMENT_SIZE_MASK) >> 1) as u16;
                self.bram_write(
                    BRAM_SELECT_MOD,
                    addr,
                    self.mod_word | ((sample as u16) << 8),
                );
            }
            self.mod_cycle += 1;
            if self.mod_cycle & MOD_BUF_SEGMENT_SIZE_MASK == 0 {
                self.bram_write(
                    BRAM_SELECT_CONTROLLER,
                    ADDR_MOD_BRAM_ADDR_OFFSET as u16,
                    (self.mod_cycle >> MOD_BUF_SEGMENT_SIZE_WIDTH) as u16,
                );
            }
        }

        if (flags & CPU_CTL_FLAG_MOD_END) == CPU_CTL_FLAG_MOD_END {
            if self.mod_cycle & 1 == 1 {
                // Flush the dangling odd sample; its high byte never arrives.
                let addr = ((self.mod_cycle & MOD_BUF_SEGMENT_SIZE_MASK) >> 1) as u16;
                self.bram_write(BRAM_SELECT_MOD, addr, self.mod_word);
            }
            self.bram_write(
                BRAM_SELECT_CONTROLLER,
                ADDR_MOD_CYCLE as u16,
                (self.mod_cycle.max(1) - 1) as u16,
            );
            self.mod_write_done = true;
        }
    }
}
