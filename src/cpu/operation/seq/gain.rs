use crate::{
    cpu::{frame::CommandFrame, params::*},
    ethercat::DcClock,
    CpuFirmware,
};

impl<C: DcClock> CpuFirmware<C> {
    fn advance_gain_cycle(&mut self) {
        self.seq_cycle += 1;
        if self.seq_cycle & SEQ_GAIN_SEGMENT_SIZE_MASK == 0 {
            self.bram_write(
                BRAM_SELECT_CONTROLLER,
                ADDR_SEQ_BRAM_ADDR_OFFSET as u16,
                (self.seq_cycle >> SEQ_GAIN_SEGMENT_SIZE_WIDTH) as u16,
            );
        }
    }

    /// `CMD_SEQ_GAIN_MODE`: append gain patterns to the sequence ring.
    ///
    /// A begin frame carries only the packing mode and divider; every later
    /// frame carries one body's worth of transducer words, expanded into one,
    /// two, or four physical cycles depending on the mode. Unknown modes fall
    /// back to duty+phase full.
    pub(crate) fn write_gain_seq(&mut self, frame: &CommandFrame) {
        let flags = frame.cpu_flags();

        if (flags & CPU_CTL_FLAG_SEQ_BEGIN) == CPU_CTL_FLAG_SEQ_BEGIN {
            self.seq_cycle = 0;
            self.gain_data_mode = match frame.payload()[0] {
                GAIN_DATA_MODE_PHASE_FULL => GAIN_DATA_MODE_PHASE_FULL,
                GAIN_DATA_MODE_PHASE_HALF => GAIN_DATA_MODE_PHASE_HALF,
                _ => GAIN_DATA_MODE_DUTY_PHASE_FULL,
            };
            self.bram_write(
                BRAM_SELECT_CONTROLLER,
                ADDR_SEQ_DIV as u16,
                frame.payload_word(1),
            );
            self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_SEQ_BRAM_ADDR_OFFSET as u16, 0x0000);
        } else {
            match self.gain_data_mode {
                GAIN_DATA_MODE_PHASE_FULL => {
                    let base = ((self.seq_cycle & SEQ_GAIN_SEGMENT_SIZE_MASK) << 8) as u16;
                    (0..self.num_transducers).for_each(|i| {
                        let w = frame.body_word(i);
                        self.bram_write(BRAM_SELECT_SEQ, base + i as u16, GAIN_DUTY_MASK | (w & 0x00FF));
                    });
                    self.advance_gain_cycle();
                    let base = ((self.seq_cycle & SEQ_GAIN_SEGMENT_SIZE_MASK) << 8) as u16;
                    (0..self.num_transducers).for_each(|i| {
                        let w = frame.body_word(i);
                        self.bram_write(BRAM_SELECT_SEQ, base + i as u16, GAIN_DUTY_MASK | (w >> 8));
                    });
                    self.advance_gain_cycle();
                }
                GAIN_DATA_MODE_PHASE_HALF => {
                    (0..4).for_each(|k| {
                        let base = ((self.seq_cycle & SEQ_GAIN_SEGMENT_SIZE_MASK) << 8) as u16;
                        (0..self.num_transducers).for_each(|i| {
                            let nibble = (frame.body_word(i) >> (k << 2)) & 0x000F;
                            self.bram_write(
                                BRAM_SELECT_SEQ,
                                base + i as u16,
                                GAIN_DUTY_MASK | (nibble << 4) | nibble,
                            );
                        });
                        self.advance_gain_cycle();
                    });
                }
                _ => {
                    let base = ((self.seq_cycle & SEQ_GAIN_SEGMENT_SIZE_MASK) << 8) as u16;
                    (0..self.num_transducers)
                        .for_each(|i| self.bram_write(BRAM_SELECT_SEQ, base + i as u16, frame.body_word(i)));
                    self.advance_gain_cycle();
                }
            }
        }

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
