use crate::{
    cpu::{frame::CommandFrame, params::*},
    ethercat::DcClock,
    CpuFirmware,
};

impl<C: DcClock> CpuFirmware<C> {
    /// `CMD_OP`: in normal mode, overwrite the whole drive table from the
    /// bulk region and drop any sequence state; in sequence mode the table is
    /// left alone. The modulation chunk rides along in either mode.
    pub(crate) fn op(&mut self, frame: &CommandFrame) {
        if (frame.fpga_flags() as u16 & CTL_FLAG_OP_MODE) == 0 {
            self.seq_cycle = 0;
            self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_SEQ_DIV as u16, 0xFFFF);

            (0..self.num_transducers)
                .for_each(|i| self.bram_write(BRAM_SELECT_NORMAL, i as u16, frame.body_word(i)));
        }

        self.write_mod(frame);

        self.apply_fpga_flags(frame.fpga_flags());
    }
}
