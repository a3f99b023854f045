use crate::{
    cpu::{frame::CommandFrame, params::*},
    ethercat::DcClock,
    CpuFirmware,
};

impl<C: DcClock> CpuFirmware<C> {
    /// `CMD_SET_DELAY_OFFSET`: overwrite the per-transducer delay/offset
    /// table from the bulk region. The table is consumed only when the frame
    /// says it carries one; the command is otherwise a flag update alone.
    pub(crate) fn write_delay_offset(&mut self, frame: &CommandFrame) {
        if (frame.cpu_flags() & CPU_CTL_FLAG_DELAY_OFFSET) == CPU_CTL_FLAG_DELAY_OFFSET {
            (0..self.num_transducers).for_each(|i| {
                self.bram_write(
                    BRAM_SELECT_CONTROLLER,
                    (ADDR_DELAY_OFFSET_BASE + i) as u16,
                    frame.body_word(i),
                );
            });
        }

        self.apply_fpga_flags(frame.fpga_flags());
    }
}
