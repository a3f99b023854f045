use crate::{cpu::params::*, ethercat::DcClock, CpuFirmware};

impl<C: DcClock> CpuFirmware<C> {
    /// Returns the co-processor to its post-power-on state: neutral drive
    /// table, empty rings, silent flags, nothing pending.
    pub(crate) fn clear(&mut self) {
        self.mod_cycle = 0;
        self.mod_word = 0x0000;
        self.seq_cycle = 0;
        self.gain_data_mode = GAIN_DATA_MODE_DUTY_PHASE_FULL;
        self.mod_write_done = false;
        self.seq_write_done = false;
        self.read_fpga_info = false;

        self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_MOD_BRAM_ADDR_OFFSET as u16, 0x0000);
        self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_SEQ_BRAM_ADDR_OFFSET as u16, 0x0000);
        self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_MOD_CYCLE as u16, 0x0000);
        self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_SEQ_CYCLE as u16, 0x0000);
        self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_SEQ_DIV as u16, 0xFFFF);

        self.bram_set(
            BRAM_SELECT_MOD,
            0,
            0xFFFF,
            (MOD_BUF_SEGMENT_SIZE >> 1) as usize,
        );
        self.bram_set(BRAM_SELECT_NORMAL, 0, 0x0000, self.num_transducers);
        self.bram_set(
            BRAM_SELECT_CONTROLLER,
            ADDR_DELAY_OFFSET_BASE as u16,
            0x0000,
            self.num_transducers,
        );

        self.ctl_flags = CTL_FLAG_SILENT as u8;
        self.bram_write(
            BRAM_SELECT_CONTROLLER,
            ADDR_CTL_FLAG as u16,
            self.ctl_flags as u16,
        );
    }
}
