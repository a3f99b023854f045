use crate::{cpu::params::*, ethercat::DcClock, CpuFirmware};

impl<C: DcClock> CpuFirmware<C> {
    #[must_use]
    pub(crate) const fn cpu_version() -> u16 {
        CPU_VERSION
    }

    #[must_use]
    pub(crate) fn fpga_version(&self) -> u16 {
        self.bram_read(BRAM_SELECT_CONTROLLER, ADDR_VERSION_NUM as u16)
    }
}
