use crate::{cpu::params::*, error::FirmwareError, ethercat::DcClock, CpuFirmware};

impl<C: DcClock> CpuFirmware<C> {
    /// Latches the start time of the next SYNC0 cycle.
    ///
    /// The boundary register is only trusted once the clock is at least
    /// `SYNC0_GUARD` past the previous boundary; reading it right around a
    /// boundary can return the value of the cycle that just elapsed.
    fn observe_cycle_boundary(&mut self) -> u64 {
        loop {
            let next = self.dc.cycle_start_time().sys_time();
            let now = self.dc.sys_time().sys_time();
            if now + self.dc.cycle_period() >= next + SYNC0_GUARD {
                return next;
            }
            self.dc.wait_ns(SYNC_POLL_INTERVAL);
        }
    }

    fn wait_handshake(&mut self, flag: u16) -> bool {
        (0..SYNC_POLL_BUDGET).any(|_| {
            if self.bram_read(BRAM_SELECT_CONTROLLER, ADDR_CTL_FLAG as u16) & flag == 0 {
                true
            } else {
                self.dc.wait_ns(SYNC_POLL_INTERVAL);
                false
            }
        })
    }

    fn arm(&mut self, sync_time_addr: u16, init_flag: u16) -> bool {
        let start = self.observe_cycle_boundary() + self.dc.cycle_period();
        self.bram_write_u64(BRAM_SELECT_CONTROLLER, sync_time_addr, start);
        self.bram_write(
            BRAM_SELECT_CONTROLLER,
            ADDR_CTL_FLAG as u16,
            init_flag | self.ctl_flags as u16,
        );
        tracing::debug!(start, init_flag, "clock armed");
        self.wait_handshake(init_flag)
    }

    pub(crate) fn init_mod_clock(&mut self) -> Result<(), FirmwareError> {
        if self.arm(ADDR_MOD_SYNC_TIME_0 as u16, CTL_FLAG_MOD_INIT) {
            Ok(())
        } else {
            tracing::warn!("modulation arm handshake timed out");
            Err(FirmwareError::ModSyncTimeout)
        }
    }

    pub(crate) fn init_seq_clock(&mut self) -> Result<(), FirmwareError> {
        if self.arm(ADDR_SEQ_SYNC_TIME_0 as u16, CTL_FLAG_SEQ_INIT) {
            Ok(())
        } else {
            tracing::warn!("sequence arm handshake timed out");
            Err(FirmwareError::SeqSyncTimeout)
        }
    }
}
