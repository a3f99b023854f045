use crate::{
    error::FirmwareError,
    ethercat::{DcClock, EmulatedDcClock, EC_OUTPUT_FRAME_SIZE},
    fpga::FpgaEmulator,
};

use super::{frame::CommandFrame, params::*};

/// The slave CPU firmware of one array node.
///
/// Owns the entire dispatch state and the collaborators (FPGA surface,
/// distributed clock). Exactly two entry points run after power-on:
/// [`recv`](Self::recv) once per received network frame and
/// [`update`](Self::update) once per periodic tick. Both take `&mut self`;
/// the single-threaded, non-reentrant dispatch of the reference hardware is
/// therefore enforced by the borrow checker, and no further synchronization
/// is needed.
pub struct CpuFirmware<C = EmulatedDcClock> {
    pub(crate) last_msg_id: u8,
    pub(crate) ack: u16,
    pub(crate) ctl_flags: u8,
    pub(crate) read_fpga_info: bool,
    pub(crate) mod_cycle: u32,
    pub(crate) mod_word: u16,
    pub(crate) seq_cycle: u32,
    pub(crate) gain_data_mode: u8,
    pub(crate) mod_write_done: bool,
    pub(crate) seq_write_done: bool,
    pub(crate) num_transducers: usize,
    pub(crate) fpga: FpgaEmulator,
    pub(crate) dc: C,
}

impl CpuFirmware<EmulatedDcClock> {
    #[must_use]
    pub fn new(num_transducers: usize) -> Self {
        Self::with_clock(num_transducers, EmulatedDcClock::default())
    }
}

impl<C: DcClock> CpuFirmware<C> {
    /// # Panics
    ///
    /// Panics if the clock's cycle period does not exceed [`SYNC0_GUARD`].
    #[must_use]
    pub fn with_clock(num_transducers: usize, dc: C) -> Self {
        assert!(
            dc.cycle_period() > SYNC0_GUARD,
            "cycle period must exceed the boundary guard window"
        );
        let mut s = Self {
            last_msg_id: 0xFF,
            ack: 0x0000,
            ctl_flags: 0x00,
            read_fpga_info: false,
            mod_cycle: 0,
            mod_word: 0x0000,
            seq_cycle: 0,
            gain_data_mode: GAIN_DATA_MODE_DUTY_PHASE_FULL,
            mod_write_done: false,
            seq_write_done: false,
            num_transducers,
            fpga: FpgaEmulator::new(num_transducers),
            dc,
        };
        s.init();
        s
    }

    /// Power-on reset: brings the co-processor to the same state `CMD_CLEAR`
    /// does.
    pub fn init(&mut self) {
        self.fpga.init();
        self.clear();
    }

    /// The acknowledgment word returned to the master on the next outgoing
    /// frame: `(msg_id << 8) | status_byte`.
    #[must_use]
    pub const fn ack(&self) -> u16 {
        self.ack
    }

    #[must_use]
    pub const fn num_transducers(&self) -> usize {
        self.num_transducers
    }

    #[must_use]
    pub const fn fpga(&self) -> &FpgaEmulator {
        &self.fpga
    }

    #[must_use]
    pub const fn fpga_mut(&mut self) -> &mut FpgaEmulator {
        &mut self.fpga
    }

    #[must_use]
    pub const fn dc(&self) -> &C {
        &self.dc
    }

    #[must_use]
    pub const fn dc_mut(&mut self) -> &mut C {
        &mut self.dc
    }

    /// Receive-handler entry point, invoked once per incoming network frame.
    ///
    /// A frame whose `msg_id` matches the previously processed one is a
    /// repeat of an already-handled cycle and is ignored entirely; the
    /// network re-delivers the same logical frame every cycle until the
    /// master advances it, so reprocessing would corrupt the ring cursors
    /// and re-run one-shot side effects.
    pub fn recv(&mut self, data: &[u8; EC_OUTPUT_FRAME_SIZE]) {
        let frame = CommandFrame::new(data);

        if frame.msg_id() == self.last_msg_id {
            return;
        }
        self.last_msg_id = frame.msg_id();

        tracing::trace!(
            msg_id = frame.msg_id(),
            command = frame.command(),
            "dispatch"
        );

        let mut ack = (frame.msg_id() as u16) << 8;
        self.read_fpga_info = (frame.cpu_flags() & CPU_CTL_FLAG_READS_FPGA_INFO) != 0;
        if self.read_fpga_info {
            ack |= self.fpga_info() & 0x00FF;
        }

        match frame.command() {
            CMD_CLEAR => self.clear(),
            CMD_RD_CPU_V_LSB => ack = (ack & 0xFF00) | (Self::cpu_version() & 0x00FF),
            CMD_RD_CPU_V_MSB => ack = (ack & 0xFF00) | (Self::cpu_version() >> 8),
            CMD_RD_FPGA_V_LSB => ack = (ack & 0xFF00) | (self.fpga_version() & 0x00FF),
            CMD_RD_FPGA_V_MSB => ack = (ack & 0xFF00) | (self.fpga_version() >> 8),
            CMD_OP => self.op(&frame),
            CMD_SEQ_FOCUS_MODE => self.write_focus_seq(&frame),
            CMD_SEQ_GAIN_MODE => self.write_gain_seq(&frame),
            CMD_SET_DELAY_OFFSET => self.write_delay_offset(&frame),
            _ => {
                tracing::debug!(command = frame.command(), "unknown command, ignored");
            }
        }

        self.ack = ack;
    }

    /// Periodic-tick entry point.
    ///
    /// Performs the pending clock-sync handshakes raised by a completed
    /// modulation or sequence write. Deliberately kept out of the receive
    /// path: the handshake can block for a network cycle or more, and frame
    /// processing must keep up with the cycle time.
    pub fn update(&mut self) -> Result<(), FirmwareError> {
        if self.mod_write_done {
            self.init_mod_clock()?;
            self.mod_write_done = false;
            self.refresh_info_ack();
        }
        if self.seq_write_done {
            self.init_seq_clock()?;
            self.seq_write_done = false;
            self.refresh_info_ack();
        }
        Ok(())
    }

    fn refresh_info_ack(&mut self) {
        if self.read_fpga_info {
            self.ack = (self.ack & 0xFF00) | (self.fpga_info() & 0x00FF);
        }
    }

    pub(crate) fn apply_fpga_flags(&mut self, flags: u8) {
        self.ctl_flags = flags;
        self.bram_write(BRAM_SELECT_CONTROLLER, ADDR_CTL_FLAG as u16, flags as u16);
    }

    pub(crate) fn fpga_info(&self) -> u16 {
        self.bram_read(BRAM_SELECT_CONTROLLER, ADDR_FPGA_INFO as u16)
    }
}

impl<C: DcClock> CpuFirmware<C> {
    #[must_use]
    const fn get_addr(select: u8, addr: u16) -> u16 {
        ((select as u16 & 0x0003) << 14) | (addr & 0x3FFF)
    }

    #[must_use]
    pub(crate) fn bram_read(&self, select: u8, addr: u16) -> u16 {
        self.fpga.read(Self::get_addr(select, addr))
    }

    pub(crate) fn bram_write(&mut self, select: u8, addr: u16, data: u16) {
        self.fpga.write(Self::get_addr(select, addr), data)
    }

    pub(crate) fn bram_set(&mut self, select: u8, addr_base: u16, value: u16, size: usize) {
        let mut addr = Self::get_addr(select, addr_base);
        (0..size).for_each(|_| {
            self.fpga.write(addr, value);
            addr = addr.wrapping_add(1);
        })
    }

    pub(crate) fn bram_write_u64(&mut self, select: u8, addr_base: u16, value: u64) {
        (0..4).for_each(|i| {
            self.bram_write(select, addr_base + i, (value >> (16 * i)) as u16);
        })
    }
}
