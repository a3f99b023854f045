mod memory;

use memory::Memory;

/// Software stand-in for the co-processor: the banked register/BRAM surface
/// the firmware writes into, plus the FPGA's half of the arm handshake.
pub struct FpgaEmulator {
    mem: Memory,
    num_transducers: usize,
}

impl FpgaEmulator {
    #[must_use]
    pub fn new(num_transducers: usize) -> Self {
        Self {
            mem: Memory::new(num_transducers),
            num_transducers,
        }
    }

    pub fn init(&mut self) {
        self.mem = Memory::new(self.num_transducers);
    }

    #[must_use]
    pub const fn num_transducers(&self) -> usize {
        self.num_transducers
    }

    pub(crate) fn read(&self, addr: u16) -> u16 {
        self.mem.read(addr)
    }

    pub(crate) fn write(&mut self, addr: u16, data: u16) {
        self.mem.write(addr, data)
    }

    /// Makes the emulated FPGA stop acknowledging arm requests. Test hook for
    /// the handshake timeout path.
    pub fn set_stall_handshake(&mut self, stall: bool) {
        self.mem.set_stall_handshake(stall)
    }

    pub fn assert_thermal_sensor(&mut self) {
        self.mem.assert_thermal_sensor()
    }

    pub fn deassert_thermal_sensor(&mut self) {
        self.mem.deassert_thermal_sensor()
    }

    #[must_use]
    pub fn info(&self) -> u16 {
        self.mem.info()
    }

    #[must_use]
    pub fn ctl_flags(&self) -> u16 {
        self.mem.ctl_flags()
    }

    /// Absolute tick latched by the last modulation arm handshake, if any.
    #[must_use]
    pub fn mod_start_time(&self) -> Option<u64> {
        self.mem.mod_start_time()
    }

    /// Absolute tick latched by the last sequence arm handshake, if any.
    #[must_use]
    pub fn seq_start_time(&self) -> Option<u64> {
        self.mem.seq_start_time()
    }

    #[must_use]
    pub fn modulation_cycle(&self) -> usize {
        self.mem.modulation_cycle()
    }

    #[must_use]
    pub fn modulation_at(&self, idx: usize) -> u8 {
        self.mem.modulation_at(idx)
    }

    #[must_use]
    pub fn modulation(&self) -> Vec<u8> {
        self.mem.modulation()
    }

    #[must_use]
    pub fn mod_bank_offset(&self) -> u16 {
        self.mem.mod_bank_offset()
    }

    #[must_use]
    pub fn sequence_cycle(&self) -> usize {
        self.mem.sequence_cycle()
    }

    #[must_use]
    pub fn sequence_div(&self) -> u16 {
        self.mem.sequence_div()
    }

    #[must_use]
    pub fn seq_bank_offset(&self) -> u16 {
        self.mem.seq_bank_offset()
    }

    #[must_use]
    pub fn focus_record(&self, idx: usize) -> [u16; 4] {
        self.mem.focus_record(idx)
    }

    #[must_use]
    pub fn gain_drive(&self, cycle: usize, tr: usize) -> u16 {
        self.mem.gain_drive(cycle, tr)
    }

    #[must_use]
    pub fn drive(&self, tr: usize) -> u16 {
        self.mem.drive(tr)
    }

    #[must_use]
    pub fn drives(&self) -> Vec<u16> {
        self.mem.drives()
    }

    #[must_use]
    pub fn delay_offset(&self, tr: usize) -> u16 {
        self.mem.delay_offset(tr)
    }
}
