use super::super::params::*;

/// Banked BRAM store behind the memory-mapped bus.
///
/// Addresses are `(select << 14) | offset` with a 14-bit window per select.
/// The modulation and sequence banks are larger than one window; the
/// physical word behind an access is `(bank_offset_reg << 14) | offset`,
/// where the bank-offset register lives in the controller bank. Keeping that
/// register in step with the writer's cursor is the whole point of the ring
/// protocol.
pub(crate) struct Memory {
    controller_bram: Vec<u16>,
    mod_bram: Vec<u16>,
    normal_bram: Vec<u16>,
    seq_bram: Vec<u16>,
    armed_mod_start: Option<u64>,
    armed_seq_start: Option<u64>,
    stall_handshake: bool,
}

impl Memory {
    pub fn new(num_transducers: usize) -> Self {
        let mut controller_bram = vec![0x0000; 0x200];
        controller_bram[ADDR_VERSION_NUM] = FPGA_VERSION_NUM;
        Self {
            controller_bram,
            mod_bram: vec![0x0000; (MOD_BUF_SIZE_MAX >> 1) as usize],
            normal_bram: vec![0x0000; num_transducers],
            seq_bram: vec![0x0000; (SEQ_FOCUS_BUF_SIZE_MAX << 2) as usize],
            armed_mod_start: None,
            armed_seq_start: None,
            stall_handshake: false,
        }
    }

    pub fn read(&self, addr: u16) -> u16 {
        let select = ((addr >> 14) & 0x0003) as u8;
        let addr = (addr & 0x3FFF) as usize;
        match select {
            BRAM_SELECT_CONTROLLER => self.controller_bram[addr],
            _ => unreachable!(),
        }
    }

    pub fn write(&mut self, addr: u16, data: u16) {
        let select = ((addr >> 14) & 0x0003) as u8;
        let addr = (addr & 0x3FFF) as usize;
        match select {
            BRAM_SELECT_CONTROLLER => match addr {
                ADDR_CTL_FLAG => self.write_ctl_flag(data),
                _ => self.controller_bram[addr] = data,
            },
            BRAM_SELECT_MOD => {
                let page = self.controller_bram[ADDR_MOD_BRAM_ADDR_OFFSET] as usize;
                let idx = ((page << 14) | addr) & (self.mod_bram.len() - 1);
                self.mod_bram[idx] = data;
            }
            BRAM_SELECT_NORMAL => self.normal_bram[addr] = data,
            BRAM_SELECT_SEQ => {
                let page = self.controller_bram[ADDR_SEQ_BRAM_ADDR_OFFSET] as usize;
                let idx = ((page << 14) | addr) & (self.seq_bram.len() - 1);
                self.seq_bram[idx] = data;
            }
            _ => unreachable!(),
        }
    }

    // Writing an init bit models the FPGA side of the arm handshake: the
    // start tick is latched from the sync-time registers and the bit reads
    // back as cleared.
    fn write_ctl_flag(&mut self, data: u16) {
        if self.stall_handshake {
            self.controller_bram[ADDR_CTL_FLAG] = data;
            return;
        }
        if (data & CTL_FLAG_MOD_INIT) == CTL_FLAG_MOD_INIT {
            self.armed_mod_start = Some(Self::read_u64(&self.controller_bram, ADDR_MOD_SYNC_TIME_0));
        }
        if (data & CTL_FLAG_SEQ_INIT) == CTL_FLAG_SEQ_INIT {
            self.armed_seq_start = Some(Self::read_u64(&self.controller_bram, ADDR_SEQ_SYNC_TIME_0));
        }
        self.controller_bram[ADDR_CTL_FLAG] = data & 0x00FF;
    }

    fn read_u64(bram: &[u16], addr: usize) -> u64 {
        (0..4).fold(0u64, |acc, i| acc | (bram[addr + i] as u64) << (16 * i))
    }

    pub fn set_stall_handshake(&mut self, stall: bool) {
        self.stall_handshake = stall;
    }

    pub fn ctl_flags(&self) -> u16 {
        self.controller_bram[ADDR_CTL_FLAG]
    }

    pub fn assert_thermal_sensor(&mut self) {
        self.controller_bram[ADDR_FPGA_INFO] |= 1 << 0;
    }

    pub fn deassert_thermal_sensor(&mut self) {
        self.controller_bram[ADDR_FPGA_INFO] &= !(1 << 0);
    }

    pub fn info(&self) -> u16 {
        self.controller_bram[ADDR_FPGA_INFO]
    }

    pub fn mod_start_time(&self) -> Option<u64> {
        self.armed_mod_start
    }

    pub fn seq_start_time(&self) -> Option<u64> {
        self.armed_seq_start
    }

    pub fn modulation_cycle(&self) -> usize {
        self.controller_bram[ADDR_MOD_CYCLE] as usize + 1
    }

    pub fn modulation_at(&self, idx: usize) -> u8 {
        let m = self.mod_bram[idx >> 1];
        let m = if idx % 2 == 0 { m & 0xFF } else { m >> 8 };
        m as u8
    }

    pub fn modulation(&self) -> Vec<u8> {
        (0..self.modulation_cycle())
            .map(|i| self.modulation_at(i))
            .collect()
    }

    pub fn mod_bank_offset(&self) -> u16 {
        self.controller_bram[ADDR_MOD_BRAM_ADDR_OFFSET]
    }

    pub fn sequence_cycle(&self) -> usize {
        self.controller_bram[ADDR_SEQ_CYCLE] as usize + 1
    }

    pub fn sequence_div(&self) -> u16 {
        self.controller_bram[ADDR_SEQ_DIV]
    }

    pub fn seq_bank_offset(&self) -> u16 {
        self.controller_bram[ADDR_SEQ_BRAM_ADDR_OFFSET]
    }

    // Flat views of the sequence ring. Record `i` occupies words
    // `((i >> W) << 14) | ((i & mask) * stride)`, which collapses to `i *
    // stride` because a segment fills its window exactly.
    pub fn focus_record(&self, idx: usize) -> [u16; 4] {
        let base = idx << 2;
        [
            self.seq_bram[base],
            self.seq_bram[base + 1],
            self.seq_bram[base + 2],
            self.seq_bram[base + 3],
        ]
    }

    pub fn gain_drive(&self, cycle: usize, tr: usize) -> u16 {
        self.seq_bram[(cycle << 8) | tr]
    }

    pub fn drive(&self, tr: usize) -> u16 {
        self.normal_bram[tr]
    }

    pub fn drives(&self) -> Vec<u16> {
        self.normal_bram.clone()
    }

    pub fn delay_offset(&self, tr: usize) -> u16 {
        self.controller_bram[ADDR_DELAY_OFFSET_BASE + tr]
    }
}
