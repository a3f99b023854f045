use pta_firmware_emulator::{
    cpu::{frame::MOD_FRAME_SIZE, params::*},
    CpuFirmware,
};

use rand::prelude::*;

use crate::{new_frame, set_cpu_flags, set_mod_chunk};

fn send_stream(cpu: &mut CpuFirmware, base_msg_id: u8, samples: &[u8]) {
    let chunks: Vec<_> = samples.chunks(MOD_FRAME_SIZE).collect();
    let last = chunks.len() - 1;
    chunks.iter().enumerate().for_each(|(i, chunk)| {
        let mut frame = new_frame(base_msg_id + (i & 1) as u8, CMD_OP);
        let mut flags = 0x00;
        if i == 0 {
            flags |= CPU_CTL_FLAG_MOD_BEGIN;
        }
        if i == last {
            flags |= CPU_CTL_FLAG_MOD_END;
        }
        set_cpu_flags(&mut frame, flags);
        set_mod_chunk(&mut frame, chunk);
        cpu.recv(&frame);

        let sent = chunks[..=i].iter().map(|c| c.len()).sum::<usize>() as u32;
        assert_eq!(
            (sent >> MOD_BUF_SEGMENT_SIZE_WIDTH) as u16,
            cpu.fpga().mod_bank_offset()
        );
    });
}

#[test]
fn modulation_odd_length_stream() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    let mut rng = rand::rng();

    let samples: Vec<u8> = (0..15).map(|_| rng.random()).collect();

    let mut frame = new_frame(1, CMD_OP);
    set_cpu_flags(&mut frame, CPU_CTL_FLAG_MOD_BEGIN);
    set_mod_chunk(&mut frame, &samples[..7]);
    cpu.recv(&frame);

    let mut frame = new_frame(2, CMD_OP);
    set_mod_chunk(&mut frame, &samples[7..13]);
    cpu.recv(&frame);

    let mut frame = new_frame(3, CMD_OP);
    set_cpu_flags(&mut frame, CPU_CTL_FLAG_MOD_END);
    set_mod_chunk(&mut frame, &samples[13..]);
    cpu.recv(&frame);

    assert_eq!(15, cpu.fpga().modulation_cycle());
    assert_eq!(samples, cpu.fpga().modulation());
}

#[test]
fn modulation_wraps_physical_window() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    let mut rng = rand::rng();

    let n = MOD_BUF_SEGMENT_SIZE as usize + 300;
    let samples: Vec<u8> = (0..n).map(|_| rng.random()).collect();
    send_stream(&mut cpu, 1, &samples);

    assert_eq!(1, cpu.fpga().mod_bank_offset());
    assert_eq!(n, cpu.fpga().modulation_cycle());
    assert_eq!(samples, cpu.fpga().modulation());
}

#[test]
fn modulation_restart_resets_cursor() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);

    send_stream(&mut cpu, 1, &[0xAA; 100]);
    send_stream(&mut cpu, 3, &[0x55, 0x66]);

    assert_eq!(vec![0x55, 0x66], cpu.fpga().modulation());
}
