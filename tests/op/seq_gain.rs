use pta_firmware_emulator::{cpu::params::*, CpuFirmware};

use itertools::Itertools;
use rand::prelude::*;

use crate::{new_frame, set_body_word, set_cpu_flags, set_payload_word};

fn begin_frame(msg_id: u8, mode: u8, div: u16) -> [u8; 626] {
    let mut frame = new_frame(msg_id, CMD_SEQ_GAIN_MODE);
    set_cpu_flags(&mut frame, CPU_CTL_FLAG_SEQ_BEGIN);
    frame[4] = mode;
    set_payload_word(&mut frame, 1, div);
    frame
}

fn data_frame(msg_id: u8, words: &[u16], end: bool) -> [u8; 626] {
    let mut frame = new_frame(msg_id, CMD_SEQ_GAIN_MODE);
    if end {
        set_cpu_flags(&mut frame, CPU_CTL_FLAG_SEQ_END);
    }
    words
        .iter()
        .enumerate()
        .for_each(|(i, &w)| set_body_word(&mut frame, i, w));
    frame
}

#[test]
fn gain_sequence_duty_phase_full() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    let mut rng = rand::rng();

    let words = (0..TRANS_NUM).map(|_| rng.random()).collect_vec();

    cpu.recv(&begin_frame(1, GAIN_DATA_MODE_DUTY_PHASE_FULL, 0x0042));
    cpu.recv(&data_frame(2, &words, true));

    assert_eq!(1, cpu.fpga().sequence_cycle());
    assert_eq!(0x0042, cpu.fpga().sequence_div());
    (0..TRANS_NUM).for_each(|i| assert_eq!(words[i], cpu.fpga().gain_drive(0, i)));
}

#[test]
fn gain_sequence_phase_full_expands_two_cycles() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    let mut rng = rand::rng();

    let words = (0..TRANS_NUM).map(|_| rng.random()).collect_vec();

    cpu.recv(&begin_frame(1, GAIN_DATA_MODE_PHASE_FULL, 0x0001));
    cpu.recv(&data_frame(2, &words, true));

    assert_eq!(2, cpu.fpga().sequence_cycle());
    (0..TRANS_NUM).for_each(|i| {
        assert_eq!(
            GAIN_DUTY_MASK | (words[i] & 0x00FF),
            cpu.fpga().gain_drive(0, i)
        );
        assert_eq!(GAIN_DUTY_MASK | (words[i] >> 8), cpu.fpga().gain_drive(1, i));
    });
}

#[test]
fn gain_sequence_phase_half_expands_four_cycles() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    let mut rng = rand::rng();

    let words = (0..TRANS_NUM).map(|_| rng.random()).collect_vec();

    cpu.recv(&begin_frame(1, GAIN_DATA_MODE_PHASE_HALF, 0x0001));
    cpu.recv(&data_frame(2, &words, true));

    assert_eq!(4, cpu.fpga().sequence_cycle());
    (0..4).for_each(|k| {
        (0..TRANS_NUM).for_each(|i| {
            let nibble = (words[i] >> (k << 2)) & 0x000F;
            assert_eq!(
                GAIN_DUTY_MASK | (nibble << 4) | nibble,
                cpu.fpga().gain_drive(k, i)
            );
        });
    });
}

#[test]
fn gain_sequence_unknown_mode_falls_back_to_duty_phase_full() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);

    let words = (0..TRANS_NUM).map(|i| i as u16).collect_vec();

    cpu.recv(&begin_frame(1, 0x7F, 0x0001));
    cpu.recv(&data_frame(2, &words, true));

    assert_eq!(1, cpu.fpga().sequence_cycle());
    (0..TRANS_NUM).for_each(|i| assert_eq!(words[i], cpu.fpga().gain_drive(0, i)));
}

#[test]
fn gain_sequence_honors_transducer_count() {
    let mut cpu = CpuFirmware::new(10);

    let words = (0..TRANS_NUM).map(|i| 0x1000 + i as u16).collect_vec();

    cpu.recv(&begin_frame(1, GAIN_DATA_MODE_DUTY_PHASE_FULL, 0x0001));
    cpu.recv(&data_frame(2, &words, true));

    (0..10).for_each(|i| assert_eq!(words[i], cpu.fpga().gain_drive(0, i)));
    assert_eq!(0x0000, cpu.fpga().gain_drive(0, 10));
}

#[test]
fn gain_sequence_wraps_physical_window() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    let mut rng = rand::rng();

    // 40 phase-full frames expand to 80 cycles, crossing the 64-cycle segment.
    let frames = (0..40)
        .map(|_| (0..TRANS_NUM).map(|_| rng.random()).collect_vec())
        .collect_vec();

    cpu.recv(&begin_frame(1, GAIN_DATA_MODE_PHASE_FULL, 0x0001));
    frames.iter().enumerate().for_each(|(i, words)| {
        cpu.recv(&data_frame(
            (i & 1) as u8 + 2,
            words,
            i == frames.len() - 1,
        ));
        let cycles = ((i + 1) * 2) as u32;
        assert_eq!(
            (cycles >> SEQ_GAIN_SEGMENT_SIZE_WIDTH) as u16,
            cpu.fpga().seq_bank_offset()
        );
    });

    assert_eq!(80, cpu.fpga().sequence_cycle());
    (0..TRANS_NUM).for_each(|i| {
        assert_eq!(
            GAIN_DUTY_MASK | (frames[35][i] & 0x00FF),
            cpu.fpga().gain_drive(70, i)
        );
    });
}
