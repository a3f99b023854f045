use pta_firmware_emulator::{cpu::params::*, CpuFirmware, DcClock, FirmwareError};

use crate::{new_frame, set_cpu_flags, set_mod_chunk, set_payload_word};

#[test]
fn update_without_pending_work_is_a_no_op() -> anyhow::Result<()> {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    cpu.update()?;
    assert_eq!(None, cpu.fpga().mod_start_time());
    assert_eq!(None, cpu.fpga().seq_start_time());
    Ok(())
}

#[test]
fn modulation_end_arms_clock_on_next_tick() -> anyhow::Result<()> {
    let mut cpu = CpuFirmware::new(TRANS_NUM);

    let mut frame = new_frame(1, CMD_OP);
    set_cpu_flags(&mut frame, CPU_CTL_FLAG_MOD_BEGIN | CPU_CTL_FLAG_MOD_END);
    set_mod_chunk(&mut frame, &[0x01, 0x02, 0x03, 0x04]);
    cpu.recv(&frame);

    // The receive path never arms the clock.
    assert_eq!(None, cpu.fpga().mod_start_time());

    cpu.update()?;

    let start = cpu.fpga().mod_start_time().unwrap();
    assert_eq!(0, start % cpu.dc().cycle_period());
    assert!(start > cpu.dc().sys_time().sys_time());
    assert_eq!(None, cpu.fpga().seq_start_time());

    // Pending work is consumed; another tick does not re-arm.
    cpu.update()?;
    assert_eq!(start, cpu.fpga().mod_start_time().unwrap());
    Ok(())
}

#[test]
fn sequence_end_arms_clock_on_next_tick() -> anyhow::Result<()> {
    let mut cpu = CpuFirmware::new(TRANS_NUM);

    let mut frame = new_frame(1, CMD_SEQ_FOCUS_MODE);
    set_cpu_flags(&mut frame, CPU_CTL_FLAG_SEQ_BEGIN | CPU_CTL_FLAG_SEQ_END);
    set_payload_word(&mut frame, 0, 1);
    set_payload_word(&mut frame, 1, 0x0001);
    cpu.recv(&frame);

    cpu.update()?;

    let start = cpu.fpga().seq_start_time().unwrap();
    assert_eq!(0, start % cpu.dc().cycle_period());
    assert!(start > cpu.dc().sys_time().sys_time());
    Ok(())
}

#[test]
fn handshake_preserves_fpga_facing_flags() -> anyhow::Result<()> {
    let mut cpu = CpuFirmware::new(TRANS_NUM);

    let mut frame = new_frame(1, CMD_OP);
    frame[1] = (CTL_FLAG_OUTPUT_ENABLE | CTL_FLAG_SILENT) as u8;
    set_cpu_flags(&mut frame, CPU_CTL_FLAG_MOD_BEGIN | CPU_CTL_FLAG_MOD_END);
    set_mod_chunk(&mut frame, &[0xFF, 0xFF]);
    cpu.recv(&frame);
    cpu.update()?;

    assert_eq!(
        CTL_FLAG_OUTPUT_ENABLE | CTL_FLAG_SILENT,
        cpu.fpga().ctl_flags()
    );
    Ok(())
}

#[test]
fn stalled_fpga_surfaces_timeout() {
    let mut cpu = CpuFirmware::new(TRANS_NUM);
    cpu.fpga_mut().set_stall_handshake(true);

    let mut frame = new_frame(1, CMD_OP);
    set_cpu_flags(&mut frame, CPU_CTL_FLAG_MOD_BEGIN | CPU_CTL_FLAG_MOD_END);
    set_mod_chunk(&mut frame, &[0x01, 0x02]);
    cpu.recv(&frame);

    assert_eq!(Err(FirmwareError::ModSyncTimeout), cpu.update());
}
