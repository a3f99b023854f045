use thiserror::Error;

/// Errors surfaced by the periodic tick entry point.
///
/// The reference hardware polls the handshake bit without a timeout; the
/// bounded poll budget (and this error) exist so that a host-side run can
/// never block forever on a co-processor that fails to acknowledge.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareError {
    #[error("FPGA did not acknowledge the modulation start handshake")]
    ModSyncTimeout,
    #[error("FPGA did not acknowledge the sequence start handshake")]
    SeqSyncTimeout,
}
