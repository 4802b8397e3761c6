use crate::types::errors::MatrixParseError;
use crate::types::message::IdFormat;
use crate::types::signal::Signal;

/// Classic CAN frames carry at most 8 payload bytes.
const MAX_FRAME_BYTES: u16 = 8;

/// Highest identifier of the 11-bit standard space.
const STANDARD_ID_MAX: u32 = 0x7FF;

/// Classify a raw identifier: IDs above the 11-bit range are extended.
pub fn id_format_for(id: u32) -> IdFormat {
    if id > STANDARD_ID_MAX {
        IdFormat::Extended
    } else {
        IdFormat::Standard
    }
}

/// Derive the payload byte count (DLC) from a message's signals:
/// `clamp(ceil(max_end_bit / 8), 1, 8)`. A message with no signals
/// defaults to the full 8 bytes.
pub fn derive_byte_length(signals: &[Signal]) -> u16 {
    let Some(max_end) = signals.iter().map(Signal::end_bit).max() else {
        return MAX_FRAME_BYTES;
    };
    (max_end.div_ceil(8) as u16).clamp(1, MAX_FRAME_BYTES)
}

/// Verify that a signal's `[bit_start, bit_start + bit_length)` span fits
/// within the largest classic frame. Run once per signal after all rows are
/// parsed, before the message is constructed.
pub fn check_signal_fits(message: &str, sig: &Signal) -> Result<(), MatrixParseError> {
    if sig.bit_length == 0 {
        return Err(MatrixParseError::ZeroBitLength {
            message: message.to_string(),
            signal: sig.name.clone(),
        });
    }
    let total_bits: u32 = MAX_FRAME_BYTES as u32 * 8;
    let end: u32 = sig.end_bit();
    if end > total_bits {
        return Err(MatrixParseError::SignalOutOfBounds {
            message: message.to_string(),
            signal: sig.name.clone(),
            end,
            total_bits,
        });
    }
    Ok(())
}
