use serde::Serialize;

use crate::types::errors::MatrixParseError;
use crate::types::message::Message;
use crate::types::signal::{Endianness, Signal, Signess};

/// One table row: the flat, spreadsheet-facing form of a single signal.
///
/// All cells are text. The serde renames double as the header labels the
/// CSV writer emits, so the header row and the column order have a single
/// source of truth together with
/// [`MATRIX_HEADERS`](crate::matrix::MATRIX_HEADERS).
#[derive(Default, Clone, PartialEq, Debug, Serialize)]
pub struct MatrixRow {
    /// Combined `{hex id} - {message name}` cell.
    #[serde(rename = "CAN ID & Message Name")]
    pub message_cell: String,
    #[serde(rename = "Signal Name")]
    pub signal_name: String,
    /// `"Motorola"` or `"Intel"`.
    #[serde(rename = "Byte Ordering")]
    pub byte_ordering: String,
    /// `"Signed"` or `"Unsigned"`.
    #[serde(rename = "Signed/Unsigned")]
    pub signess: String,
    #[serde(rename = "Start Bit")]
    pub start_bit: String,
    #[serde(rename = "Length")]
    pub length: String,
    #[serde(rename = "Factor")]
    pub factor: String,
    #[serde(rename = "Offset")]
    pub offset: String,
    /// `"N/A"` when the signal has no minimum.
    #[serde(rename = "Min Value")]
    pub min: String,
    /// `"N/A"` when the signal has no maximum.
    #[serde(rename = "Max Value")]
    pub max: String,
    /// `"N/A"` when the signal has no unit.
    #[serde(rename = "Units")]
    pub units: String,
}

/// Cell text used for absent optional values.
pub const NOT_AVAILABLE: &str = "N/A";

impl MatrixRow {
    /// Builds the row for one signal of `msg` (the forward mapping of a
    /// single table line). Total: never fails.
    pub(crate) fn encode(msg: &Message, sig: &Signal) -> MatrixRow {
        MatrixRow {
            message_cell: format!("{} - {}", msg.id_hex(), msg.name),
            signal_name: sig.name.clone(),
            byte_ordering: sig.endian.to_str().to_string(),
            signess: sig.sign.to_str().to_string(),
            start_bit: sig.bit_start.to_string(),
            length: sig.bit_length.to_string(),
            factor: format_f64(sig.factor),
            offset: format_f64(sig.offset),
            min: format_opt_f64(sig.min),
            max: format_opt_f64(sig.max),
            units: match sig.unit.as_deref() {
                Some(unit) if !unit.is_empty() => unit.to_string(),
                _ => NOT_AVAILABLE.to_string(),
            },
        }
    }

    /// Rebuilds a row from a raw CSV record by position. Missing trailing
    /// cells read as empty, so short separator lines stay skippable instead
    /// of erroring.
    pub(crate) fn from_record(record: &csv::StringRecord) -> MatrixRow {
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        MatrixRow {
            message_cell: cell(0),
            signal_name: cell(1),
            byte_ordering: cell(2),
            signess: cell(3),
            start_bit: cell(4),
            length: cell(5),
            factor: cell(6),
            offset: cell(7),
            min: cell(8),
            max: cell(9),
            units: cell(10),
        }
    }

    /// A separator row: combined cell or signal-name cell empty. Skipped by
    /// the reverse mapping, never an error.
    pub(crate) fn is_separator(&self) -> bool {
        self.message_cell.is_empty() || self.signal_name.is_empty()
    }

    /// Every cell empty.
    pub(crate) fn is_blank(&self) -> bool {
        self.message_cell.is_empty()
            && self.signal_name.is_empty()
            && self.byte_ordering.is_empty()
            && self.signess.is_empty()
            && self.start_bit.is_empty()
            && self.length.is_empty()
            && self.factor.is_empty()
            && self.offset.is_empty()
            && self.min.is_empty()
            && self.max.is_empty()
            && self.units.is_empty()
    }
}

/// Split the combined `CAN ID & Message Name` cell into `(id, name)`.
///
/// Splits on the first `-`, trims both parts, and parses the left part as a
/// hexadecimal ID with an optional `0x`/`0X` prefix. Any failure is a
/// [`MatrixParseError::MessageCell`] naming the offending cell content.
pub(crate) fn split_message_cell(cell: &str) -> Result<(u32, String), MatrixParseError> {
    let invalid = || MatrixParseError::MessageCell {
        cell: cell.to_string(),
    };

    let (id_part, name_part) = cell.split_once('-').ok_or_else(invalid)?;
    let id_part: &str = id_part.trim();
    let digits: &str = id_part
        .strip_prefix("0x")
        .or_else(|| id_part.strip_prefix("0X"))
        .unwrap_or(id_part);
    let id: u32 = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    Ok((id, name_part.trim().to_string()))
}

/// Byte-ordering cell: case-insensitive, anything starting with `motorola`
/// is Motorola, everything else defaults to Intel.
pub(crate) fn endianness_from_cell(cell: &str) -> Endianness {
    if cell.trim().to_ascii_lowercase().starts_with("motorola") {
        Endianness::Motorola
    } else {
        Endianness::Intel
    }
}

/// Signed/unsigned cell: case-insensitive, anything starting with `signed`
/// is Signed, everything else defaults to Unsigned.
pub(crate) fn signess_from_cell(cell: &str) -> Signess {
    if cell.trim().to_ascii_lowercase().starts_with("signed") {
        Signess::Signed
    } else {
        Signess::Unsigned
    }
}

/// Integer cell (start bit, length).
pub(crate) fn parse_u16_cell(
    cell: &str,
    column: &'static str,
    row: usize,
) -> Result<u16, MatrixParseError> {
    cell.trim()
        .parse::<u16>()
        .map_err(|_| MatrixParseError::NumericCell {
            column,
            value: cell.to_string(),
            row,
        })
}

/// Float cell with a default for emptiness (factor, offset).
pub(crate) fn parse_f64_cell(
    cell: &str,
    default: f64,
    column: &'static str,
    row: usize,
) -> Result<f64, MatrixParseError> {
    let trimmed: &str = cell.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| MatrixParseError::NumericCell {
            column,
            value: cell.to_string(),
            row,
        })
}

/// Optional float cell (min, max): empty or `N/A` means "not specified".
pub(crate) fn parse_opt_f64_cell(
    cell: &str,
    column: &'static str,
    row: usize,
) -> Result<Option<f64>, MatrixParseError> {
    let trimmed: &str = cell.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| MatrixParseError::NumericCell {
            column,
            value: cell.to_string(),
            row,
        })
}

/// Unit cell: empty or `N/A` means "not specified".
pub(crate) fn unit_from_cell(cell: &str) -> Option<String> {
    let trimmed: &str = cell.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn format_opt_f64(value: Option<f64>) -> String {
    match value {
        Some(v) => format_f64(v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn format_f64(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let mut s = format!("{:.12}", value);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.push('0');
        }
        s
    }
}
