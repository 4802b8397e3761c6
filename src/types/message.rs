use crate::types::signal::Signal;

/// CAN message defined in the database.
///
/// Maintains the numeric ID (`id`), its format (`id_format`), the `name`,
/// payload length (`byte_length`), and the list of composing signals in
/// table-row order.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct Message {
    /// ID format (Standard or Extended).
    pub id_format: IdFormat,
    /// Numeric CAN ID (base 10), without the extended-frame flag bit.
    pub id: u32,
    /// Message name.
    pub name: String,
    /// Payload length in bytes (DLC, 1..=8).
    pub byte_length: u16,
    /// Signals that belong to this message, in insertion order.
    pub signals: Vec<Signal>,
}

impl Message {
    /// Lowercase hexadecimal CAN ID (`"0x..."`, no leading zeros), the form
    /// used in the table's combined `CAN ID & Message Name` cell.
    pub fn id_hex(&self) -> String {
        format!("0x{:x}", self.id)
    }

    /// `true` when the ID lives in the 29-bit extended space.
    pub fn is_extended(&self) -> bool {
        self.id_format == IdFormat::Extended
    }

    /// Returns a reference to a signal by name (case-insensitive).
    pub fn get_signal_by_name(&self, name: &str) -> Option<&Signal> {
        self.signals
            .iter()
            .find(|sig| sig.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub enum IdFormat {
    #[default]
    Standard,
    Extended,
}

impl IdFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            IdFormat::Standard => "Standard",
            IdFormat::Extended => "Extended",
        }
    }
}
