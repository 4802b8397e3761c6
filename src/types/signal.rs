/// Definition of a signal within a CAN message.
///
/// Describes position/bit-length, endianness, sign, scaling (factor/offset),
/// optional valid range, and optional unit of measure.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct Signal {
    /// Signal name, unique within its owning message.
    pub name: String,
    /// Bit start in the payload. For Intel signals this is the LSB of the
    /// field; for Motorola signals the MSB, per DBC numbering.
    pub bit_start: u16,
    /// Bit length.
    pub bit_length: u16,
    /// Endianness.
    pub endian: Endianness,
    /// Sign.
    pub sign: Signess,
    /// Scaling factor. Physical = raw * factor + offset.
    pub factor: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Minimum physical value. `None` when not specified.
    pub min: Option<f64>,
    /// Maximum physical value. `None` when not specified.
    pub max: Option<f64>,
    /// Unit of measure. `None` when not specified.
    pub unit: Option<String>,
}

impl Signal {
    /// First bit past the end of the field on the linear bit plane
    /// (`bit_start + bit_length`).
    pub fn end_bit(&self) -> u32 {
        self.bit_start as u32 + self.bit_length as u32
    }
}

/// Byte ordering of a signal. `Motorola` = big-endian (`@0` in DBC),
/// `Intel` = little-endian (`@1`).
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Endianness {
    Motorola, // 0
    #[default]
    Intel, // 1
}

impl Endianness {
    /// Table-cell text: `"Motorola"` or `"Intel"`.
    pub fn to_str(&self) -> &'static str {
        match self {
            Endianness::Motorola => "Motorola",
            Endianness::Intel => "Intel",
        }
    }
}

/// Sign of a signal's raw value.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Signess {
    #[default]
    Unsigned, // +
    Signed, // -
}

impl Signess {
    /// Table-cell text: `"Signed"` or `"Unsigned"`.
    pub fn to_str(&self) -> &'static str {
        match self {
            Signess::Unsigned => "Unsigned",
            Signess::Signed => "Signed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_bit() {
        let sig: Signal = Signal {
            name: "Speed".into(),
            bit_start: 48,
            bit_length: 16,
            ..Default::default()
        };
        assert_eq!(sig.end_bit(), 64);
    }

    #[test]
    fn test_cell_texts() {
        assert_eq!(Endianness::Motorola.to_str(), "Motorola");
        assert_eq!(Endianness::Intel.to_str(), "Intel");
        assert_eq!(Signess::Signed.to_str(), "Signed");
        assert_eq!(Signess::Unsigned.to_str(), "Unsigned");
    }
}
