use crate::types::errors::MatrixParseError;

/// Column labels of the CAN matrix table, in order. The first row of every
/// matrix file must carry exactly these eleven labels; columns past the
/// eleventh are ignored.
pub const MATRIX_HEADERS: [&str; 11] = [
    "CAN ID & Message Name",
    "Signal Name",
    "Byte Ordering",
    "Signed/Unsigned",
    "Start Bit",
    "Length",
    "Factor",
    "Offset",
    "Min Value",
    "Max Value",
    "Units",
];

/// Validate the header record against [`MATRIX_HEADERS`].
///
/// Returns the first mismatch as [`MatrixParseError::Header`], naming the
/// 1-based column, the expected label, and what was found instead.
pub(crate) fn validate(record: &csv::StringRecord) -> Result<(), MatrixParseError> {
    for (idx, expected) in MATRIX_HEADERS.iter().copied().enumerate() {
        let found: &str = record.get(idx).unwrap_or("");
        if found != expected {
            return Err(MatrixParseError::Header {
                column: idx + 1,
                expected,
                found: found.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_exact_header() {
        let record: csv::StringRecord = csv::StringRecord::from(MATRIX_HEADERS.to_vec());
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_validate_tolerates_extra_columns() {
        let mut cells: Vec<&str> = MATRIX_HEADERS.to_vec();
        cells.push("Comment");
        let record: csv::StringRecord = csv::StringRecord::from(cells);
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_label() {
        let mut cells: Vec<&str> = MATRIX_HEADERS.to_vec();
        cells[4] = "StartBit";
        let record: csv::StringRecord = csv::StringRecord::from(cells);
        match validate(&record) {
            Err(MatrixParseError::Header {
                column,
                expected,
                found,
            }) => {
                assert_eq!(column, 5);
                assert_eq!(expected, "Start Bit");
                assert_eq!(found, "StartBit");
            }
            other => panic!("expected Header error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_short_header() {
        let record: csv::StringRecord = csv::StringRecord::from(vec!["CAN ID & Message Name"]);
        match validate(&record) {
            Err(MatrixParseError::Header { column, .. }) => assert_eq!(column, 2),
            other => panic!("expected Header error, got {:?}", other),
        }
    }
}
