//! Single-file conversion entry points.
//!
//! Each function parses the input with one codec and writes it with the
//! other; the only side effect is the one output file (plus its parent
//! directory when absent). On success the output path comes back to the
//! caller; on failure nothing is written.

use std::path::PathBuf;

use crate::types::database::Database;
use crate::types::errors::ConvertError;
use crate::{dbc, matrix};

/// Convert a `.dbc` file to a CAN matrix `.csv` file.
///
/// # Parameters
/// - `input`: path to the `.dbc` file to read.
/// - `output`: path of the `.csv` file to write.
///
/// # Returns
/// The output path on success; the first codec error otherwise.
pub fn dbc_to_matrix(input: &str, output: &str) -> Result<PathBuf, ConvertError> {
    let db: Database = dbc::parse::from_file(input)?;
    matrix::save::save_to_file(output, &db)?;
    Ok(PathBuf::from(output))
}

/// Convert a CAN matrix `.csv` file back to a `.dbc` file.
///
/// Payload lengths and extended-frame flags are re-derived from the table's
/// signal layouts while parsing; see
/// [`matrix::parse::from_file`](crate::matrix::parse::from_file).
pub fn matrix_to_dbc(input: &str, output: &str) -> Result<PathBuf, ConvertError> {
    let db: Database = matrix::parse::from_file(input)?;
    dbc::save::save_to_file(output, &db)?;
    Ok(PathBuf::from(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DBC: &str = r#"VERSION "2.4"

BS_:

BU_: Gateway

BO_ 256 Engine: 2 Gateway
 SG_ RPM : 0|16@1+ (0.25,0) [0|8000] "rpm" Gateway
 SG_ Idle : 16|1@1+ (1,0) [0|0] "" Gateway

BO_ 2364540158 EEC1: 8 Vector__XXX
 SG_ EngTorque : 16|8@1- (1,-125) [-125|125] "%" Vector__XXX
"#;

    #[test]
    fn test_dbc_to_matrix_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let dbc_path: String = dir.path().join("network.dbc").display().to_string();
        let csv_path: String = dir.path().join("network.csv").display().to_string();
        let back_path: String = dir.path().join("back.dbc").display().to_string();
        std::fs::write(&dbc_path, SAMPLE_DBC).unwrap();

        let out: PathBuf = dbc_to_matrix(&dbc_path, &csv_path).unwrap();
        assert!(out.exists());

        let out: PathBuf = matrix_to_dbc(&csv_path, &back_path).unwrap();
        assert!(out.exists());

        // Up to the re-derived payload length, the databases match
        let original = crate::dbc::from_file(&dbc_path).unwrap();
        let recovered = crate::dbc::from_file(&back_path).unwrap();
        assert_eq!(recovered.messages.len(), original.messages.len());
        for (rec, orig) in recovered.messages.iter().zip(&original.messages) {
            assert_eq!(rec.id, orig.id);
            assert_eq!(rec.id_format, orig.id_format);
            assert_eq!(rec.name, orig.name);
            assert_eq!(rec.signals, orig.signals);
        }
        // Engine: bits 0..17 occupied -> 3 bytes; EEC1: bits 16..24 -> 3 bytes
        assert_eq!(recovered.messages[0].byte_length, 3);
        assert_eq!(recovered.messages[1].byte_length, 3);
    }

    #[test]
    fn test_failed_reverse_conversion_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path: String = dir.path().join("broken.csv").display().to_string();
        let dbc_path: String = dir.path().join("broken.dbc").display().to_string();

        let content = "CAN ID & Message Name,Signal Name,Byte Ordering,Signed/Unsigned,Start Bit,Length,Factor,Offset,Min Value,Max Value,Units\nZZZ - Msg,Bad,Intel,Unsigned,0,8,1,0,N/A,N/A,N/A\n";
        std::fs::write(&csv_path, content).unwrap();

        assert!(matrix_to_dbc(&csv_path, &dbc_path).is_err());
        assert!(!std::path::Path::new(&dbc_path).exists());
    }
}
