use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::matrix::core::header::MATRIX_HEADERS;
use crate::matrix::core::row::MatrixRow;
use crate::types::database::Database;
use crate::types::errors::MatrixSaveError;

/// Forward mapping: one [`MatrixRow`] per signal.
///
/// Messages are emitted in the database's own order and signals in their
/// stored order within each message, so the table reads exactly like the
/// database iterates. This step is total: it never fails for a well-formed
/// [`Database`].
pub fn matrix_rows(database: &Database) -> Vec<MatrixRow> {
    let mut rows: Vec<MatrixRow> = Vec::with_capacity(database.signal_count());
    for msg in &database.messages {
        for sig in &msg.signals {
            rows.push(MatrixRow::encode(msg, sig));
        }
    }
    rows
}

/// Serializes a [`Database`] into a CAN matrix table and writes it to `path`.
///
/// Ensures the destination has a `.csv` extension, creates intermediate
/// directories when needed, and reports structured [`MatrixSaveError`]
/// variants for path or I/O failures. The header row is emitted even for a
/// database with no signals.
///
/// # Parameters
/// - `path`: destination `.csv` path.
/// - `database`: the database to flatten.
///
/// # Errors
/// Returns an `Err(MatrixSaveError)` if the path does not end in `.csv`,
/// a parent directory cannot be created, or writing fails.
pub fn save_to_file(path: &str, database: &Database) -> Result<(), MatrixSaveError> {
    if !path.to_ascii_lowercase().ends_with(".csv") {
        return Err(MatrixSaveError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let path_ref: &Path = Path::new(path);
    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| MatrixSaveError::CreateDirectory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file: File = File::create(path_ref).map_err(|source| MatrixSaveError::CreateFile {
        path: path.to_string(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    // The csv writer emits the header from the MatrixRow serde renames on
    // the first serialize call; an empty database gets it explicitly.
    let rows: Vec<MatrixRow> = matrix_rows(database);
    if rows.is_empty() {
        writer
            .write_record(MATRIX_HEADERS)
            .map_err(|source| MatrixSaveError::Write {
                path: path.to_string(),
                source,
            })?;
    }
    for row in rows {
        writer.serialize(row).map_err(|source| MatrixSaveError::Write {
            path: path.to_string(),
            source,
        })?;
    }
    writer.flush().map_err(|source| MatrixSaveError::Write {
        path: path.to_string(),
        source: source.into(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::Message;
    use crate::types::signal::{Endianness, Signal, Signess};

    fn build_test_database() -> Database {
        let mut db: Database = Database::default();
        db.add_message(Message {
            id: 0x100,
            name: "Engine".to_string(),
            byte_length: 2,
            signals: vec![
                Signal {
                    name: "RPM".to_string(),
                    bit_start: 0,
                    bit_length: 16,
                    endian: Endianness::Intel,
                    sign: Signess::Unsigned,
                    factor: 0.25,
                    offset: 0.0,
                    min: Some(0.0),
                    max: Some(8000.0),
                    unit: Some("rpm".to_string()),
                },
                Signal {
                    name: "Temp".to_string(),
                    bit_start: 16,
                    bit_length: 8,
                    endian: Endianness::Motorola,
                    sign: Signess::Signed,
                    factor: 1.0,
                    offset: -40.0,
                    min: None,
                    max: None,
                    unit: None,
                },
            ],
            ..Default::default()
        });
        db
    }

    #[test]
    fn test_matrix_rows_order_and_content() {
        let db: Database = build_test_database();
        let rows: Vec<MatrixRow> = matrix_rows(&db);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message_cell, "0x100 - Engine");
        assert_eq!(rows[0].signal_name, "RPM");
        assert_eq!(rows[1].signal_name, "Temp");
        assert_eq!(rows[1].byte_ordering, "Motorola");
        assert_eq!(rows[1].signess, "Signed");
        assert_eq!(rows[1].offset, "-40");
        assert_eq!(rows[1].min, "N/A");
    }

    #[test]
    fn test_save_rejects_wrong_extension() {
        let db: Database = Database::default();
        assert!(matches!(
            save_to_file("matrix.xlsx", &db),
            Err(MatrixSaveError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn test_save_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path: String = dir
            .path()
            .join("out")
            .join("matrix.csv")
            .display()
            .to_string();

        let db: Database = build_test_database();
        save_to_file(&path, &db).unwrap();

        let content: String = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "CAN ID & Message Name,Signal Name,Byte Ordering,Signed/Unsigned,Start Bit,Length,Factor,Offset,Min Value,Max Value,Units"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0x100 - Engine,RPM,Intel,Unsigned,0,16,0.25,0,0,8000,rpm"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0x100 - Engine,Temp,Motorola,Signed,16,8,1,-40,N/A,N/A,N/A"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_save_empty_database_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path: String = dir.path().join("empty.csv").display().to_string();

        save_to_file(&path, &Database::default()).unwrap();

        let content: String = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("CAN ID & Message Name,"));
        assert_eq!(content.lines().count(), 1);
    }
}
