use std::collections::HashMap;

use crate::matrix::core::{header, layout, row};
use crate::matrix::core::row::MatrixRow;
use crate::types::database::Database;
use crate::types::errors::MatrixParseError;
use crate::types::message::Message;
use crate::types::signal::Signal;

/// Parses a CAN matrix `.csv` file and returns a populated [`Database`].
///
/// The first record must carry the fixed eleven-column header; every
/// following record is one signal row. Rows belonging to the same
/// `(CAN ID, message name)` pair accumulate into one message, in the order
/// the pair first appears. Payload length (DLC) and the extended-frame
/// classification are not stored in the table; they are re-derived from the
/// parsed signal layouts and the identifier once all rows are consumed.
///
/// # Parameters
/// - `path`: Path to the `.csv` file to parse.
///
/// # Returns
/// - `Ok(Database)` if the file was successfully read and every row parsed.
/// - `Err(MatrixParseError)` detailing the first failure.
///
/// # Errors
/// Any malformed cell aborts the whole conversion with no partial result:
/// a truncated matrix is worse than no matrix. Blank separator rows and
/// rows with an empty ID or signal-name cell are skipped, never errors.
///
/// # Example
/// ```no_run
/// use can_matrix::matrix;
///
/// let db = matrix::from_file("example.csv").expect("Failed to parse matrix file");
/// println!("Parsed {} messages", db.messages.len());
/// ```
pub fn from_file(path: &str) -> Result<Database, MatrixParseError> {
    // check if provided file has .csv format
    if !path.to_ascii_lowercase().ends_with(".csv") {
        return Err(MatrixParseError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| MatrixParseError::OpenFile {
            path: path.to_string(),
            source,
        })?;

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for result in reader.records() {
        let record: csv::StringRecord =
            result.map_err(|source| MatrixParseError::Read {
                path: path.to_string(),
                source,
            })?;
        records.push(record);
    }

    database_from_records(&records)
}

/// Reverse mapping over in-memory records. `records[0]` is the header row.
///
/// Kept separate from the file layer so a front end holding a grid of cells
/// can convert without touching the filesystem.
pub fn database_from_records(records: &[csv::StringRecord]) -> Result<Database, MatrixParseError> {
    let header_record: csv::StringRecord = records.first().cloned().unwrap_or_default();
    header::validate(&header_record)?;

    // (id, message name) -> position in `groups`; first-seen order decides
    // message order in the output database.
    let mut index: HashMap<(u32, String), usize> = HashMap::new();
    let mut groups: Vec<((u32, String), Vec<Signal>)> = Vec::new();

    for (pos, record) in records.iter().enumerate().skip(1) {
        let row_no: usize = pos + 1; // 1-based, header row = 1
        let matrix_row: MatrixRow = MatrixRow::from_record(record);
        if matrix_row.is_blank() || matrix_row.is_separator() {
            continue;
        }

        let (id, msg_name) = row::split_message_cell(&matrix_row.message_cell)?;

        let sig: Signal = Signal {
            name: matrix_row.signal_name.clone(),
            bit_start: row::parse_u16_cell(&matrix_row.start_bit, "Start Bit", row_no)?,
            bit_length: row::parse_u16_cell(&matrix_row.length, "Length", row_no)?,
            endian: row::endianness_from_cell(&matrix_row.byte_ordering),
            sign: row::signess_from_cell(&matrix_row.signess),
            factor: row::parse_f64_cell(&matrix_row.factor, 1.0, "Factor", row_no)?,
            offset: row::parse_f64_cell(&matrix_row.offset, 0.0, "Offset", row_no)?,
            min: row::parse_opt_f64_cell(&matrix_row.min, "Min Value", row_no)?,
            max: row::parse_opt_f64_cell(&matrix_row.max, "Max Value", row_no)?,
            unit: row::unit_from_cell(&matrix_row.units),
        };

        let key: (u32, String) = (id, msg_name);
        match index.get(&key) {
            Some(&at) => groups[at].1.push(sig),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![sig]));
            }
        }
    }

    let mut db: Database = Database::default();
    for ((id, name), signals) in groups {
        for sig in &signals {
            layout::check_signal_fits(&name, sig)?;
        }
        db.add_message(Message {
            id_format: layout::id_format_for(id),
            id,
            byte_length: layout::derive_byte_length(&signals),
            name,
            signals,
        });
    }
    Ok(db)
}
