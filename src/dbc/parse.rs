use crate::dbc::core;
use crate::types::database::Database;
use crate::types::errors::DbcParseError;

use std::fs::File;
use std::io::{BufRead, BufReader};

use encoding_rs::WINDOWS_1252;

/// Parses a DBC file and returns a populated [`Database`] instance.
///
/// This function reads a DBC file from disk, parses its content line by
/// line, and fills the [`Database`] structure with the information the
/// matrix mapping carries:
/// - **Version** (from the `VERSION` line)
/// - **Messages** (from `BO_` lines)
/// - **Signals** (from `SG_` lines)
///
/// Every other DBC section (nodes, comments, attributes, value tables,
/// multiplexing metadata) is outside the table schema and skipped. The
/// reader decodes the file as Windows-1252 and transliterates a handful of
/// characters (e.g., `ü`, `ö`, `ß`) to ASCII fallbacks to keep downstream
/// processing UTF-8 safe.
///
/// # Parameters
/// - `path`: Path to the `.dbc` file to parse.
///
/// # Returns
/// - `Ok(Database)` if the file was successfully read and parsed.
/// - `Err(DbcParseError)` detailing why the file could not be opened or read.
///
/// # Notes
/// - Parsing stops only at the end of the file; malformed lines are skipped.
pub fn from_file(path: &str) -> Result<Database, DbcParseError> {
    // check if provided file has .dbc format
    if !path.to_ascii_lowercase().ends_with(".dbc") {
        return Err(DbcParseError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let path_owned: String = path.to_string();
    let file: File = File::open(path).map_err(|source| DbcParseError::OpenFile {
        path: path_owned.clone(),
        source,
    })?;
    let mut reader: BufReader<File> = BufReader::new(file);

    // Initialize Database
    let mut db: Database = Database::default();

    // Buffer for raw bytes of a line
    let mut raw_line: Vec<u8> = Vec::with_capacity(256);

    // For each line, transform german characters in UTF-8 compatible characters
    let read_decoded_line = |reader: &mut BufReader<File>,
                             buf: &mut Vec<u8>|
     -> Result<Option<String>, DbcParseError> {
        buf.clear();
        let read = reader
            .read_until(b'\n', buf)
            .map_err(|source| DbcParseError::Read {
                path: path_owned.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        let (s, _, _) = WINDOWS_1252.decode(buf);
        let src: String = s.into_owned();
        let mut out: String = String::with_capacity(src.len());
        for ch in src.chars() {
            match ch {
                'ü' => out.push('u'),
                'ö' => out.push('o'),
                'ä' => out.push('a'),
                'ß' => {
                    out.push('s');
                    out.push('s');
                }
                'Ü' => out.push('U'),
                'Ö' => out.push('O'),
                'Ä' => out.push('A'),
                '¿' => out.push('?'),
                _ => out.push(ch),
            }
        }
        // trim trailing CR/LF to behave like .lines()
        while out.ends_with(['\n', '\r']) {
            out.pop();
        }
        Ok(Some(out))
    };

    // Read and process each .dbc line
    loop {
        let Some(line) = read_decoded_line(&mut reader, &mut raw_line)? else {
            break;
        };

        // Work on a trimmed-start slice to preserve inner spaces elsewhere
        let line_trimmed: &str = line.trim_start();

        // skip comments and empty lines
        if line_trimmed.is_empty() || line_trimmed.starts_with("//") {
            continue;
        }

        // Dispatch on the line keyword
        let first: &str = line_trimmed.split_ascii_whitespace().next().unwrap_or("");

        match first {
            "VERSION" => {
                core::version::decode(&mut db, line_trimmed);
            }
            "BO_" => {
                core::bo_::decode(&mut db, line_trimmed);
            }
            "SG_" => {
                core::sg_::decode(&mut db, line_trimmed);
            }
            // Nodes, comments, attributes, and value tables are not part of
            // the matrix schema.
            _ => {}
        }
    }

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"VERSION "1.0"

NS_ :
	CM_
	BA_

BS_:

BU_: Gateway Motor

BO_ 256 Engine: 2 Motor
 SG_ RPM : 0|16@1+ (0.25,0) [0|8000] "rpm" Gateway

BO_ 2364540158 EEC1: 8 Vector__XXX
 SG_ EngTorque : 16|8@1+ (1,-125) [-125|125] "%" Vector__XXX

CM_ SG_ 256 RPM "engine speed";
"#;

    #[test]
    fn test_from_file_rejects_wrong_extension() {
        assert!(matches!(
            from_file("network.xlsx"),
            Err(DbcParseError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn test_from_file_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: String = dir.path().join("missing.dbc").display().to_string();
        assert!(matches!(
            from_file(&path),
            Err(DbcParseError::OpenFile { .. })
        ));
    }

    #[test]
    fn test_from_file_parses_messages_and_signals() {
        let dir = tempfile::tempdir().unwrap();
        let path: String = dir.path().join("sample.dbc").display().to_string();
        let mut file = File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        drop(file);

        let db: Database = from_file(&path).unwrap();
        assert_eq!(db.version, "1.0");
        assert_eq!(db.messages.len(), 2);

        let engine = &db.messages[0];
        assert_eq!(engine.id, 256);
        assert_eq!(engine.byte_length, 2);
        assert_eq!(engine.signals.len(), 1);
        assert_eq!(engine.signals[0].name, "RPM");

        let eec1 = &db.messages[1];
        assert_eq!(eec1.id, 0x0CF0_04FE);
        assert!(eec1.is_extended());
        assert_eq!(eec1.signals[0].offset, -125.0);
    }
}
