use std::fmt::{self, Write as FmtWrite};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::database::Database;
use crate::types::errors::DbcSaveError;
use crate::types::signal::{Endianness, Signal, Signess};

const CAN_EFF_FLAG: u32 = 0x8000_0000;

const NS_KEYWORDS: &[&str] = &[
    "NS_DESC_",
    "CM_",
    "BA_DEF_",
    "BA_",
    "VAL_",
    "CAT_DEF_",
    "CAT_",
    "FILTER",
    "BA_DEF_DEF_",
    "EV_DATA_",
    "ENVVAR_DATA_",
    "SGTYPE_",
    "SGTYPE_VAL_",
    "BA_DEF_SGTYPE_",
    "BA_SGTYPE_",
    "SIG_TYPE_REF_",
    "VAL_TABLE_",
    "SIG_GROUP_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "BO_TX_BU_",
    "BA_DEF_REL_",
    "BA_REL_",
    "BA_DEF_DEF_REL_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
];

/// Serializes a [`Database`] into DBC text and writes it to `path`.
///
/// Ensures the destination has a `.dbc` extension, creates intermediate
/// directories when needed, and reports structured [`DbcSaveError`] variants
/// for path, I/O, or formatting failures.
pub fn save_to_file(path: &str, database: &Database) -> Result<(), DbcSaveError> {
    if !path.to_ascii_lowercase().ends_with(".dbc") {
        return Err(DbcSaveError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let serialized: String = serialize_database(database)?;

    let path_ref: &Path = Path::new(path);
    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DbcSaveError::CreateDirectory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file = File::create(path_ref).map_err(|source| DbcSaveError::CreateFile {
        path: path.to_string(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(serialized.as_bytes())
        .map_err(|source| DbcSaveError::Write {
            path: path.to_string(),
            source,
        })?;
    writer.flush().map_err(|source| DbcSaveError::Write {
        path: path.to_string(),
        source,
    })?;
    Ok(())
}

fn serialize_database(db: &Database) -> Result<String, DbcSaveError> {
    let mut out = String::new();

    let version = escape_dbc_string(&db.version);
    write_fmt(&mut out, format_args!("VERSION \"{}\"\n\n", version))?;

    out.push_str("NS_ :\n");
    for keyword in NS_KEYWORDS {
        out.push('\t');
        out.push_str(keyword);
        out.push('\n');
    }
    out.push('\n');

    out.push_str("BS_:\n\n");

    // The matrix schema carries no node information.
    out.push_str("BU_:\n\n");

    write_messages(db, &mut out)?;

    Ok(out)
}

fn write_messages(db: &Database, out: &mut String) -> Result<(), DbcSaveError> {
    for message in &db.messages {
        // Extended IDs re-gain the flag bit in the BO_ line
        let raw_id: u32 = if message.is_extended() {
            message.id | CAN_EFF_FLAG
        } else {
            message.id
        };

        write_fmt(
            out,
            format_args!(
                "BO_ {} {}: {} Vector__XXX\n",
                raw_id, message.name, message.byte_length
            ),
        )?;

        for signal in &message.signals {
            write_signal(signal, out)?;
        }
        out.push('\n');
    }

    Ok(())
}

fn write_signal(signal: &Signal, out: &mut String) -> Result<(), DbcSaveError> {
    let endian: char = if matches!(signal.endian, Endianness::Intel) {
        '1'
    } else {
        '0'
    };
    let sign_char: char = match signal.sign {
        Signess::Signed => '-',
        Signess::Unsigned => '+',
    };
    let factor = format_f64(signal.factor);
    let offset = format_f64(signal.offset);
    // "[0|0]" is the DBC spelling of an unspecified range
    let min = format_f64(signal.min.unwrap_or(0.0));
    let max = format_f64(signal.max.unwrap_or(0.0));
    let unit = escape_dbc_string(signal.unit.as_deref().unwrap_or(""));

    write_fmt(
        out,
        format_args!(
            " SG_ {} : {}|{}@{}{} ({},{}) [{}|{}] \"{}\" Vector__XXX\n",
            signal.name,
            signal.bit_start,
            signal.bit_length,
            endian,
            sign_char,
            factor,
            offset,
            min,
            max,
            unit
        ),
    )
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

fn escape_dbc_string(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn write_fmt(out: &mut String, args: fmt::Arguments<'_>) -> Result<(), DbcSaveError> {
    out.write_fmt(args).map_err(|_| DbcSaveError::Format)
}
