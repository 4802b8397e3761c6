use std::io;
use thiserror::Error;

/// Errors produced while parsing a CAN matrix `.csv` file into a
/// [`Database`](crate::types::database::Database).
///
/// Each failure cause has its own variant so callers can distinguish a
/// header mismatch from a malformed ID cell, a numeric cell, or a layout
/// violation.
#[derive(Debug, Error)]
pub enum MatrixParseError {
    #[error("Not a valid .csv file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Unrecognized table header: expected '{expected}' at column {column}, found '{found}'")]
    Header {
        column: usize,
        expected: &'static str,
        found: String,
    },
    #[error("Invalid 'CAN ID & Message Name' cell: {cell}")]
    MessageCell { cell: String },
    #[error("Invalid '{column}' value '{value}' at row {row}")]
    NumericCell {
        column: &'static str,
        value: String,
        row: usize,
    },
    #[error("Signal '{signal}' in message '{message}' has zero bit length")]
    ZeroBitLength { message: String, signal: String },
    #[error(
        "Signal '{signal}' does not fit message '{message}': end bit = {end}, frame holds {total_bits} bits"
    )]
    SignalOutOfBounds {
        message: String,
        signal: String,
        end: u32,
        total_bits: u32,
    },
}

/// Errors produced while saving a [`Database`](crate::types::database::Database)
/// into a CAN matrix `.csv` file.
#[derive(Debug, Error)]
pub enum MatrixSaveError {
    #[error("Output path must end in .csv: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to create directories for '{path}'. \nError: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create '{path}'. \nError: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while writing '{path}'. \nError: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Errors produced while parsing a `.dbc` file.
#[derive(Debug, Error)]
pub enum DbcParseError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Errors produced while saving a [`Database`](crate::types::database::Database)
/// into a `.dbc` file.
#[derive(Debug, Error)]
pub enum DbcSaveError {
    #[error("Output path must end in .dbc: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to create directories for '{path}'. \nError: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create '{path}'. \nError: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while writing '{path}'. \nError: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to format DBC content")]
    Format,
}

/// Errors returned by the single-file conversion entry points and the batch
/// driver. Wraps the codec errors transparently so their messages surface
/// unchanged.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    MatrixParse(#[from] MatrixParseError),
    #[error(transparent)]
    MatrixSave(#[from] MatrixSaveError),
    #[error(transparent)]
    DbcParse(#[from] DbcParseError),
    #[error(transparent)]
    DbcSave(#[from] DbcSaveError),
    #[error("Failed to create output directory '{path}'. \nError: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: io::Error,
    },
}
