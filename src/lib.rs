//! # can_matrix
//!
//! Convert **CAN databases** to spreadsheet-style **CAN matrix** tables and
//! back.
//!
//! ## Highlights
//! - **Matrix codec**: flatten a [`Database`] into a `.csv` table (one row
//!   per signal, grouped by message) and rebuild it losslessly, re-deriving
//!   payload length (DLC) and the extended-frame flag from the rows.
//! - **DBC codec**: load `.dbc` files into a [`Database`] and serialize the
//!   inverse; tolerant line-based parsing, Windows-1252 aware.
//! - **Fail-fast reverse mapping**: a malformed cell aborts the whole file
//!   with a typed error naming the cell, instead of emitting a truncated
//!   database.
//! - **Batch driver**: convert many files into one directory; per-file
//!   failures are logged and counted, never fatal to the batch.
//!
//! Conversions are synchronous and self-contained: each call builds a fresh
//! [`Database`], hands it to the opposite codec, and discards it.

pub mod batch;
pub mod convert;
pub mod dbc;
pub mod matrix;
pub mod types;

// Top-level re-exports (appear under Crate Items → Structs)
#[doc(inline)]
pub use crate::types::{
    database::Database,
    errors::{ConvertError, DbcParseError, DbcSaveError, MatrixParseError, MatrixSaveError},
    message::{IdFormat, Message},
    signal::{Endianness, Signal, Signess},
};

#[doc(inline)]
pub use crate::batch::{BatchSummary, run_dbc_to_matrix, run_matrix_to_dbc};
#[doc(inline)]
pub use crate::convert::{dbc_to_matrix, matrix_to_dbc};
#[doc(inline)]
pub use crate::matrix::{MATRIX_HEADERS, MatrixRow};
