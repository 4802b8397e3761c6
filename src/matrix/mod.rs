//! # matrix
//!
//! `matrix` is the module to work with CAN matrix tables: spreadsheet-style
//! `.csv` files with one row per signal, grouped by message.
//!
//! The forward mapping ([`save`]) flattens a [`Database`](crate::Database)
//! into rows; the reverse mapping ([`parse`]) rebuilds a database from rows,
//! validating the header and every cell, and re-deriving the fields the
//! table does not store (payload length, extended-frame classification).

pub(crate) mod core;
pub mod parse;
pub mod save;

pub use self::core::header::MATRIX_HEADERS;
pub use self::core::layout::{check_signal_fits, derive_byte_length, id_format_for};
pub use self::core::row::MatrixRow;
pub use parse::{database_from_records, from_file};
pub use save::{matrix_rows, save_to_file};
