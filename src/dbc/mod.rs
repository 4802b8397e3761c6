//! # dbc
//!
//! `dbc` is the module to work with `.dbc` files: the textual CAN database
//! interchange format sitting on the [`Database`](crate::Database) boundary.
//! It carries exactly the fields the matrix schema needs (version, messages,
//! signals) and tolerantly skips every other DBC section.

pub(crate) mod core;
pub mod parse;
pub mod save;

pub use parse::from_file;
pub use save::save_to_file;
