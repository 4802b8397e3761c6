//! Shared data model: [`Database`], [`Message`], [`Signal`] and the error
//! types of every codec. Pure containers; construction never fails and all
//! validation lives in the codecs that build instances.

pub mod database;
pub mod errors;
pub mod message;
pub mod signal;

pub use database::Database;
pub use errors::{ConvertError, DbcParseError, DbcSaveError, MatrixParseError, MatrixSaveError};
pub use message::{IdFormat, Message};
pub use signal::{Endianness, Signal, Signess};
