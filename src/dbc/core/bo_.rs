use crate::types::database::Database;
use crate::types::message::{IdFormat, Message};

const CAN_SFF_MASK: u32 = 0x7FF; // 11 bit
const CAN_EFF_MASK: u32 = 0x1FFF_FFFF; // 29 bit
const CAN_EFF_FLAG: u32 = 0x8000_0000; // "extended" flag, SocketCAN style

/// Decode a `BO_` line and open a new message; following `SG_` lines attach
/// to it.
/// Example: `BO_ 2364540158 EEC1: 8 Vector__XXX`
pub(crate) fn decode(db: &mut Database, line: &str) {
    // BO_ <ID> <MESSAGE_NAME>: <BYTE_LENGTH> <SENDER_NODE>
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.len() < 4 {
        // Too short lines are not considered.
        return;
    }

    let Ok(raw) = parts[1].parse::<u32>() else {
        return;
    };
    let id: u32 = raw & CAN_EFF_MASK;
    // Extended if the flag bit is set OR the value does not fit 11 bits
    let id_format: IdFormat = if (raw & CAN_EFF_FLAG) != 0 || id > CAN_SFF_MASK {
        IdFormat::Extended
    } else {
        IdFormat::Standard
    };

    let name: String = parts[2].trim_end_matches(':').to_string();
    if name.is_empty() {
        return;
    }
    let byte_length: u16 = parts[3].parse().unwrap_or(0);

    db.add_message(Message {
        id_format,
        id,
        name,
        byte_length,
        signals: Vec::new(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_standard() {
        let mut db: Database = Database::default();
        // Example Line
        decode(&mut db, "BO_ 256 Engine: 8 Gateway");

        assert_eq!(db.messages.len(), 1);
        let msg: &Message = &db.messages[0];
        assert_eq!(msg.id, 256);
        assert_eq!(msg.name, "Engine");
        assert_eq!(msg.byte_length, 8);
        assert_eq!(msg.id_format, IdFormat::Standard);
    }

    #[test]
    fn test_decode_extended_flag() {
        let mut db: Database = Database::default();
        // 0x8CF004FE = flag | 0x0CF004FE
        decode(&mut db, "BO_ 2364540158 EEC1: 8 Vector__XXX");

        let msg: &Message = &db.messages[0];
        assert_eq!(msg.id, 0x0CF0_04FE);
        assert_eq!(msg.id_format, IdFormat::Extended);
    }

    #[test]
    fn test_decode_skips_malformed() {
        let mut db: Database = Database::default();
        decode(&mut db, "BO_ garbage Engine: 8 Gateway");
        decode(&mut db, "BO_ 256");
        assert!(db.messages.is_empty());
    }
}
