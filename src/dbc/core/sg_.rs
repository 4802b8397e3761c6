use crate::types::database::Database;
use crate::types::signal::{Endianness, Signal, Signess};

/// Decode a `SG_` line belonging to the **current message** (the last parsed BO_).
/// Format (typical):
/// SG_ <name> [M|mX]: <bit_start>|<bit_length>@<endian><sign> (<factor>,<offset>) [<min>|<max>] "<unit>" <receivers...>
///
/// Multiplexer tags and receiver nodes are outside the model and ignored.
pub(crate) fn decode(db: &mut Database, line: &str) {
    if db.messages.is_empty() {
        return;
    }

    let line: &str = line.trim_start().trim_end_matches(';');
    let mut split_colon = line.splitn(2, ':');
    let left: &str = split_colon.next().unwrap_or("").trim(); // "SG_ NAME [M|mX]"
    let right: &str = split_colon.next().unwrap_or("").trim();

    // Left part analysis: SG_ NAME [M|mX]
    let mut left_it = left.split_ascii_whitespace();
    let _sg: &str = left_it.next().unwrap_or(""); // "SG_"
    let name: String = left_it.next().unwrap_or("").to_string();
    if name.is_empty() {
        return;
    }

    // Right part analysis: <bit_start>|<bit_length>@<endian><sign> (<factor>,<offset>) [<min>|<max>] "<unit>" <receivers...>
    let mut it = right.split_ascii_whitespace();

    // 1) bit info: "0|16@1+"
    let bit_info: &str = it.next().unwrap_or("");
    let mut bit_and_rest = bit_info.split('@');
    let bit_pos_len: &str = bit_and_rest.next().unwrap_or(""); // "0|16"
    let es: &str = bit_and_rest.next().unwrap_or(""); // "1+"
    let mut pos_len = bit_pos_len.split('|');
    let bit_start: u16 = pos_len.next().unwrap_or("0").parse().unwrap_or(0);
    let bit_length: u16 = pos_len.next().unwrap_or("0").parse().unwrap_or(0);
    let endian: Endianness = if es.starts_with('0') {
        Endianness::Motorola
    } else {
        Endianness::Intel
    };
    let sign: Signess = if es.chars().nth(1) == Some('-') {
        Signess::Signed
    } else {
        Signess::Unsigned
    };

    // 2) "(factor,offset)"
    let mut factor: f64 = 1.0;
    let mut offset: f64 = 0.0;
    if let Some(paren) = it.next()
        && paren.starts_with('(')
    {
        let mut acc = String::from(paren);
        // Might be split across tokens; gather until ')'
        while !acc.ends_with(')') {
            if let Some(tok) = it.next() {
                acc.push(' ');
                acc.push_str(tok);
            } else {
                break;
            }
        }
        let inner: &str = acc.trim_start_matches('(').trim_end_matches(')');
        let mut nums = inner.split(',').map(|s| s.trim());
        factor = nums.next().unwrap_or("1").parse().unwrap_or(1.0);
        offset = nums.next().unwrap_or("0").parse().unwrap_or(0.0);
    }

    // 3) "[min|max]"
    let mut min_raw: f64 = 0.0;
    let mut max_raw: f64 = 0.0;
    let bounds_token: &str = it.next().unwrap_or("");
    let (mut seen_bounds, mut next_tok_cache) = (false, String::new());
    if bounds_token.starts_with('[') && bounds_token.contains('|') {
        seen_bounds = true;
        let mut b = String::from(bounds_token);
        while !b.ends_with(']') {
            if let Some(tok) = it.next() {
                b.push(' ');
                b.push_str(tok);
            } else {
                break;
            }
        }
        let inner: &str = b.trim_start_matches('[').trim_end_matches(']');
        let mut nums = inner.split('|').map(|s| s.trim());
        min_raw = nums.next().unwrap_or("0").parse().unwrap_or(0.0);
        max_raw = nums.next().unwrap_or("0").parse().unwrap_or(0.0);
    } else {
        next_tok_cache = bounds_token.to_string();
    }
    // DBC writes "[0|0]" for an unspecified range
    let (min, max) = if min_raw == 0.0 && max_raw == 0.0 {
        (None, None)
    } else {
        (Some(min_raw), Some(max_raw))
    };

    // 4) "unit"
    let unit_token: Option<&str> = if seen_bounds {
        it.next()
    } else {
        Some(next_tok_cache.as_str())
    };
    let unit_raw: &str = unit_token.unwrap_or("").trim();
    let unit: Option<String> = if unit_raw.starts_with('"') {
        // gather full quoted token
        let mut acc: String = String::from(unit_raw);
        while !(acc.len() > 1 && acc.ends_with('"')) {
            if let Some(tok) = it.next() {
                acc.push(' ');
                acc.push_str(tok);
            } else {
                break;
            }
        }
        let inner: &str = acc.trim_matches('"');
        if inner.is_empty() {
            None
        } else {
            Some(inner.to_string())
        }
    } else {
        None
    };

    // receivers (rest of `it`) are ignored

    if let Some(msg) = db.messages.last_mut() {
        msg.signals.push(Signal {
            name,
            bit_start,
            bit_length,
            endian,
            sign,
            factor,
            offset,
            min,
            max,
            unit,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::Message;

    fn db_with_message() -> Database {
        let mut db: Database = Database::default();
        db.add_message(Message {
            id: 0x100,
            name: "Engine".to_string(),
            byte_length: 8,
            ..Default::default()
        });
        db
    }

    #[test]
    fn test_decode_full_line() {
        let mut db: Database = db_with_message();
        // Example Line
        decode(
            &mut db,
            r#" SG_ RPM : 0|16@1+ (0.25,0) [0|8000] "rpm" Gateway"#,
        );

        let sig: &Signal = &db.messages[0].signals[0];
        assert_eq!(sig.name, "RPM");
        assert_eq!(sig.bit_start, 0);
        assert_eq!(sig.bit_length, 16);
        assert_eq!(sig.endian, Endianness::Intel);
        assert_eq!(sig.sign, Signess::Unsigned);
        assert_eq!(sig.factor, 0.25);
        assert_eq!(sig.offset, 0.0);
        assert_eq!(sig.min, Some(0.0));
        assert_eq!(sig.max, Some(8000.0));
        assert_eq!(sig.unit.as_deref(), Some("rpm"));
    }

    #[test]
    fn test_decode_motorola_signed() {
        let mut db: Database = db_with_message();
        decode(
            &mut db,
            r#" SG_ Temp : 7|8@0- (1,-40) [-40|215] "degC" Vector__XXX"#,
        );

        let sig: &Signal = &db.messages[0].signals[0];
        assert_eq!(sig.endian, Endianness::Motorola);
        assert_eq!(sig.sign, Signess::Signed);
        assert_eq!(sig.offset, -40.0);
        assert_eq!(sig.min, Some(-40.0));
        assert_eq!(sig.max, Some(215.0));
    }

    #[test]
    fn test_decode_unspecified_range_and_unit() {
        let mut db: Database = db_with_message();
        decode(&mut db, r#" SG_ Counter : 0|4@1+ (1,0) [0|0] "" Vector__XXX"#);

        let sig: &Signal = &db.messages[0].signals[0];
        assert_eq!(sig.min, None);
        assert_eq!(sig.max, None);
        assert_eq!(sig.unit, None);
    }

    #[test]
    fn test_decode_ignores_mux_tag() {
        let mut db: Database = db_with_message();
        decode(&mut db, r#" SG_ Mode M : 0|2@1+ (1,0) [0|3] "" Vector__XXX"#);

        let sig: &Signal = &db.messages[0].signals[0];
        assert_eq!(sig.name, "Mode");
        assert_eq!(sig.bit_length, 2);
    }

    #[test]
    fn test_decode_without_message_is_noop() {
        let mut db: Database = Database::default();
        decode(&mut db, r#" SG_ RPM : 0|16@1+ (0.25,0) [0|8000] "rpm" X"#);
        assert!(db.messages.is_empty());
    }
}
