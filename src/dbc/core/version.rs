use crate::types::database::Database;

pub(crate) fn decode(db: &mut Database, line: &str) {
    // Example: VERSION "1.0"
    db.version = line
        .trim_start()
        .strip_prefix("VERSION")
        .unwrap_or("")
        .trim()
        .trim_matches('"')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let mut db: Database = Database::default();
        // Example Line
        decode(&mut db, r#"VERSION "1.0.2""#);
        assert_eq!(db.version, "1.0.2");
    }

    #[test]
    fn test_decode_empty() {
        let mut db: Database = Database::default();
        decode(&mut db, r#"VERSION """#);
        assert_eq!(db.version, "");
    }
}
