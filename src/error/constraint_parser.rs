use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// Constraint names follow PostgreSQL's default pattern
/// `<table>_<column>_<suffix>`, which is enough to recover the violated
/// column; the `Key (column)=(value)` detail line serves as a fallback when
/// the driver does not report a constraint name.
pub struct ConstraintParser;

/// Compiled "Key (field)=(value)" pattern, cached for reuse
static KEY_VALUE_PATTERN: OnceLock<Regex> = OnceLock::new();

impl ConstraintParser {
    fn key_value_pattern() -> &'static Regex {
        KEY_VALUE_PATTERN.get_or_init(|| Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap())
    }

    /// Parses a unique or index constraint name to extract table and column.
    ///
    /// Handles common PostgreSQL constraint naming patterns:
    /// - "turns_date_key" -> ("turns", "date")
    /// - "clients_email_idx" -> ("clients", "email")
    ///
    /// # Arguments
    /// * `constraint_name` - The constraint name to parse
    ///
    /// # Returns
    /// Optional tuple of (table, column) if parsing succeeds
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let trimmed = constraint_name
            .strip_suffix("_key")
            .or_else(|| constraint_name.strip_suffix("_idx"))?;
        let parts: Vec<&str> = trimmed.split('_').collect();
        if parts.len() >= 2 {
            // Multi-part column names keep their underscores
            Some((parts[0].to_string(), parts[1..].join("_")))
        } else {
            None
        }
    }

    /// Parses a foreign key constraint name to extract table and column.
    ///
    /// Handles patterns like "turns_service_id_fkey" -> ("turns", "service_id")
    ///
    /// # Arguments
    /// * `constraint_name` - The foreign key constraint name to parse
    ///
    /// # Returns
    /// Optional tuple of (table, column) if parsing succeeds
    pub fn parse_foreign_key_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let trimmed = constraint_name.strip_suffix("_fkey")?;
        let parts: Vec<&str> = trimmed.split('_').collect();
        if parts.len() >= 2 {
            Some((parts[0].to_string(), parts[1..].join("_")))
        } else {
            None
        }
    }

    /// Extracts the key-value pair from a database error message.
    ///
    /// Looks for the "Key (field)=(value)" detail line PostgreSQL appends to
    /// constraint violation messages.
    ///
    /// # Arguments
    /// * `message` - The database error message
    ///
    /// # Returns
    /// Optional tuple of (field, value) if found
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::key_value_pattern().captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint_name() {
        let result = ConstraintParser::parse_constraint_name("turns_date_key");
        assert_eq!(result, Some(("turns".to_string(), "date".to_string())));

        let result = ConstraintParser::parse_constraint_name("clients_email_idx");
        assert_eq!(result, Some(("clients".to_string(), "email".to_string())));

        let result = ConstraintParser::parse_constraint_name("turns_date_fkey");
        assert_eq!(result, None);

        let result = ConstraintParser::parse_constraint_name("invalid_key");
        assert_eq!(result, None);
    }

    #[test]
    fn test_parse_foreign_key_constraint_name() {
        let result = ConstraintParser::parse_foreign_key_constraint_name("turns_service_id_fkey");
        assert_eq!(result, Some(("turns".to_string(), "service_id".to_string())));

        let result = ConstraintParser::parse_foreign_key_constraint_name("turns_client_id_fkey");
        assert_eq!(result, Some(("turns".to_string(), "client_id".to_string())));

        let result = ConstraintParser::parse_foreign_key_constraint_name("not_a_foreign_key");
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_key_value_from_message() {
        let message = "duplicate key value violates unique constraint \"turns_date_key\"\nDETAIL: Key (date)=(2030-05-01 10:00:00+00) already exists.";
        let result = ConstraintParser::extract_key_value_from_message(message);
        assert_eq!(
            result,
            Some(("date".to_string(), "2030-05-01 10:00:00+00".to_string()))
        );

        let message = "Key (client_id)=(123) is not present in table \"clients\"";
        let result = ConstraintParser::extract_key_value_from_message(message);
        assert_eq!(result, Some(("client_id".to_string(), "123".to_string())));

        let message = "no key detail in this message";
        let result = ConstraintParser::extract_key_value_from_message(message);
        assert_eq!(result, None);
    }

    #[test]
    fn test_pattern_caching() {
        let pattern1 = ConstraintParser::key_value_pattern();
        let pattern2 = ConstraintParser::key_value_pattern();

        assert!(std::ptr::eq(pattern1, pattern2));
    }
}
