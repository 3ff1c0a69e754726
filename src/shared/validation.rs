use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for territory codes (group, area, zone, segmentation, IUP)
    /// Uppercase alphanumeric segments separated by single hyphens or dots
    /// - Valid: "KAL", "KAL-01", "SUM.02.A"
    /// - Invalid: "-KAL", "KAL-", "kal", "KAL--01", "KAL 01"
    pub static ref TERRITORY_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z0-9]+(?:[-.][A-Z0-9]+)*$").unwrap();

    /// Regex for quotation numbers: uppercase segments joined by '-', '/' or '.'
    /// - Valid: "QT-001", "QT/2024/001"
    /// - Invalid: "qt-001", "QT//001", "/QT"
    pub static ref QUOTATION_NO_REGEX: Regex =
        Regex::new(r"^[A-Z0-9]+(?:[-/.][A-Z0-9]+)*$").unwrap();

    /// Characters that cannot appear in a downloaded file name
    pub static ref UNSAFE_FILE_CHARS: Regex = Regex::new(r#"[\\/:*?"<>|\s]+"#).unwrap();
}

/// Required-field rule for `validator`: rejects empty or whitespace-only text
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::from("This field is required"))
        );
    }
    Ok(())
}

/// Rule for optional territory codes
pub fn territory_code(value: &str) -> Result<(), ValidationError> {
    if !TERRITORY_CODE_REGEX.is_match(value) {
        return Err(ValidationError::new("territory_code").with_message(Cow::from(
            "Code must be uppercase letters or digits separated by '-' or '.'",
        )));
    }
    Ok(())
}

/// Rule for quotation numbers
pub fn quotation_no(value: &str) -> Result<(), ValidationError> {
    if !QUOTATION_NO_REGEX.is_match(value.trim()) {
        return Err(ValidationError::new("quotation_no").with_message(Cow::from(
            "Quotation number must be uppercase letters or digits separated by '-', '/' or '.'",
        )));
    }
    Ok(())
}

/// Normalized form used for duplicate-name comparisons
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether `candidate` collides with a name in `existing`.
///
/// Comparison is trimmed and case-insensitive. The entry whose id equals
/// `exclude_id` (the record being edited) is skipped. Only the rows passed in
/// are checked, so callers decide what "existing" covers.
pub fn is_duplicate_name<'a, I>(existing: I, candidate: &str, exclude_id: Option<&str>) -> bool
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let wanted = normalize_name(candidate);
    if wanted.is_empty() {
        return false;
    }

    existing.into_iter().any(|(id, name)| {
        exclude_id != Some(id) && name.is_some_and(|n| normalize_name(n) == wanted)
    })
}

/// Replace characters that are unsafe in file names with `-`
pub fn sanitize_file_component(raw: &str) -> String {
    let cleaned = UNSAFE_FILE_CHARS.replace_all(raw.trim(), "-");
    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_territory_code_regex_valid() {
        assert!(TERRITORY_CODE_REGEX.is_match("KAL"));
        assert!(TERRITORY_CODE_REGEX.is_match("KAL-01"));
        assert!(TERRITORY_CODE_REGEX.is_match("SUM.02.A"));
        assert!(TERRITORY_CODE_REGEX.is_match("7"));
    }

    #[test]
    fn test_territory_code_regex_invalid() {
        assert!(!TERRITORY_CODE_REGEX.is_match("-KAL")); // starts with hyphen
        assert!(!TERRITORY_CODE_REGEX.is_match("KAL-")); // ends with hyphen
        assert!(!TERRITORY_CODE_REGEX.is_match("KAL--01")); // double separator
        assert!(!TERRITORY_CODE_REGEX.is_match("kal")); // lowercase
        assert!(!TERRITORY_CODE_REGEX.is_match("KAL 01")); // space
        assert!(!TERRITORY_CODE_REGEX.is_match(""));
    }

    #[test]
    fn test_quotation_no() {
        assert!(quotation_no("QT/2024/001").is_ok());
        assert!(quotation_no("QT-001").is_ok());
        assert!(quotation_no("qt-001").is_err());
        assert!(quotation_no("QT//001").is_err());
        assert!(quotation_no("").is_err());
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive_and_trimmed() {
        let rows = [("1", Some("Acme")), ("2", Some("Borneo Steel"))];
        assert!(is_duplicate_name(rows, "  acme ", None));
        assert!(is_duplicate_name(rows, "BORNEO STEEL", None));
        assert!(!is_duplicate_name(rows, "Acme Corp", None));
    }

    #[test]
    fn test_duplicate_name_skips_record_being_edited() {
        let rows = [("1", Some("Acme")), ("2", None)];
        assert!(!is_duplicate_name(rows, "ACME", Some("1")));
        assert!(is_duplicate_name(rows, "ACME", Some("2")));
        assert!(!is_duplicate_name(rows, "   ", None));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Java").is_ok());
        assert!(not_blank("  ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_sanitize_file_component() {
        assert_eq!(sanitize_file_component("QT/2024/001"), "QT-2024-001");
        assert_eq!(sanitize_file_component("  "), "untitled");
        assert_eq!(sanitize_file_component("A B:C"), "A-B-C");
    }
}
