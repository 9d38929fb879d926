use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Dataset, EMAIL};

/// Something shaped like `local@domain.tld`, found anywhere in the field.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+\.[A-Za-z]+\b").expect("valid email regex")
});

/// Whether `candidate` contains a plausible email address.
///
/// This is an unanchored search: surrounding text does not disqualify it.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

/// Return a copy of the table keeping only rows with a valid `email`.
///
/// Rows with a null or non-text email are dropped. Surviving rows keep their
/// relative order and are renumbered from 0; `dataset` itself is untouched.
pub fn remove_rows_without_mail(dataset: &Dataset) -> Dataset {
    let keep: Vec<usize> = dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.get(EMAIL).as_str().is_some_and(is_valid_email))
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "Email filter kept {} of {} participants",
        keep.len(),
        dataset.len()
    );
    dataset.select(&keep)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::model::CellValue;
    use crate::data::test_support::{dataset, participant};

    fn with_email(email: serde_json::Value, q1: i64) -> serde_json::Value {
        participant(
            json!(30),
            "F",
            email,
            [json!(q1), json!(1), json!(1), json!(1), json!(1)],
        )
    }

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("A_B%c+d-e@my-host.ORG"));
        assert!(is_valid_email("x@y.z"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("john.example.com"));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@.com"));
        assert!(!is_valid_email("john@example.123"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn matches_anywhere_in_the_field() {
        assert!(is_valid_email("mail: john@example.com please"));
        assert!(is_valid_email("john@sub.example.com"));
    }

    #[test]
    fn drops_invalid_and_null_emails_and_renumbers() {
        let ds = dataset(vec![
            with_email(json!("bad.address"), 0),
            with_email(json!("ann@example.com"), 1),
            with_email(json!(null), 2),
            with_email(json!("bob@example.org"), 3),
            with_email(json!(42), 4),
        ]);

        let cleaned = remove_rows_without_mail(&ds);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned.rows[0].get("q1"), &CellValue::Integer(1));
        assert_eq!(cleaned.rows[1].get("q1"), &CellValue::Integer(3));
        assert_eq!(cleaned.column_names, ds.column_names);

        // The source table is not modified.
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let ds = dataset(vec![
            with_email(json!("ann@example.com"), 1),
            with_email(json!("nope"), 2),
            with_email(json!("bob@example.org"), 3),
        ]);
        let once = remove_rows_without_mail(&ds);
        let twice = remove_rows_without_mail(&once);
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 2);
    }
}
