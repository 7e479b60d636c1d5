use ::std::collections::BTreeMap;
use lazy_static::lazy_static;
use regex::Regex;
use common_types::Contact::{
    Field,
    SubmissionPayload,
    NAME_MIN, NAME_MAX,
    SUBJECT_MIN, SUBJECT_MAX,
    MESSAGE_MIN, MESSAGE_MAX,
};

lazy_static!{
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile EMAIL_SHAPE");
}

/// Only fields that are currently failing have an entry.
pub type FieldErrors = BTreeMap<Field, String>;

fn check_length(value: &str, label: &str, min: usize, max: usize) -> Option<String> {
    let len = value.trim().chars().count();
    if len == 0 {
        Some(format!("{label} is required"))
    } else if len < min {
        Some(format!("{label} must be at least {min} characters"))
    } else if len > max {
        Some(format!("{label} must be at most {max} characters"))
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("Email is required".to_owned())
    } else if !EMAIL_SHAPE.is_match(value) {
        Some("Please enter a valid email address".to_owned())
    } else {
        None
    }
}

pub fn validate_field(fields: &SubmissionPayload, field: Field) -> Option<String> {
    let value = fields.get(field);
    match field {
        Field::Name => check_length(value, "Name", NAME_MIN, NAME_MAX),
        Field::Email => check_email(value),
        Field::Subject => check_length(value, "Subject", SUBJECT_MIN, SUBJECT_MAX),
        Field::Message => check_length(value, "Message", MESSAGE_MIN, MESSAGE_MAX),
    }
}

/// Checks all four fields, every failure is reported.
pub fn validate(fields: &SubmissionPayload) -> FieldErrors {
    Field::ALL.iter()
        .filter_map(|field| validate_field(fields, *field).map(|error| (*field, error)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn valid() -> SubmissionPayload {
        SubmissionPayload {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Engines".to_string(),
            message: "I have some notes on the analytical engine.".to_string(),
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn empty_form_reports_all_required() {
        let errors = validate(&SubmissionPayload::default());
        assert_eq!(errors, FieldErrors::from([
            (Field::Name, "Name is required".to_string()),
            (Field::Email, "Email is required".to_string()),
            (Field::Subject, "Subject is required".to_string()),
            (Field::Message, "Message is required".to_string()),
        ]));
    }

    #[test]
    fn short_and_long_values() {
        let mut fields = valid();
        fields.name = " A ".to_string();
        fields.subject = "s".repeat(201);
        fields.message = "too short".to_string();
        fields.email = "ada@example".to_string();

        assert_eq!(validate(&fields), FieldErrors::from([
            (Field::Name, "Name must be at least 2 characters".to_string()),
            (Field::Email, "Please enter a valid email address".to_string()),
            (Field::Subject, "Subject must be at most 200 characters".to_string()),
            (Field::Message, "Message must be at least 10 characters".to_string()),
        ]));
    }

    #[test]
    fn upper_bounds() {
        let mut fields = valid();
        fields.name = "n".repeat(101);
        fields.message = "m".repeat(5001);
        assert_eq!(validate(&fields), FieldErrors::from([
            (Field::Name, "Name must be at most 100 characters".to_string()),
            (Field::Message, "Message must be at most 5000 characters".to_string()),
        ]));

        fields.name = "n".repeat(100);
        fields.message = "m".repeat(5000);
        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut fields = valid();
        fields.subject = "   \t ".to_string();
        assert_eq!(validate_field(&fields, Field::Subject), Some("Subject is required".to_string()));
    }
}
