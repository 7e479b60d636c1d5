use garde::Validate;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use common_types::Contact::{
    NAME_MIN, NAME_MAX,
    SUBJECT_MIN, SUBJECT_MAX,
    MESSAGE_MIN, MESSAGE_MAX,
};

lazy_static!{
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile EMAIL_SHAPE");
}

pub const NAME_ERROR: &'static str = "Name must be 2-100 characters";
pub const EMAIL_ERROR: &'static str = "Valid email required";
pub const SUBJECT_ERROR: &'static str = "Subject must be 3-200 characters";
pub const MESSAGE_ERROR: &'static str = "Message must be 10-5000 characters";

/// The request body as it arrived. Any field can be missing or of the wrong
/// JSON type, both of which show up as `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Validate)]
pub struct RequestPayload {
    #[garde(custom(name_rule))]
    pub name: Option<String>,
    #[garde(custom(email_rule))]
    pub email: Option<String>,
    #[garde(custom(subject_rule))]
    pub subject: Option<String>,
    #[garde(custom(message_rule))]
    pub message: Option<String>,
}

/// Passed validation. Name, subject and message are trimmed, email is kept as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl RequestPayload {
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(err) => {
                tracing::info!("Body is not valid JSON, treating as empty: {err}");
                Self::default()
            },
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        RequestPayload {
            name: field("name"),
            email: field("email"),
            subject: field("subject"),
            message: field("message"),
        }
    }

    /// Every violated constraint is reported, in field order.
    pub fn into_validated(self) -> Result<ValidatedPayload, Vec<String>> {
        if let Err(report) = self.validate(&()) {
            return Err(report.iter().map(|(_, error)| error.to_string()).collect());
        }
        Ok(ValidatedPayload {
            name: self.name.unwrap_or_default().trim().to_owned(),
            email: self.email.unwrap_or_default(),
            subject: self.subject.unwrap_or_default().trim().to_owned(),
            message: self.message.unwrap_or_default().trim().to_owned(),
        })
    }
}

fn trimmed_len_within(value: &Option<String>, min: usize, max: usize) -> bool {
    match value {
        Some(value) => (min..=max).contains(&value.trim().chars().count()),
        None => false,
    }
}

fn name_rule(value: &Option<String>, _: &()) -> garde::Result {
    if trimmed_len_within(value, NAME_MIN, NAME_MAX) { Ok(()) } else { Err(garde::Error::new(NAME_ERROR)) }
}

fn email_rule(value: &Option<String>, _: &()) -> garde::Result {
    match value {
        Some(value) if EMAIL_SHAPE.is_match(value) => Ok(()),
        _ => Err(garde::Error::new(EMAIL_ERROR)),
    }
}

fn subject_rule(value: &Option<String>, _: &()) -> garde::Result {
    if trimmed_len_within(value, SUBJECT_MIN, SUBJECT_MAX) { Ok(()) } else { Err(garde::Error::new(SUBJECT_ERROR)) }
}

fn message_rule(value: &Option<String>, _: &()) -> garde::Result {
    if trimmed_len_within(value, MESSAGE_MIN, MESSAGE_MAX) { Ok(()) } else { Err(garde::Error::new(MESSAGE_ERROR)) }
}
