use crate::Validation::ValidatedPayload;

/// Escapes `<` and `>` only. The rest of the markup-sensitive set is left to
/// the mail client.
pub fn escape_angle_brackets(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// What gets embedded in the outgoing email. `email` is the reply-to
/// address and is never escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<&ValidatedPayload> for SanitizedPayload {
    fn from(payload: &ValidatedPayload) -> Self {
        SanitizedPayload {
            name: escape_angle_brackets(&payload.name),
            email: payload.email.clone(),
            subject: escape_angle_brackets(&payload.subject),
            message: escape_angle_brackets(&payload.message),
        }
    }
}
