use common_types::Contact::EMAIL_SUBJECT_TAG;

use crate::{
    Sanitize::SanitizedPayload,
    Settings::Config,
};

const FOOTER: &'static str = "Sent from Neo-Terminal Portfolio";

const STYLE: &'static str = "\
body{font-family:'Courier New',monospace;background:#1a1d23;color:#e4e6eb;padding:20px}
.container{max-width:600px;margin:0 auto;background:#262a33;border:1px solid #2d3139;border-radius:8px;padding:30px}
.header{color:#00d9ff;font-size:24px;margin-bottom:20px;border-bottom:2px solid #00d9ff;padding-bottom:10px}
.field{margin-bottom:15px}
.label{color:#00ff85;font-weight:bold;margin-bottom:5px}
.value{color:#e4e6eb;padding:10px;background:#1a1d23;border-left:3px solid #00d9ff;margin-top:5px}
.footer{margin-top:30px;padding-top:20px;border-top:1px solid #2d3139;color:#9ca3af;font-size:12px}";

/// One message for the provider: a single recipient and a single reply-to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn render_email(config: &Config, payload: &SanitizedPayload) -> OutboundEmail {
    OutboundEmail {
        from: config.sender_email.clone(),
        to: config.recipient_email.clone(),
        reply_to: payload.email.clone(),
        subject: format!("{EMAIL_SUBJECT_TAG} {}", payload.subject),
        html: render_html(payload),
        text: render_text(payload),
    }
}

fn render_html(payload: &SanitizedPayload) -> String {
    let field = |label: &str, value: &str| {
        format!(r#"<div class="field"><div class="label">› {label}:</div><div class="value">{value}</div></div>"#)
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n<div class=\"container\">\n\
<div class=\"header\">📬 New Contact Form Submission</div>\n{}\n{}\n{}\n{}\n\
<div class=\"footer\">{FOOTER}</div>\n</div>\n</body>\n</html>\n",
        field("From", &payload.name),
        field("Email", &payload.email),
        field("Subject", &payload.subject),
        field("Message", &payload.message.replace('\n', "<br>")),
    )
}

fn render_text(payload: &SanitizedPayload) -> String {
    format!(
        "NEW CONTACT FORM SUBMISSION\n\nFrom: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}\n\n---\n{FOOTER}\n",
        payload.name,
        payload.email,
        payload.subject,
        payload.message,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn config() -> Config {
        Config {
            recipient_email: "me@example.com".to_string(),
            sender_email: "noreply@example.com".to_string(),
            allowed_origins: vec!["https://sushantkumar.dev".to_string()],
            region: "us-east-1".to_string(),
            redact_provider_errors: false,
        }
    }

    fn payload() -> SanitizedPayload {
        SanitizedPayload {
            name: "Ada &lt;script&gt;".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Engines".to_string(),
            message: "Line one\nLine two".to_string(),
        }
    }

    #[test]
    fn addresses_and_subject() {
        let email = render_email(&config(), &payload());
        assert_eq!(email.from, "noreply@example.com");
        assert_eq!(email.to, "me@example.com");
        assert_eq!(email.reply_to, "ada@example.com");
        assert_eq!(email.subject, "[Portfolio Contact] Engines");
    }

    #[test]
    fn text_body_layout() {
        let email = render_email(&config(), &payload());
        assert_eq!(
            email.text,
            "NEW CONTACT FORM SUBMISSION\n\nFrom: Ada &lt;script&gt;\nEmail: ada@example.com\nSubject: Engines\n\nMessage:\nLine one\nLine two\n\n---\nSent from Neo-Terminal Portfolio\n"
        );
    }

    #[test]
    fn html_body_breaks_lines_and_keeps_escapes() {
        let email = render_email(&config(), &payload());
        assert!(email.html.contains(r#"<div class="value">Line one<br>Line two</div>"#));
        assert!(email.html.contains(r#"<div class="value">Ada &lt;script&gt;</div>"#));
        assert!(email.html.contains(r#"<div class="value">ada@example.com</div>"#));
        assert!(!email.html.contains("<script>"));
        assert!(email.html.starts_with("<!DOCTYPE html>"));
    }
}
