#[allow(non_snake_case)]
pub mod Contact {
    use ::std::fmt;
    use ::std::str;
    use serde::{Deserialize, Serialize};

    // Limits are counted in chars, after trimming surrounding whitespace
    pub const NAME_MIN: usize = 2;
    pub const NAME_MAX: usize = 100;
    pub const SUBJECT_MIN: usize = 3;
    pub const SUBJECT_MAX: usize = 200;
    pub const MESSAGE_MIN: usize = 10;
    pub const MESSAGE_MAX: usize = 5000;
    // Only used for the character counter shown under the message box
    pub const MESSAGE_SOFT_CAP: usize = 1000;

    pub const EMAIL_SUBJECT_TAG: &'static str = "[Portfolio Contact]";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Field {
        Name,
        Email,
        Subject,
        Message,
    }

    impl Field {
        pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

        pub fn as_str(&self) -> &'static str {
            match self {
                Field::Name => "name",
                Field::Email => "email",
                Field::Subject => "subject",
                Field::Message => "message",
            }
        }
    }

    impl fmt::Display for Field {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl str::FromStr for Field {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "name" => Ok(Field::Name),
                "email" => Ok(Field::Email),
                "subject" => Ok(Field::Subject),
                "message" => Ok(Field::Message),
                _ => Err(format!("'{}' is not a valid contact form field", s)),
            }
        }
    }

    /// Body of `POST <endpoint>`
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
    pub struct SubmissionPayload {
        pub name: String,
        pub email: String,
        pub subject: String,
        pub message: String,
    }

    impl SubmissionPayload {
        pub fn get(&self, field: Field) -> &str {
            match field {
                Field::Name => &self.name,
                Field::Email => &self.email,
                Field::Subject => &self.subject,
                Field::Message => &self.message,
            }
        }

        pub fn get_mut(&mut self, field: Field) -> &mut String {
            match field {
                Field::Name => &mut self.name,
                Field::Email => &mut self.email,
                Field::Subject => &mut self.subject,
                Field::Message => &mut self.message,
            }
        }
    }

    // 200
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
    pub struct SentResponse {
        pub message: String,
        #[serde(rename="messageId")]
        pub message_id: String,
    }

    // 400
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
    pub struct ValidationFailedResponse {
        pub error: String,
        pub details: Vec<String>,
    }

    // 405, and any other bare error
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
    pub struct ErrorResponse {
        pub error: String,
    }

    // 500
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
    pub struct DispatchFailedResponse {
        pub error: String,
        pub details: String,
    }

    // OPTIONS
    #[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
    pub struct PreflightResponse {
        pub message: String,
    }
}
