use axum::http::header::HeaderValue;

use crate::Settings::Config;

pub const ALLOW_HEADERS: &'static str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const ALLOW_METHODS: &'static str = "POST,OPTIONS";
pub const MAX_AGE_SECS: &'static str = "86400";

/// Which origin a response advertises in `Access-Control-Allow-Origin`.
///
/// Origins outside the allow-list are not rejected, they get the canonical
/// origin instead, which the browser will then refuse to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsDecision {
    pub allow_origin: String,
    pub matched: bool,
}

impl CorsDecision {
    pub fn resolve(config: &Config, origin: Option<&str>) -> Self {
        match origin {
            Some(origin) if config.allowed_origins.iter().any(|x| x == origin) => CorsDecision {
                allow_origin: origin.to_owned(),
                matched: true,
            },
            _ => CorsDecision {
                allow_origin: config.canonical_origin().to_owned(),
                matched: false,
            },
        }
    }

    pub fn allow_origin_header(&self) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.allow_origin)
    }
}
