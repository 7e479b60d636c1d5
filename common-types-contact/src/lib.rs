use common_types;

pub type E = Box<dyn ::std::error::Error + Send + Sync + 'static>;

mod routes;
mod middleware;
mod cors;
mod validation;
mod sanitize;
mod render;
mod mail;

#[allow(non_snake_case)]
pub mod Routes {
    pub use crate::routes::*;
}

#[allow(non_snake_case)]
pub mod Middleware {
    pub use crate::middleware::*;
}

#[allow(non_snake_case)]
pub mod Cors {
    pub use crate::cors::*;
}

#[allow(non_snake_case)]
pub mod Validation {
    pub use crate::validation::*;
}

#[allow(non_snake_case)]
pub mod Sanitize {
    pub use crate::sanitize::*;
}

#[allow(non_snake_case)]
pub mod Render {
    pub use crate::render::*;
}

#[allow(non_snake_case)]
pub mod Mail {
    pub use crate::mail::*;
}

#[allow(non_snake_case)]
pub mod Response {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use common_types::Contact::{ErrorResponse, ValidationFailedResponse, DispatchFailedResponse};

    pub type ServerResponse = Response;

    pub fn status_response<E: ToString>(status: StatusCode, error: E) -> ServerResponse {
        (status, Json(ErrorResponse { error: error.to_string() })).into_response()
    }

    pub fn internal_server_error<E: ToString>(err: E) -> ServerResponse {
        status_response(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn validation_failed(details: Vec<String>) -> ServerResponse {
        (StatusCode::BAD_REQUEST, Json(ValidationFailedResponse {
            error: "Validation failed".to_string(),
            details,
        })).into_response()
    }

    pub fn dispatch_failed<D: ToString>(details: D) -> ServerResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(DispatchFailedResponse {
            error: "Failed to send message".to_string(),
            details: details.to_string(),
        })).into_response()
    }
}

#[allow(non_snake_case)]
pub mod State {
    use ::std::sync::Arc;
    use crate::{
        Mail::{Mailer, SesMailer},
        Settings::Config,
    };

    pub struct InternalAppState {
        pub config: Config,
        pub mailer: Arc<dyn Mailer>,
    }
    pub type AppState = Arc<InternalAppState>;

    pub async fn make_state() -> Result<AppState, crate::E> {
        tracing::info!("Loading configuration");
        let config = Config::from_env()?;

        /* Create SES client */
        tracing::info!("Setting up SES client in {}", config.region);
        let mailer = SesMailer::new(&config.region).await;

        tracing::info!("Creating AppState");
        Ok(with_parts(config, Arc::new(mailer)))
    }

    pub fn with_parts(config: Config, mailer: Arc<dyn Mailer>) -> AppState {
        Arc::new(InternalAppState {
            config,
            mailer,
        })
    }
}

#[allow(non_snake_case)]
pub mod Settings {
    use axum::http::HeaderValue;
    use thiserror::Error;

    pub const DEFAULT_ALLOWED_ORIGINS: [&'static str; 3] = [
        "https://sushantkumar.dev",
        "https://www.sushantkumar.dev",
        "http://localhost:3000",
    ];
    pub const DEFAULT_REGION: &'static str = "us-east-1";
    pub const REDACTED_PROVIDER_ERROR: &'static str = "The email provider could not deliver the message";

    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum ConfigError {
        #[error("No environment variable for {0}")]
        Missing(&'static str),
        #[error("Invalid value for {0}: {1}")]
        Invalid(&'static str, String),
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Config {
        pub recipient_email: String,
        pub sender_email: String,
        // Never empty, the first entry is the canonical origin
        pub allowed_origins: Vec<String>,
        pub region: String,
        pub redact_provider_errors: bool,
    }

    impl Config {
        pub fn from_env() -> Result<Self, ConfigError> {
            Self::from_lookup(|key| dotenvy::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where
            F: Fn(&str) -> Option<String>,
        {
            let recipient_email = lookup("RECIPIENT_EMAIL")
                .filter(|x| !x.trim().is_empty())
                .ok_or(ConfigError::Missing("RECIPIENT_EMAIL"))?;
            let sender_email = lookup("SENDER_EMAIL")
                .filter(|x| !x.trim().is_empty())
                .ok_or(ConfigError::Missing("SENDER_EMAIL"))?;

            let mut allowed_origins: Vec<String> = match lookup("ALLOWED_ORIGINS") {
                Some(origins) => {
                    tracing::info!("Using custom ALLOWED_ORIGINS: {origins}");
                    origins.split(',')
                        .map(str::trim)
                        .filter(|x| !x.is_empty())
                        .map(str::to_owned)
                        .collect()
                },
                None => DEFAULT_ALLOWED_ORIGINS.iter().map(|x| x.to_string()).collect(),
            };
            if let Some(canonical) = lookup("ALLOWED_ORIGIN").map(|x| x.trim().to_owned()).filter(|x| !x.is_empty()) {
                tracing::info!("Using custom ALLOWED_ORIGIN: {canonical}");
                allowed_origins.retain(|x| *x != canonical);
                allowed_origins.insert(0, canonical);
            }
            if allowed_origins.is_empty() {
                return Err(ConfigError::Invalid("ALLOWED_ORIGINS", "no origins given".to_owned()));
            }
            // Origins are echoed back as header values
            if let Some(bad) = allowed_origins.iter().find(|x| HeaderValue::from_str(x).is_err()) {
                return Err(ConfigError::Invalid("ALLOWED_ORIGINS", bad.clone()));
            }

            let region = match lookup("SES_REGION").or_else(|| lookup("AWS_REGION")) {
                Some(region) => {
                    tracing::info!("Using custom region: {region}");
                    region
                },
                None => DEFAULT_REGION.to_owned(),
            };

            let mut redact_provider_errors = false;
            if let Some(value) = lookup("REDACT_PROVIDER_ERRORS") {
                if let Ok(parsed) = value.parse() {
                    redact_provider_errors = parsed;
                    tracing::info!("Using custom REDACT_PROVIDER_ERRORS: {redact_provider_errors}");
                } else {
                    tracing::info!("Failed to parse REDACT_PROVIDER_ERRORS, using default, {redact_provider_errors}");
                }
            }

            Ok(Config {
                recipient_email,
                sender_email,
                allowed_origins,
                region,
                redact_provider_errors,
            })
        }

        pub fn canonical_origin(&self) -> &str {
            &self.allowed_origins[0]
        }
    }

}
