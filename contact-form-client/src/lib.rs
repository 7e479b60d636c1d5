use common_types;

mod controller;
mod transport;
mod validation;

#[allow(non_snake_case)]
pub mod Controller {
    pub use crate::controller::*;
}

#[allow(non_snake_case)]
pub mod Transport {
    pub use crate::transport::*;
}

#[allow(non_snake_case)]
pub mod Validation {
    pub use crate::validation::*;
}

#[allow(non_snake_case)]
pub mod Settings {
    pub const DEFAULT_CONTACT_API_ENDPOINT: &'static str = "http://localhost:3000/api/contact";

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ClientConfig {
        pub endpoint: String,
    }

    impl ClientConfig {
        pub fn from_env() -> Self {
            let endpoint = match dotenvy::var("CONTACT_API_ENDPOINT") {
                Ok(endpoint) if !endpoint.trim().is_empty() => {
                    tracing::info!("Using custom CONTACT_API_ENDPOINT: {endpoint}");
                    endpoint
                },
                _ => DEFAULT_CONTACT_API_ENDPOINT.to_owned(),
            };
            ClientConfig { endpoint }
        }
    }
}
