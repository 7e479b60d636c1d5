use ::std::future::Future;
use serde_json::Value;
use thiserror::Error;
use common_types::Contact::SubmissionPayload;

use crate::Settings::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network request failed: {0}")]
    Network(String),
}

/// What came back from the endpoint. `body` is `None` when the response was
/// not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_str(&self, key: &str) -> Option<&str> {
        self.body.as_ref()?.get(key)?.as_str()
    }
}

/// Sends one submission to the mail dispatch endpoint, exactly once.
#[cfg_attr(test, mockall::automock)]
pub trait ContactTransport: Send + Sync {
    fn post(&self, payload: SubmissionPayload) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

pub struct ReqwestTransport {
    http_client: reqwest::Client,
    endpoint: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Self {
        ReqwestTransport {
            http_client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }
}

impl ContactTransport for ReqwestTransport {
    #[tracing::instrument(skip(self, payload), fields(endpoint=%self.endpoint))]
    async fn post(&self, payload: SubmissionPayload) -> Result<TransportResponse, TransportError> {
        let response = self.http_client.post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to send POST request to contact endpoint, {err}");
                TransportError::Network(err.to_string())
            })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|err| {
            tracing::error!("Failed to read contact endpoint response, {err}");
            TransportError::Network(err.to_string())
        })?;
        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => Some(body),
            Err(err) => {
                tracing::warn!("Contact endpoint answered {status} with a non-JSON body, {err}");
                None
            },
        };
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use ::std::net::SocketAddr;
    use axum::{
        http::{StatusCode, header},
        routing,
        Json,
        Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({"message": "Thanks!", "received": body}))
    }

    async fn rejected() -> (StatusCode, Json<Value>) {
        (StatusCode::BAD_REQUEST, Json(json!({"error": "Validation failed", "details": ["Name must be 2-100 characters"]})))
    }

    async fn html() -> ([(header::HeaderName, &'static str); 1], &'static str) {
        ([(header::CONTENT_TYPE, "text/html")], "<html>gateway</html>")
    }

    // Serves on an ephemeral port for the lifetime of the test runtime
    fn serve() -> SocketAddr {
        let app = Router::new()
            .route("/sent", routing::post(echo))
            .route("/rejected", routing::post(rejected))
            .route("/html", routing::post(html));
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        addr
    }

    fn transport(addr: SocketAddr, path: &str) -> ReqwestTransport {
        ReqwestTransport::new(&ClientConfig { endpoint: format!("http://{addr}{path}") })
    }

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Engines".to_string(),
            message: "I have some notes on the analytical engine.".to_string(),
        }
    }

    #[test]
    fn success_range() {
        assert!(TransportResponse { status: 200, body: None }.is_success());
        assert!(TransportResponse { status: 204, body: None }.is_success());
        assert!(!TransportResponse { status: 199, body: None }.is_success());
        assert!(!TransportResponse { status: 400, body: None }.is_success());
    }

    #[test]
    fn body_str_ignores_non_strings() {
        let response = TransportResponse { status: 500, body: Some(json!({"error": "boom", "details": 7})) };
        assert_eq!(response.body_str("error"), Some("boom"));
        assert_eq!(response.body_str("details"), None);
        assert_eq!(response.body_str("missing"), None);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        // nothing listens on the discard port
        let transport = ReqwestTransport::new(&ClientConfig { endpoint: "http://127.0.0.1:9/contact".to_string() });
        let result = transport.post(SubmissionPayload::default()).await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[tokio::test]
    async fn posts_the_fields_as_json() {
        let addr = serve();

        let response = transport(addr, "/sent").post(payload()).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.body_str("message"), Some("Thanks!"));
        assert_eq!(response.body.unwrap()["received"], json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "subject": "Engines",
            "message": "I have some notes on the analytical engine.",
        }));
    }

    #[tokio::test]
    async fn error_status_keeps_the_parsed_body() {
        let addr = serve();

        let response = transport(addr, "/rejected").post(payload()).await.unwrap();

        assert_eq!(response.status, 400);
        assert!(!response.is_success());
        assert_eq!(response.body_str("error"), Some("Validation failed"));
    }

    #[tokio::test]
    async fn non_json_body_is_none() {
        let addr = serve();

        let response = transport(addr, "/html").post(payload()).await.unwrap();

        assert_eq!(response, TransportResponse { status: 200, body: None });
    }
}
