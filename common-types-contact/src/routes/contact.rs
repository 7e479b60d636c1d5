use axum::{
    body::Bytes,
    extract::{
        rejection::BytesRejection,
        Extension,
        State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{self, MethodRouter},
    Json,
};
use common_types::Contact::{SentResponse, PreflightResponse};

use crate::{
    Response::{ServerResponse, status_response, validation_failed, dispatch_failed},
    State::AppState,
    Middleware::request_describer::RequestDescription,
    Validation::RequestPayload,
    Sanitize::SanitizedPayload,
    Render::render_email,
    Mail::MailError,
    Settings::{Config, REDACTED_PROVIDER_ERROR},
};

pub const SENT_MESSAGE: &'static str = "Message sent successfully! I'll get back to you soon.";

// The whole contract is decided by method, never by path
pub fn endpoint() -> MethodRouter<AppState> {
    routing::post(request)
        .options(preflight)
        .fallback(method_not_allowed)
}

// POST API endpoint
// Body should be JSON, in format:
// {
//      name,     [2-100 characters after trimming]
//      email,    [local@domain.tld]
//      subject,  [3-200 characters after trimming]
//      message,  [10-5000 characters after trimming]
// }
//
// 0. A body that cannot be buffered (over the 2 MB limit) still gets a JSON error
// 1. Read the body leniently, anything missing or mistyped is just invalid
// 2. Validate every field, reject with the full list of failures
// 3. Escape name, subject and message, render the HTML and text bodies
// 4. Hand the email to the provider once, no retries
//
// Responds with the provider's message id if nothing has gone wrong
#[tracing::instrument(skip(request_info, appstate, body), fields(request="contact", origin=?request_info.origin))]
pub async fn request(Extension(request_info): Extension<RequestDescription>, State(appstate): State<AppState>, body: Result<Bytes, BytesRejection>) -> Result<Json<SentResponse>, ServerResponse> {
    let body = body.map_err(|rejection| {
        tracing::warn!("Failed to read request body, {rejection}");
        let status = rejection.into_response().status();
        match status {
            StatusCode::PAYLOAD_TOO_LARGE => status_response(status, "Payload too large"),
            _ => status_response(status, "Failed to read request body"),
        }
    })?;

    let user_request = RequestPayload::from_body(&body);
    let validated = user_request.into_validated().map_err(|details| {
        tracing::info!("Validation failed with reasons: {}", details.join("; "));
        validation_failed(details)
    })?;

    let sanitized = SanitizedPayload::from(&validated);
    let email = render_email(&appstate.config, &sanitized);

    tracing::info!("Sending email");
    let message_id = appstate.mailer.send(email).await.map_err(|err| {
        tracing::error!("Failed to send email, {err}");
        dispatch_failed(provider_details(&appstate.config, &err))
    })?;
    tracing::info!("Email sent: {message_id}");

    Ok(Json(SentResponse {
        message: SENT_MESSAGE.to_string(),
        message_id,
    }))
}

fn provider_details(config: &Config, err: &MailError) -> String {
    if config.redact_provider_errors {
        REDACTED_PROVIDER_ERROR.to_string()
    } else {
        err.to_string()
    }
}

// OPTIONS, the CORS layer adds the headers
pub async fn preflight() -> Json<PreflightResponse> {
    Json(PreflightResponse {
        message: "CORS OK".to_string(),
    })
}

pub async fn method_not_allowed() -> ServerResponse {
    status_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
