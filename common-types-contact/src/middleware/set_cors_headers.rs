use axum::{
    middleware::Next,
    extract::State,
    http::{
        Request,
        header::{
            HeaderValue,
            ORIGIN,
            VARY,
            CONTENT_TYPE,
            ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_MAX_AGE,
        }
    },
    response::Response,
    body::Body,
};

use crate::{
    Response::{ServerResponse, internal_server_error},
    State::AppState,
    Cors::{CorsDecision, ALLOW_HEADERS, ALLOW_METHODS, MAX_AGE_SECS},
};

// Runs outermost so that every response, errors included, carries the headers.
// Without them the browser hides the error body from the page.
#[tracing::instrument(skip(appstate, req, next))]
pub async fn middleware(State(appstate): State<AppState>, req: Request<Body>, next: Next<Body>) -> Result<Response, ServerResponse> {
    let origin = req.headers().get(ORIGIN).and_then(|x| x.to_str().ok()).map(str::to_owned);
    let decision = CorsDecision::resolve(&appstate.config, origin.as_deref());
    if !decision.matched {
        tracing::warn!("Origin {:?} is not allow-listed, answering with {}", origin, decision.allow_origin);
    }
    let allow_origin = decision.allow_origin_header().map_err(|err| {
        tracing::error!("Failed to build Access-Control-Allow-Origin, {err}");
        internal_server_error("Internal Server Error")
    })?;

    let response = next.run(req).await;
    let (mut parts, body) = response.into_parts();
    parts.headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    parts.headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    parts.headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    parts.headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
    parts.headers.append(VARY, HeaderValue::from_static("Origin"));
    parts.headers.entry(CONTENT_TYPE).or_insert(HeaderValue::from_static("application/json"));
    return Ok(Response::from_parts(parts, body))
}
