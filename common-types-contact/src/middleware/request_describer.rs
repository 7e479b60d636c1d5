use ::std::net::IpAddr;
use axum::{
    middleware::Next,
    http::{Method, Request, HeaderMap, header::ORIGIN},
    response::Response,
    body::Body,
};

use crate::Response::ServerResponse;

// Checked in order, the first one that parses wins
const IP_HEADERS: [&'static str; 4] = [
    "cf-connecting-ip",
    "x-forwarded-for",
    "x-real-ip",
    "true-client-ip",
];

/// Who is calling, attached to each request for logging only.
#[derive(Debug, Clone)]
pub struct RequestDescription {
    pub method: Method,
    pub origin: Option<String>,
    pub source_ip: Option<IpAddr>,
}

fn try_parse_ip(data: &str) -> Option<IpAddr> {
    let data = data.trim();
    if let Ok(ip) = data.parse::<IpAddr>() {
        return Some(ip)
    }
    // ipv4 with a port attached
    if let Some((ip_str, _)) = data.rsplit_once(':') {
        if let Ok(ip) = ip_str.parse::<IpAddr>() {
            return Some(ip)
        }
    }
    None
}

pub fn source_ip(headers: &HeaderMap) -> Option<IpAddr> {
    for header_name in IP_HEADERS {
        let Some(header_value) = headers.get(header_name) else { continue };
        let Ok(str_header_value) = header_value.to_str() else { continue };
        let candidate = match header_name {
            "x-forwarded-for" => str_header_value.split(',').next().unwrap_or_default(),
            _ => str_header_value,
        };
        if let Some(ip) = try_parse_ip(candidate) {
            return Some(ip)
        }
    }
    None
}

#[tracing::instrument(skip(req, next))]
pub async fn middleware(req: Request<Body>, next: Next<Body>) -> Result<Response, ServerResponse> {
    let (parts, body) = req.into_parts();
    let description = RequestDescription {
        method: parts.method.clone(),
        origin: parts.headers.get(ORIGIN).and_then(|x| x.to_str().ok()).map(str::to_owned),
        source_ip: source_ip(&parts.headers),
    };
    tracing::info!(method=%description.method, origin=?description.origin, source_ip=?description.source_ip, "Inbound contact request");

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(description);
    let response = next.run(req).await;
    tracing::info!(status=%response.status(), "Contact request finished");
    Ok(response)
}
