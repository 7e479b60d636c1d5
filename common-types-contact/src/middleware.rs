pub mod set_cors_headers;
pub mod request_describer;
