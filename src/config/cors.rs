use axum::http::{
    header::{ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE},
    HeaderValue, Method,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

pub fn init_cors(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, COOKIE, SET_COOKIE])
        .allow_credentials(true)
        .expose_headers([SET_COOKIE]);

    match origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin([origin]),
        Err(e) => {
            warn!("Ignoring unparsable CORS origin {:?}: {}", origin, e);
            cors
        }
    }
}
