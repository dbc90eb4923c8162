//! Configuración de CORS
//!
//! La API se consume con JSON + token Bearer; las descargas de CSV exponen
//! `Content-Disposition` para que el cliente recupere el nombre de archivo.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS abierto, para desarrollo
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive().expose_headers([header::CONTENT_DISPOSITION])
}

/// CORS restringido a los orígenes configurados (producción)
pub fn cors_middleware_with_origins(origins: Vec<String>) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
