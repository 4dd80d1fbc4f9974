//! HTTP handlers and route configuration.

mod health;
mod messages;

use actix_web::web;
use serde::de::DeserializeOwned;

use crate::middleware::error::AppError;

/// Upper bound on JSON request bodies; posts are short.
const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/messages")
                    .route("", web::get().to(messages::list_messages))
                    .route("", web::post().to(messages::create_message))
                    .route("/{id}", web::delete().to(messages::delete_message))
                    .route("/{id}/report", web::post().to(messages::report_message)),
            )
            .route("/reports", web::get().to(messages::list_reports)),
    );
}

/// Decode a JSON body that may be omitted. An empty body yields `T::default()`;
/// anything else must be valid JSON within the body limit.
pub(crate) fn optional_json<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    if body.len() > JSON_BODY_LIMIT {
        return Err(AppError::BadRequest(format!(
            "Request body exceeds {JSON_BODY_LIMIT} bytes"
        )));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}
