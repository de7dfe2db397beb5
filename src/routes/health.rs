use crate::response::ApiResponse;
use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Liveness probe.
///
/// Stays outside the auth middleware, but answers with the same
/// `{success, data, message}` envelope as every other endpoint.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(
        json!({
            "status": "ok",
            "timestamp": Utc::now()
        }),
        "Service is healthy",
    ))
}
