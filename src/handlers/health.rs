use actix_web::HttpResponse;

/// GET /
pub async fn read_root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
