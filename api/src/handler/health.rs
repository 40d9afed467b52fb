use axum::{extract::State, http::StatusCode};
use registry::AppRegistry;

pub async fn banner() -> &'static str {
    "Studio booking backend is running!"
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn health_check_db(State(registry): State<AppRegistry>) -> StatusCode {
    if registry.health_check_repository().check_db().await {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
