use super::{
    admin::build_admin_routers, availability::build_availability_routers,
    booking::build_booking_routers, health::build_health_check_routers,
    reservation::build_reservation_routers,
};
use axum::{http::Method, routing::get, Router};
use registry::AppRegistry;
use tower_http::cors::{Any, CorsLayer};

use crate::handler::health::banner;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_availability_routers())
        .merge(build_reservation_routers())
        .merge(build_booking_routers())
        .merge(build_admin_routers());
    Router::new()
        .route("/", get(banner))
        .nest("/api", router)
        .layer(build_cors_layer())
}

// ブラウザのフロントエンドが独自ヘッダーを付けてくるため、ヘッダーは制限しない
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
