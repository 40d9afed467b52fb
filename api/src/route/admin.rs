use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::admin::reset_reservations;

pub fn build_admin_routers() -> Router<AppRegistry> {
    Router::new().route("/reset", post(reset_reservations))
}
