use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::booking::show_booking_history;

pub fn build_booking_routers() -> Router<AppRegistry> {
    Router::new().route("/bookings", get(show_booking_history))
}
