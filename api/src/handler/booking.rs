use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::booking::BookingResponse;

pub async fn show_booking_history(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    registry
        .reservation_repository()
        .find_booking_history()
        .await
        .map(|entries| entries.into_iter().map(BookingResponse::from).collect())
        .map(Json)
}
