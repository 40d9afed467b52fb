use axum::{
    extract::{Query, State},
    Json,
};
use garde::Validate;
use kernel::model::{availability::Availability, reservation::BookingDate};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::availability::{AvailabilityQuery, AvailabilityResponse};

pub async fn show_availability(
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    query.validate(&())?;
    let date = BookingDate::parse(&query.date)?;

    // カタログは日付に関係なく全件、予約は指定日のもののみ取得する
    let catalog = registry.catalog_repository();
    let resources = catalog.find_all_resources().await?;
    let time_slots = catalog.find_all_time_slots().await?;
    let reservations = registry
        .reservation_repository()
        .find_by_date(date)
        .await?;

    Ok(Json(
        Availability::compose(date, resources, time_slots, &reservations).into(),
    ))
}
