use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::reservation::event::CreateReservation;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AppJson,
    model::reservation::{CreateReservationRequest, ReservationCreatedResponse},
};

pub async fn create_reservation(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationCreatedResponse>)> {
    // 入力検証はストレージに触れる前に済ませる
    req.validate(&())?;
    let event = CreateReservation::try_from(req)?;
    let triple = event.triple();

    let reservation = registry
        .reservation_repository()
        .create(event)
        .await
        .inspect_err(|e| {
            if let AppError::Conflict(_) = e {
                tracing::info!(
                    date = %triple.date,
                    time_slot_id = %triple.time_slot_id,
                    resource_id = %triple.resource_id,
                    "Booking conflict"
                );
            }
        })?;

    tracing::info!(
        reservation_id = %reservation.reservation_id,
        date = %reservation.date,
        time_slot_id = %reservation.time_slot_id,
        resource_id = %reservation.resource_id,
        reference = %reservation.reference,
        "Reservation created"
    );

    Ok((StatusCode::CREATED, Json(reservation.into())))
}
