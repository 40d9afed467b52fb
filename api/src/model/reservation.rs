use garde::Validate;
use kernel::model::{
    id::ReservationId,
    reservation::{event::CreateReservation, BookingDate, Reservation, ReservationStatus},
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

pub const RESERVATION_SUCCESS_MESSAGE: &str = "Reservation successful!";

// 必須項目が欠けていても 400 を返せるよう、欠落は空文字として受けて garde で検証する
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[serde(default)]
    #[garde(length(min = 1))]
    pub date: String,
    #[serde(default)]
    #[garde(length(min = 1))]
    pub time_slot_id: String,
    #[serde(default, alias = "courtId")]
    #[garde(length(min = 1))]
    pub resource_id: String,
    #[serde(default)]
    #[garde(skip)]
    pub user_name: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub email: Option<String>,
}

impl TryFrom<CreateReservationRequest> for CreateReservation {
    type Error = AppError;

    fn try_from(value: CreateReservationRequest) -> Result<Self, Self::Error> {
        let CreateReservationRequest {
            date,
            time_slot_id,
            resource_id,
            user_name,
            email,
        } = value;
        Ok(CreateReservation::new(
            BookingDate::parse(&date)?,
            time_slot_id.into(),
            resource_id.into(),
            user_name.unwrap_or_default(),
            email.unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreatedResponse {
    pub id: ReservationId,
    pub status: ReservationStatus,
    pub message: String,
    pub reference: String,
}

impl From<Reservation> for ReservationCreatedResponse {
    fn from(value: Reservation) -> Self {
        Self {
            id: value.reservation_id,
            status: value.status,
            message: RESERVATION_SUCCESS_MESSAGE.to_string(),
            reference: value.reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateReservationRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let req = request(r#"{"date": "2024-01-01", "timeSlotId": "t1"}"#);
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn court_id_is_accepted_as_resource_id() {
        let req = request(r#"{"date": "2024-01-01", "timeSlotId": "t1", "courtId": "c1"}"#);
        assert!(req.validate(&()).is_ok());

        let event = CreateReservation::try_from(req).unwrap();
        assert_eq!(event.resource_id.as_str(), "c1");
        assert_eq!(event.user_name, "");
    }

    #[test]
    fn non_canonical_date_is_an_invalid_request() {
        let req = request(r#"{"date": "2024-1-1", "timeSlotId": "t1", "resourceId": "c1"}"#);
        assert!(req.validate(&()).is_ok());
        assert!(matches!(
            CreateReservation::try_from(req),
            Err(AppError::InvalidRequest(_))
        ));
    }
}
