pub mod admin;
pub mod availability;
pub mod booking;
pub mod health;
pub mod reservation;
pub mod v1;
