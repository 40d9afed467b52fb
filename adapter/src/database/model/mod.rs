pub mod catalog;
pub mod reservation;
