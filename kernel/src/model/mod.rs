pub mod availability;
pub mod booking;
pub mod catalog;
pub mod id;
pub mod reservation;
pub mod resource;
pub mod time_slot;
