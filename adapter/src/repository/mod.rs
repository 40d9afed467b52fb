pub mod catalog;
pub mod health;
pub mod memory;
pub mod reservation;
