pub mod catalog;
pub mod errors;
pub mod gateway;
pub mod rating;
pub mod reservation;

pub use errors::{Result, ServiceError};
