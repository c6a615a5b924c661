pub mod commands;
pub mod errors;
pub mod library;
pub mod rating;
pub mod reservation;
pub mod value_objects;

pub use errors::*;
pub use library::*;
pub use rating::*;
pub use reservation::*;
pub use value_objects::*;
