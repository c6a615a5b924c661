pub mod library_store;
pub mod rating_store;
pub mod reservation_store;

pub use library_store::LibraryStore;
pub use rating_store::RatingStore;
pub use reservation_store::ReservationStore;
