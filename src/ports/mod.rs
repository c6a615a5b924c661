pub mod catalog_client;
pub mod client_error;
pub mod library_store;
pub mod rating_client;
pub mod rating_store;
pub mod reservation_client;
pub mod reservation_store;

pub use catalog_client::CatalogClient;
pub use client_error::ClientError;
pub use library_store::{CountUpdate, LibraryStore};
pub use rating_client::RatingClient;
pub use rating_store::RatingStore;
pub use reservation_client::ReservationClient;
pub use reservation_store::ReservationStore;
