pub mod error;
pub mod handlers;
pub mod headers;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::{
    create_gateway_router, create_library_router, create_rating_router,
    create_reservation_router,
};
pub use types::*;
