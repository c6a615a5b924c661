mod rating_service;

pub use rating_service::{RatingDependencies, get_rating, update_rating};
