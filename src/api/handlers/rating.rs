use crate::application::rating::{self, RatingDependencies};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};

use super::username_from;
use crate::api::{
    error::ApiError,
    types::{MessageResponse, RatingResponse},
};

/// GET /api/v1/rating/ - ユーザーの評価
pub async fn get_rating(
    State(deps): State<RatingDependencies>,
    headers: HeaderMap,
) -> Result<Json<RatingResponse>, ApiError> {
    let username = username_from(&headers)?;

    let rating = rating::get_rating(&deps, &username).await?;
    Ok(Json(RatingResponse {
        stars: rating.stars,
    }))
}

/// PUT /api/v1/rating/ - ユーザーの評価を絶対値で更新
pub async fn update_rating(
    State(deps): State<RatingDependencies>,
    headers: HeaderMap,
    body: Result<Json<RatingResponse>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let username = username_from(&headers)?;
    let Json(req) = body?;

    rating::update_rating(&deps, &username, req.stars).await?;
    Ok(Json(MessageResponse::new("rating updated")))
}
