use crate::domain::{Rating, Username, validate_stars};
use crate::ports::RatingStore;
use std::sync::Arc;

use crate::application::errors::{Result, ServiceError};

/// 評価サービスの依存関係
#[derive(Clone)]
pub struct RatingDependencies {
    pub rating_store: Arc<dyn RatingStore>,
}

/// ユーザーの評価を取得する
pub async fn get_rating(deps: &RatingDependencies, username: &Username) -> Result<Rating> {
    deps.rating_store
        .find_rating(username)
        .await
        .map_err(ServiceError::StoreError)?
        .ok_or_else(|| ServiceError::NotFound("username not found".to_string()))
}

/// ユーザーの評価を絶対値で更新する
///
/// 丸めは呼び出し側（ゲートウェイ）の責務。範囲外の値はここで拒否する。
pub async fn update_rating(
    deps: &RatingDependencies,
    username: &Username,
    stars: i32,
) -> Result<()> {
    let stars = validate_stars(stars)?;

    let updated = deps
        .rating_store
        .update_stars(username, stars)
        .await
        .map_err(ServiceError::StoreError)?;

    if !updated {
        return Err(ServiceError::NotFound("username not found".to_string()));
    }

    tracing::info!(%username, stars, "rating updated");
    Ok(())
}
