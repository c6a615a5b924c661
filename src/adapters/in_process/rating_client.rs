use crate::application::rating::{self, RatingDependencies};
use crate::domain::Username;
use crate::ports::client_error::Result;
use crate::ports::rating_client::RatingClient as RatingClientTrait;
use async_trait::async_trait;

use super::to_client_error;

/// 評価サービスのアプリケーション関数を直接呼ぶRatingClient
pub struct RatingClient {
    deps: RatingDependencies,
}

impl RatingClient {
    pub fn new(deps: RatingDependencies) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl RatingClientTrait for RatingClient {
    async fn get_stars(&self, username: &Username) -> Result<i32> {
        rating::get_rating(&self.deps, username)
            .await
            .map(|rating| rating.stars)
            .map_err(to_client_error)
    }

    async fn update_stars(&self, username: &Username, stars: i32) -> Result<()> {
        rating::update_rating(&self.deps, username, stars)
            .await
            .map_err(to_client_error)
    }
}
