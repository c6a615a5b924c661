use crate::api::headers::USER_NAME_HEADER;
use crate::api::types::RatingResponse;
use crate::domain::Username;
use crate::ports::client_error::Result;
use crate::ports::rating_client::RatingClient as RatingClientTrait;
use async_trait::async_trait;

use super::{decode, endpoint, expect_success, send_error};

const RATING_PATH: &str = "/api/v1/rating/";

/// 評価サービスのHTTPクライアント
#[derive(Clone)]
pub struct RatingClient {
    base_url: String,
    client: reqwest::Client,
}

impl RatingClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl RatingClientTrait for RatingClient {
    async fn get_stars(&self, username: &Username) -> Result<i32> {
        let response = self
            .client
            .get(endpoint(&self.base_url, RATING_PATH))
            .header(USER_NAME_HEADER, username.as_str())
            .send()
            .await
            .map_err(send_error)?;

        let rating: RatingResponse = decode(response).await?;
        Ok(rating.stars)
    }

    async fn update_stars(&self, username: &Username, stars: i32) -> Result<()> {
        let response = self
            .client
            .put(endpoint(&self.base_url, RATING_PATH))
            .header(USER_NAME_HEADER, username.as_str())
            .json(&RatingResponse { stars })
            .send()
            .await
            .map_err(send_error)?;

        expect_success(response).await?;
        Ok(())
    }
}
