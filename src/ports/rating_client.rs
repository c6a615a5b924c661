use crate::domain::Username;
use async_trait::async_trait;

use super::client_error::Result;

/// 評価サービスポート
#[async_trait]
pub trait RatingClient: Send + Sync {
    /// 現在の評価を取得する
    async fn get_stars(&self, username: &Username) -> Result<i32>;

    /// 評価を絶対値で更新する
    async fn update_stars(&self, username: &Username, stars: i32) -> Result<()>;
}
