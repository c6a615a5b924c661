use crate::domain::{Rating, Username};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 評価ストアポート
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// ユーザー名で評価を取得する
    async fn find_rating(&self, username: &Username) -> Result<Option<Rating>>;

    /// 評価を絶対値で上書きする
    ///
    /// 対象ユーザーが存在しない場合は false を返す。
    async fn update_stars(&self, username: &Username, stars: i32) -> Result<bool>;
}
