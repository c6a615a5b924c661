pub mod gateway;
pub mod library;
pub mod rating;
pub mod reservation;

use axum::http::HeaderMap;

use crate::api::error::ApiError;
use crate::domain::{DomainError, Username};

/// GET /manage/health - 死活監視
pub async fn health_check() -> &'static str {
    "OK"
}

/// バックエンドサービス用：`X-User-Name` ヘッダーからユーザー名を取り出す
pub(crate) fn username_from(headers: &HeaderMap) -> Result<Username, ApiError> {
    let raw = super::headers::user_name(headers).ok_or(DomainError::MissingUsername)?;
    Ok(Username::new(raw)?)
}
