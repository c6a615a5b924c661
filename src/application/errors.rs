use thiserror::Error;

use crate::domain::DomainError;

/// バックエンドサービス（図書館・評価・予約）のアプリケーション層エラー
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 入力の検証エラー、ビジネスルール違反
    #[error("{0}")]
    BadRequest(String),

    /// 対象が存在しない
    #[error("{0}")]
    NotFound(String),

    /// ストアのエラー
    #[error("Store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ServiceError>;
