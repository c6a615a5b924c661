use crate::application::{ServiceError, gateway::GatewayError};
use crate::domain::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと抽出（デコード）失敗をラップし、
/// `{"message": ...}` 形式のHTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    /// バックエンドサービスのエラー
    Service(ServiceError),
    /// ゲートウェイのエラー
    Gateway(GatewayError),
    /// リクエストのデコード失敗
    Rejected(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Gateway(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Service(ServiceError::from(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // 400 Bad Request - 検証エラー、ビジネスルール違反、下流の失敗
            ApiError::Service(ServiceError::BadRequest(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Gateway(GatewayError::BadRequest(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected(msg) => (StatusCode::BAD_REQUEST, msg),

            // 404 Not Found
            ApiError::Service(ServiceError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),

            // 401 Unauthorized - 管理者トークン不一致
            ApiError::Gateway(err @ GatewayError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Service(ServiceError::StoreError(e)) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to access the store".to_string(),
                )
            }
            ApiError::Gateway(GatewayError::InternalError(msg)) => {
                tracing::error!("Gateway internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
