use thiserror::Error;

use crate::domain::DomainError;
use crate::ports::ClientError;

/// ゲートウェイ（オーケストレーター）のエラー
///
/// すべてのエラーは即座にHTTPレスポンスとして返される。
/// リトライも補償も行わないため、それまでに適用された変更はそのまま残る。
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 入力の検証エラー、デコード失敗、ビジネスルール違反、下流サービスの失敗ステータス
    #[error("{0}")]
    BadRequest(String),

    /// 管理者トークンが一致しない
    #[error("only admin can use this")]
    Unauthorized,

    /// 下流サービスへの通信失敗、リクエストの組み立て失敗
    #[error("{0}")]
    InternalError(String),
}

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { message, .. } => GatewayError::BadRequest(message),
            ClientError::Decode(message) => GatewayError::BadRequest(message),
            ClientError::Request(message) => GatewayError::InternalError(message),
            ClientError::Transport(source) => {
                GatewayError::InternalError(format!("downstream transport error: {}", source))
            }
        }
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        GatewayError::BadRequest(err.to_string())
    }
}

/// ゲートウェイの Result型
pub type Result<T> = std::result::Result<T, GatewayError>;
