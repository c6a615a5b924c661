use thiserror::Error;

/// 下流サービス呼び出しのエラー
///
/// ゲートウェイはこの分類でクライアント起因（400）とシステム障害（500）を分ける。
#[derive(Debug, Error)]
pub enum ClientError {
    /// リクエストを組み立てられなかった
    #[error("failed to build request: {0}")]
    Request(String),

    /// 下流サービスに到達できなかった
    #[error("downstream transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 下流サービスが失敗ステータスを返した
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 下流サービスの応答を解釈できなかった
    #[error("invalid downstream response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
