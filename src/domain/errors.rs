use thiserror::Error;

/// ドメイン層のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// `X-User-Name` ヘッダーが無い、または空
    #[error("username must be given as X-User-Name Header")]
    MissingUsername,

    /// 評価が0〜100の範囲外
    #[error("stars must be between {min} and {max}, got {actual}")]
    StarsOutOfRange { min: i32, max: i32, actual: i32 },

    /// 在庫が0の書籍をさらに貸し出そうとした
    #[error("no available copies left")]
    NoCopiesLeft,

    /// 日付が `YYYY-MM-DD` 形式ではない
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// 書籍状態のラベルが空、または大文字でない
    #[error("book condition must be a non-empty upper-case label, got '{0}'")]
    InvalidCondition(String),

    /// 未知の予約ステータス
    #[error("unknown reservation status '{0}'")]
    UnknownStatus(String),
}
