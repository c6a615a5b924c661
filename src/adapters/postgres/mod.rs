pub mod library_store;
pub mod rating_store;
pub mod reservation_store;

use crate::config::DatabaseConfig;
use sqlx::{PgPool, postgres::PgPoolOptions};

// パブリックに型を再エクスポート
pub use library_store::LibraryStore as PostgresLibraryStore;
pub use rating_store::RatingStore as PostgresRatingStore;
pub use reservation_store::ReservationStore as PostgresReservationStore;

/// 設定からコネクションプールを作成する
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// 行データの変換失敗をストアエラーとして返す
pub(crate) fn invalid_data(message: impl Into<String>) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        message.into(),
    ))
}
