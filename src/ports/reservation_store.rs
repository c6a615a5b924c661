use crate::domain::{Reservation, ReservationStatus, ReservationUid, Username};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ストアポート
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// 新しい予約を保存する
    async fn insert(&self, reservation: &Reservation) -> Result<()>;

    /// UIDで予約を取得する
    async fn find_by_uid(&self, reservation_uid: ReservationUid) -> Result<Option<Reservation>>;

    /// ユーザーの全予約を取得する
    async fn find_by_username(&self, username: &Username) -> Result<Vec<Reservation>>;

    /// ユーザーの貸出中（RENTED）の予約数を数える
    ///
    /// 貸出可否の判定に使用される。
    async fn count_rented(&self, username: &Username) -> Result<u32>;

    /// 予約のステータスを更新する
    ///
    /// 対象の予約が存在しない場合は false を返す。
    async fn update_status(
        &self,
        reservation_uid: ReservationUid,
        status: ReservationStatus,
    ) -> Result<bool>;
}
