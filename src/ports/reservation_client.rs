use crate::domain::{
    Reservation, ReservationStatus, ReservationUid, Username,
    commands::{ReserveBook, ReturnBook},
};
use async_trait::async_trait;

use super::client_error::Result;

/// 予約サービスポート
#[async_trait]
pub trait ReservationClient: Send + Sync {
    /// ユーザーの全予約を取得する
    async fn list_reservations(&self, username: &Username) -> Result<Vec<Reservation>>;

    /// UIDで予約を取得する
    async fn get_reservation(&self, reservation_uid: ReservationUid) -> Result<Reservation>;

    /// ユーザーの貸出中の冊数を取得する
    async fn rented_amount(&self, username: &Username) -> Result<u32>;

    /// 貸出中の予約を作成する
    async fn create_reservation(
        &self,
        username: &Username,
        command: &ReserveBook,
    ) -> Result<Reservation>;

    /// 予約を返却済みにする
    ///
    /// 予約サービスが決めた終端ステータスを返す。
    /// HTTPでは EXPIRED が204、RETURNED が200で表される。
    async fn close_reservation(
        &self,
        reservation_uid: ReservationUid,
        command: &ReturnBook,
    ) -> Result<ReservationStatus>;
}
