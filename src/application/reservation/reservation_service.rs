use crate::domain::{
    Reservation, ReservationStatus, ReservationUid, Username,
    commands::{ReserveBook, ReturnBook},
};
use crate::ports::ReservationStore;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::errors::{Result, ServiceError};

/// 予約サービスの依存関係
#[derive(Clone)]
pub struct ReservationDependencies {
    pub reservation_store: Arc<dyn ReservationStore>,
}

/// ユーザーの全予約
pub async fn list_reservations(
    deps: &ReservationDependencies,
    username: &Username,
) -> Result<Vec<Reservation>> {
    deps.reservation_store
        .find_by_username(username)
        .await
        .map_err(ServiceError::StoreError)
}

/// UIDで予約を取得する
pub async fn get_reservation(
    deps: &ReservationDependencies,
    reservation_uid: ReservationUid,
) -> Result<Reservation> {
    deps.reservation_store
        .find_by_uid(reservation_uid)
        .await
        .map_err(ServiceError::StoreError)?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("reservation {} not found", reservation_uid))
        })
}

/// ユーザーの貸出中（RENTED）の冊数
pub async fn rented_amount(deps: &ReservationDependencies, username: &Username) -> Result<u32> {
    deps.reservation_store
        .count_rented(username)
        .await
        .map_err(ServiceError::StoreError)
}

/// 貸出中の予約を作成する
///
/// 開始日は`today`（UTCの日付）、返却期限はコマンドの`till_date`。
/// 貸出可否はここでは判定しない（ゲートウェイの責務）。
pub async fn create_reservation(
    deps: &ReservationDependencies,
    username: Username,
    cmd: ReserveBook,
    today: NaiveDate,
) -> Result<Reservation> {
    let reservation = Reservation::open(
        username,
        cmd.book_uid,
        cmd.library_uid,
        today,
        cmd.till_date,
    );

    deps.reservation_store
        .insert(&reservation)
        .await
        .map_err(ServiceError::StoreError)?;

    tracing::info!(
        reservation_uid = %reservation.reservation_uid,
        username = %reservation.username,
        till_date = %reservation.till_date,
        "reservation created"
    );

    Ok(reservation)
}

/// 予約を返却済みにする
///
/// 返却日が返却期限より後なら EXPIRED、そうでなければ RETURNED。
///
/// # 冪等性
///
/// **警告**: 返却済みの予約に再度呼んでもエラーにならない。保存済みの
/// 終端ステータスは変えずに再計算したステータスを返すため、呼び出し側の
/// 評価調整は再度行われる。
pub async fn close_reservation(
    deps: &ReservationDependencies,
    reservation_uid: ReservationUid,
    cmd: ReturnBook,
) -> Result<ReservationStatus> {
    let mut reservation = get_reservation(deps, reservation_uid).await?;

    if reservation.status.is_terminal() {
        tracing::warn!(
            %reservation_uid,
            status = %reservation.status,
            "closing a reservation that is already closed"
        );
    }

    let was_terminal = reservation.status.is_terminal();
    let status = reservation.close(cmd.date);

    if was_terminal {
        // 保存済みの終端ステータスはそのまま、再計算した結果だけ返す
        return Ok(status);
    }

    let updated = deps
        .reservation_store
        .update_status(reservation_uid, reservation.status)
        .await
        .map_err(ServiceError::StoreError)?;

    if !updated {
        return Err(ServiceError::NotFound(format!(
            "reservation {} not found",
            reservation_uid
        )));
    }

    Ok(status)
}
