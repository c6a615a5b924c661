use crate::domain::{
    BookSummary, ConditionUpdate, CountChange, FeeCounter, Library, Reservation,
    ReservationStatus, ReservationUid, adjust_stars, can_take_book,
    commands::{ReserveBook, ReturnBook},
    resolve_return_status,
};
use crate::ports::ClientError;

use super::GatewayDependencies;
use super::access::{require_admin, require_username};
use super::errors::{GatewayError, Result};

/// 貸出フローの結果
#[derive(Debug, Clone)]
pub struct BorrowReceipt {
    pub reservation: Reservation,
    pub book: BookSummary,
    pub library: Library,
    /// 貸出可否の判定に使った時点の評価
    pub stars: i32,
}

/// 返却フローの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub status: ReservationStatus,
    pub fee: u32,
    pub stars: i32,
}

/// 書籍を借りる（貸出サガ）
///
/// 手順（逐次実行、ロールバックなし）：
/// 1. ユーザー名の確認
/// 2. 貸出中の冊数を予約サービスから取得
/// 3. 評価を評価サービスから取得
/// 4. 貸出中の冊数が評価以上なら拒否
/// 5. 予約を作成（ここから先の失敗では予約が残る）
/// 6. 書籍と図書館の詳細を取得
/// 7. 貸出可能冊数を1冊減らす
///
/// # 一貫性保証
///
/// 分散トランザクションではない。手順5以降で失敗した場合、作成済みの予約は
/// 取り消されず貸出中のまま残る。
pub async fn borrow_book(
    deps: &GatewayDependencies,
    username: Option<&str>,
    cmd: ReserveBook,
) -> Result<BorrowReceipt> {
    // 1. ユーザー名
    let username = require_username(username)?;

    // 2. 貸出中の冊数
    let active_rentals = deps.reservation.rented_amount(&username).await?;

    // 3. 評価
    let stars = deps.rating.get_stars(&username).await?;

    // 4. 貸出可否
    if !can_take_book(active_rentals, stars) {
        tracing::info!(%username, active_rentals, stars, "borrow rejected by rating");
        return Err(GatewayError::BadRequest(
            "user cannot take new book".to_string(),
        ));
    }

    // 5. 予約作成
    let reservation = deps
        .reservation
        .create_reservation(&username, &cmd)
        .await?;
    tracing::info!(
        step = "create_reservation",
        reservation_uid = %reservation.reservation_uid,
        %username,
        "saga step completed"
    );

    // 6. レスポンス用の詳細
    let book = deps.catalog.get_book(reservation.book_uid).await?;
    let library = deps.catalog.get_library(reservation.library_uid).await?;

    // 7. 在庫を減らす
    match deps
        .catalog
        .update_count(
            reservation.library_uid,
            reservation.book_uid,
            CountChange::Decrement,
        )
        .await
    {
        Ok(()) => {}
        Err(ClientError::Status { status, message }) => {
            tracing::warn!(
                reservation_uid = %reservation.reservation_uid,
                status,
                %message,
                "count update rejected, reservation left in place"
            );
            return Err(GatewayError::BadRequest(
                "error while updating count".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    }
    tracing::info!(
        step = "decrement_count",
        reservation_uid = %reservation.reservation_uid,
        "saga step completed"
    );

    Ok(BorrowReceipt {
        reservation,
        book,
        library,
        stars,
    })
}

/// 書籍を返却する（返却サガ、管理者のみ）
///
/// 手順（逐次実行、ロールバックなし）：
/// 1. 管理者トークンとユーザー名の確認
/// 2. 予約を取得
/// 3. 返却日と返却期限から終端ステータスを決める
/// 4. 予約のステータスを更新（延滞ならペナルティ+1）
/// 5. 書籍の状態を更新（変わったならペナルティ+1）
/// 6. 貸出可能冊数を1冊戻す
/// 7. 現在の評価を取得
/// 8. ペナルティありなら `-10 * ペナルティ`、なしなら `+1`、[0, 100]に丸める
/// 9. 新しい評価を保存
///
/// 手順4〜6で相手サービスが非成功ステータスを返した場合は警告を記録して
/// 次の手順へ進む（その手順ではペナルティを数えない）。通信失敗は中断する。
///
/// # 冪等性
///
/// **警告**: 予約の現在のステータスを確認しないため、同じ予約に対して
/// 2回呼ぶと評価調整が2回適用される。
pub async fn return_book(
    deps: &GatewayDependencies,
    token: Option<&str>,
    username: Option<&str>,
    reservation_uid: ReservationUid,
    cmd: ReturnBook,
) -> Result<ReturnReceipt> {
    // 1. 権限とユーザー名
    require_admin(&deps.admin_token, token)?;
    let username = require_username(username)?;

    let mut fee = FeeCounter::new();

    // 2. 予約
    let reservation = deps.reservation.get_reservation(reservation_uid).await?;

    // 3. 終端ステータス
    let expected = resolve_return_status(cmd.date, reservation.till_date);

    // 4. ステータス更新
    let mut status = expected;
    match deps
        .reservation
        .close_reservation(reservation_uid, &cmd)
        .await
    {
        Ok(actual) => {
            if actual != expected {
                tracing::warn!(%reservation_uid, %expected, %actual, "reservation service resolved a different status");
            }
            status = actual;
            fee.charge_status(status);
            tracing::info!(step = "close_reservation", %reservation_uid, %status, "saga step completed");
        }
        Err(ClientError::Status { status: code, message }) => {
            tracing::warn!(step = "close_reservation", %reservation_uid, status = code, %message, "saga step rejected, continuing");
        }
        Err(err) => return Err(err.into()),
    }

    // 5. 書籍状態
    match deps
        .catalog
        .update_condition(reservation.book_uid, cmd.condition)
        .await
    {
        Ok(condition) => {
            fee.charge_condition(condition == ConditionUpdate::Changed);
            tracing::info!(step = "update_condition", book_uid = %reservation.book_uid, ?condition, "saga step completed");
        }
        Err(ClientError::Status { status, message }) => {
            tracing::warn!(step = "update_condition", book_uid = %reservation.book_uid, status, %message, "saga step rejected, continuing");
        }
        Err(err) => return Err(err.into()),
    }

    // 6. 在庫を戻す
    match deps
        .catalog
        .update_count(
            reservation.library_uid,
            reservation.book_uid,
            CountChange::Increment,
        )
        .await
    {
        Ok(()) => {
            tracing::info!(step = "increment_count", book_uid = %reservation.book_uid, "saga step completed");
        }
        Err(ClientError::Status { status, message }) => {
            tracing::warn!(step = "increment_count", book_uid = %reservation.book_uid, status, %message, "saga step rejected, continuing");
        }
        Err(err) => return Err(err.into()),
    }

    // 7. 現在の評価
    let stars = deps.rating.get_stars(&username).await?;

    // 8. 評価調整
    let new_stars = adjust_stars(stars, fee);

    // 9. 保存
    deps.rating.update_stars(&username, new_stars).await?;
    tracing::info!(
        step = "update_rating",
        %username,
        fee = fee.value(),
        from = stars,
        to = new_stars,
        "saga step completed"
    );

    Ok(ReturnReceipt {
        status,
        fee: fee.value(),
        stars: new_stars,
    })
}
