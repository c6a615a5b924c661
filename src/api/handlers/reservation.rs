use crate::application::reservation::{self, ReservationDependencies};
use crate::domain::{
    Reservation, ReservationStatus, ReservationUid,
    commands::{ReserveBook, ReturnBook},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use uuid::Uuid;

use super::username_from;
use crate::api::{
    error::ApiError,
    types::{AmountResponse, MessageResponse},
};

/// GET /api/v1/reservations - ユーザーの全予約
pub async fn list_reservations(
    State(deps): State<ReservationDependencies>,
    headers: HeaderMap,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let username = username_from(&headers)?;

    let reservations = reservation::list_reservations(&deps, &username).await?;
    Ok(Json(reservations))
}

/// GET /api/v1/reservations/amount - 貸出中の冊数
pub async fn rented_amount(
    State(deps): State<ReservationDependencies>,
    headers: HeaderMap,
) -> Result<Json<AmountResponse>, ApiError> {
    let username = username_from(&headers)?;

    let amount = reservation::rented_amount(&deps, &username).await?;
    Ok(Json(AmountResponse { amount }))
}

/// POST /api/v1/reservations - 貸出中の予約を作成
///
/// 開始日はサーバーのUTC日付。
pub async fn create_reservation(
    State(deps): State<ReservationDependencies>,
    headers: HeaderMap,
    body: Result<Json<ReserveBook>, JsonRejection>,
) -> Result<Json<Reservation>, ApiError> {
    let username = username_from(&headers)?;
    let Json(cmd) = body?;

    let today = Utc::now().date_naive();
    let reservation = reservation::create_reservation(&deps, username, cmd, today).await?;
    Ok(Json(reservation))
}

/// GET /api/v1/reservations/info/:uid - 予約の詳細
pub async fn get_reservation(
    State(deps): State<ReservationDependencies>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Reservation>, ApiError> {
    let Path(reservation_uid) = path?;

    let reservation =
        reservation::get_reservation(&deps, ReservationUid::from_uuid(reservation_uid)).await?;
    Ok(Json(reservation))
}

/// PUT /api/v1/reservations/info/:uid - 予約を返却済みにする
///
/// 延滞（EXPIRED）なら204、期限内（RETURNED）なら200。
/// ゲートウェイはこのステータスコードで延滞を判定する。
pub async fn close_reservation(
    State(deps): State<ReservationDependencies>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ReturnBook>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(reservation_uid) = path?;
    let Json(cmd) = body?;

    let status =
        reservation::close_reservation(&deps, ReservationUid::from_uuid(reservation_uid), cmd)
            .await?;

    Ok(match status {
        ReservationStatus::Expired => StatusCode::NO_CONTENT.into_response(),
        _ => Json(MessageResponse::new("reservation closed")).into_response(),
    })
}
