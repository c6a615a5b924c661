use crate::application::gateway::{self, GatewayDependencies, Page, PageRequest};
use crate::domain::{
    Library, LibraryBook, LibraryUid, ReservationUid,
    commands::{ReserveBook, ReturnBook},
    parse_show_all,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

use crate::api::{
    error::ApiError,
    headers,
    types::{
        BooksQuery, LibrariesQuery, RatingResponse, ReservationResponse, TakeBookResponse,
    },
};

/// GET /api/v1/libraries?city=&page=&size= - 都市の図書館一覧（ページング）
pub async fn list_libraries(
    State(deps): State<GatewayDependencies>,
    query: Result<Query<LibrariesQuery>, QueryRejection>,
) -> Result<Json<Page<Library>>, ApiError> {
    let Query(query) = query?;
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref())?;
    let city = query.city.unwrap_or_default();

    let libraries = gateway::list_libraries(&deps, &city, page).await?;
    Ok(Json(libraries))
}

/// GET /api/v1/libraries/:uid/books/?showAll=&page=&size= - 所蔵書籍一覧（ページング）
pub async fn list_library_books(
    State(deps): State<GatewayDependencies>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<BooksQuery>, QueryRejection>,
) -> Result<Json<Page<LibraryBook>>, ApiError> {
    let Path(library_uid) = path?;
    let Query(query) = query?;
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref())?;
    let show_all = parse_show_all(query.show_all.as_deref());

    let books =
        gateway::list_library_books(&deps, LibraryUid::from_uuid(library_uid), show_all, page)
            .await?;
    Ok(Json(books))
}

/// POST /api/v1/reservations - 書籍を借りる
pub async fn take_book(
    State(deps): State<GatewayDependencies>,
    headers: HeaderMap,
    body: Result<Json<ReserveBook>, JsonRejection>,
) -> Result<Json<TakeBookResponse>, ApiError> {
    let Json(cmd) = body?;

    let receipt = gateway::borrow_book(&deps, headers::user_name(&headers), cmd).await?;
    Ok(Json(TakeBookResponse::from(receipt)))
}

/// GET /api/v1/reservations - ユーザーの予約一覧（管理者のみ）
pub async fn list_reservations(
    State(deps): State<GatewayDependencies>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let details = gateway::list_user_reservations(
        &deps,
        headers::authorization(&headers),
        headers::user_name(&headers),
    )
    .await?;

    Ok(Json(
        details.into_iter().map(ReservationResponse::from).collect(),
    ))
}

/// POST /api/v1/reservations/:uid/return - 書籍を返却する（管理者のみ）
///
/// 成功時は本文なしの204。
pub async fn return_book(
    State(deps): State<GatewayDependencies>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ReturnBook>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    // 本文の解釈より先に権限を確認する
    gateway::require_admin(&deps.admin_token, headers::authorization(&headers))?;
    gateway::require_username(headers::user_name(&headers))?;

    let Path(reservation_uid) = path?;
    let Json(cmd) = body?;

    let receipt = gateway::return_book(
        &deps,
        headers::authorization(&headers),
        headers::user_name(&headers),
        ReservationUid::from_uuid(reservation_uid),
        cmd,
    )
    .await?;

    tracing::info!(
        %reservation_uid,
        status = %receipt.status,
        fee = receipt.fee,
        stars = receipt.stars,
        "book returned"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/rating/ - ユーザーの評価（管理者のみ）
pub async fn get_rating(
    State(deps): State<GatewayDependencies>,
    headers: HeaderMap,
) -> Result<Json<RatingResponse>, ApiError> {
    let stars = gateway::get_user_rating(
        &deps,
        headers::authorization(&headers),
        headers::user_name(&headers),
    )
    .await?;

    Ok(Json(RatingResponse { stars }))
}
