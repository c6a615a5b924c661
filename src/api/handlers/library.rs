use crate::application::catalog::{self, CatalogDependencies};
use crate::domain::{BookSummary, BookUid, Library, LibraryBook, LibraryUid, parse_show_all};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::{
    error::ApiError,
    types::{
        BooksQuery, LibrariesQuery, MessageResponse, UpdateConditionRequest, UpdateCountRequest,
    },
};
use crate::domain::ConditionUpdate;

/// GET /api/v1/libraries?city= - 都市の図書館一覧
pub async fn list_libraries(
    State(deps): State<CatalogDependencies>,
    query: Result<Query<LibrariesQuery>, QueryRejection>,
) -> Result<Json<Vec<Library>>, ApiError> {
    let Query(query) = query?;
    let city = query.city.unwrap_or_default();

    let libraries = catalog::list_libraries(&deps, &city).await?;
    Ok(Json(libraries))
}

/// GET /api/v1/libraries/:uid - 図書館の詳細
pub async fn get_library(
    State(deps): State<CatalogDependencies>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Library>, ApiError> {
    let Path(library_uid) = path?;

    let library = catalog::get_library(&deps, LibraryUid::from_uuid(library_uid)).await?;
    Ok(Json(library))
}

/// GET /api/v1/libraries/:uid/books/?showAll= - 図書館の所蔵書籍一覧
///
/// `showAll` が真偽値として解釈できない場合は false（貸出可能な書籍のみ）。
pub async fn list_library_books(
    State(deps): State<CatalogDependencies>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<BooksQuery>, QueryRejection>,
) -> Result<Json<Vec<LibraryBook>>, ApiError> {
    let Path(library_uid) = path?;
    let Query(query) = query?;
    let show_all = parse_show_all(query.show_all.as_deref());

    let books =
        catalog::list_library_books(&deps, LibraryUid::from_uuid(library_uid), show_all).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/:uid - 書籍のサマリー
pub async fn get_book(
    State(deps): State<CatalogDependencies>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BookSummary>, ApiError> {
    let Path(book_uid) = path?;

    let book = catalog::get_book(&deps, BookUid::from_uuid(book_uid)).await?;
    Ok(Json(book))
}

/// PUT /api/v1/books/:uid/condition - 書籍の状態を更新
///
/// 状態が変わった場合は201、既に同じ状態の場合は200。
pub async fn update_book_condition(
    State(deps): State<CatalogDependencies>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateConditionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Path(book_uid) = path?;
    let Json(req) = body?;

    let update =
        catalog::update_book_condition(&deps, BookUid::from_uuid(book_uid), req.condition).await?;

    Ok(match update {
        ConditionUpdate::Changed => (
            StatusCode::CREATED,
            Json(MessageResponse::new("condition updated")),
        ),
        ConditionUpdate::Unchanged => (
            StatusCode::OK,
            Json(MessageResponse::new("condition already updated")),
        ),
    })
}

/// PUT /api/v1/libraries/:uid/books/:book_uid/count - 貸出可能冊数を1冊増減
pub async fn update_book_count(
    State(deps): State<CatalogDependencies>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    body: Result<Json<UpdateCountRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path((library_uid, book_uid)) = path?;
    let Json(req) = body?;

    catalog::update_book_count(
        &deps,
        LibraryUid::from_uuid(library_uid),
        BookUid::from_uuid(book_uid),
        req.change,
    )
    .await?;

    Ok(Json(MessageResponse::new("count updated")))
}
