use crate::domain::{
    BookCondition, BookSummary, BookUid, ConditionUpdate, CountChange, DomainError, Library,
    LibraryBook, LibraryUid,
};
use crate::ports::{CountUpdate, LibraryStore};
use std::sync::Arc;

use crate::application::errors::{Result, ServiceError};

/// カタログサービスの依存関係
#[derive(Clone)]
pub struct CatalogDependencies {
    pub library_store: Arc<dyn LibraryStore>,
}

/// 都市の図書館一覧
pub async fn list_libraries(deps: &CatalogDependencies, city: &str) -> Result<Vec<Library>> {
    deps.library_store
        .find_libraries_by_city(city)
        .await
        .map_err(ServiceError::StoreError)
}

/// 図書館の詳細
pub async fn get_library(deps: &CatalogDependencies, library_uid: LibraryUid) -> Result<Library> {
    deps.library_store
        .find_library(library_uid)
        .await
        .map_err(ServiceError::StoreError)?
        .ok_or_else(|| ServiceError::NotFound(format!("library {} not found", library_uid)))
}

/// 図書館の所蔵書籍一覧
///
/// `show_all` が false の場合は貸出可能な書籍のみ。
pub async fn list_library_books(
    deps: &CatalogDependencies,
    library_uid: LibraryUid,
    show_all: bool,
) -> Result<Vec<LibraryBook>> {
    deps.library_store
        .find_library_books(library_uid, show_all)
        .await
        .map_err(ServiceError::StoreError)
}

/// 書籍のサマリー
pub async fn get_book(deps: &CatalogDependencies, book_uid: BookUid) -> Result<BookSummary> {
    deps.library_store
        .find_book(book_uid)
        .await
        .map_err(ServiceError::StoreError)?
        .map(BookSummary::from)
        .ok_or_else(|| ServiceError::NotFound(format!("book {} not found", book_uid)))
}

/// 書籍の状態を更新する
///
/// 返却時に司書が評価した状態が現在と異なる場合のみ書き込む。
/// 変わったかどうかは評価の減点に使われる。
pub async fn update_book_condition(
    deps: &CatalogDependencies,
    book_uid: BookUid,
    condition: BookCondition,
) -> Result<ConditionUpdate> {
    let book = deps
        .library_store
        .find_book(book_uid)
        .await
        .map_err(ServiceError::StoreError)?
        .ok_or_else(|| ServiceError::NotFound(format!("book {} not found", book_uid)))?;

    if book.condition == condition {
        return Ok(ConditionUpdate::Unchanged);
    }

    tracing::info!(%book_uid, from = %book.condition, to = %condition, "updating book condition");

    deps.library_store
        .update_book_condition(book_uid, condition)
        .await
        .map_err(ServiceError::StoreError)?;

    Ok(ConditionUpdate::Changed)
}

/// 貸出可能冊数を1冊増減する
///
/// ビジネスルール：
/// - 所蔵が存在すること
/// - 貸出可能冊数は負にならない
pub async fn update_book_count(
    deps: &CatalogDependencies,
    library_uid: LibraryUid,
    book_uid: BookUid,
    change: CountChange,
) -> Result<u32> {
    let update = deps
        .library_store
        .change_available_count(library_uid, book_uid, change)
        .await
        .map_err(ServiceError::StoreError)?;

    match update {
        CountUpdate::Updated { available_count } => Ok(available_count),
        CountUpdate::HoldingNotFound => Err(ServiceError::NotFound(format!(
            "book {} is not held by library {}",
            book_uid, library_uid
        ))),
        CountUpdate::NoCopiesLeft => Err(DomainError::NoCopiesLeft.into()),
    }
}
