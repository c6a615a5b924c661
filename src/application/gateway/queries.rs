use crate::domain::{BookSummary, Library, LibraryBook, LibraryUid, Reservation};

use super::GatewayDependencies;
use super::access::{require_admin, require_username};
use super::errors::Result;
use super::pagination::{Page, PageRequest, paginate};

/// 予約と、その書籍・図書館の詳細
#[derive(Debug, Clone)]
pub struct ReservationDetails {
    pub reservation: Reservation,
    pub book: BookSummary,
    pub library: Library,
}

/// 都市の図書館一覧（ページング）
pub async fn list_libraries(
    deps: &GatewayDependencies,
    city: &str,
    page: PageRequest,
) -> Result<Page<Library>> {
    let libraries = deps.catalog.list_libraries(city).await?;
    Ok(paginate(libraries, page))
}

/// 図書館の所蔵書籍一覧（ページング）
pub async fn list_library_books(
    deps: &GatewayDependencies,
    library_uid: LibraryUid,
    show_all: bool,
    page: PageRequest,
) -> Result<Page<LibraryBook>> {
    let books = deps
        .catalog
        .list_library_books(library_uid, show_all)
        .await?;
    Ok(paginate(books, page))
}

/// ユーザーの全予約を書籍・図書館の詳細つきで取得する（管理者のみ）
///
/// 予約ごとに書籍と図書館を順番に取得する。
pub async fn list_user_reservations(
    deps: &GatewayDependencies,
    token: Option<&str>,
    username: Option<&str>,
) -> Result<Vec<ReservationDetails>> {
    require_admin(&deps.admin_token, token)?;
    let username = require_username(username)?;

    let reservations = deps.reservation.list_reservations(&username).await?;

    let mut details = Vec::with_capacity(reservations.len());
    for reservation in reservations {
        let book = deps.catalog.get_book(reservation.book_uid).await?;
        let library = deps.catalog.get_library(reservation.library_uid).await?;
        details.push(ReservationDetails {
            reservation,
            book,
            library,
        });
    }

    Ok(details)
}

/// ユーザーの評価を取得する（管理者のみ）
pub async fn get_user_rating(
    deps: &GatewayDependencies,
    token: Option<&str>,
    username: Option<&str>,
) -> Result<i32> {
    require_admin(&deps.admin_token, token)?;
    let username = require_username(username)?;

    Ok(deps.rating.get_stars(&username).await?)
}
