use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{gateway, health_check, library, rating, reservation};
use crate::application::{
    catalog::CatalogDependencies, gateway::GatewayDependencies, rating::RatingDependencies,
    reservation::ReservationDependencies,
};

/// 図書館（カタログ）サービスのルーター
///
/// - GET /api/v1/libraries?city= - 都市の図書館一覧
/// - GET /api/v1/libraries/:uid - 図書館の詳細
/// - GET /api/v1/libraries/:uid/books/ - 所蔵書籍一覧
/// - PUT /api/v1/libraries/:uid/books/:book_uid/count - 貸出可能冊数の増減
/// - GET /api/v1/books/:uid - 書籍のサマリー
/// - PUT /api/v1/books/:uid/condition - 書籍状態の更新
pub fn create_library_router(deps: CatalogDependencies) -> Router {
    Router::new()
        .route("/manage/health", get(health_check))
        .route("/api/v1/libraries", get(library::list_libraries))
        .route("/api/v1/libraries/:uid", get(library::get_library))
        .route(
            "/api/v1/libraries/:uid/books/",
            get(library::list_library_books),
        )
        .route(
            "/api/v1/libraries/:uid/books",
            get(library::list_library_books),
        )
        .route(
            "/api/v1/libraries/:uid/books/:book_uid/count",
            put(library::update_book_count),
        )
        .route("/api/v1/books/:uid", get(library::get_book))
        .route(
            "/api/v1/books/:uid/condition",
            put(library::update_book_condition),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(deps)
}

/// 評価サービスのルーター
///
/// - GET /api/v1/rating/ - ユーザーの評価
/// - PUT /api/v1/rating/ - ユーザーの評価を更新
pub fn create_rating_router(deps: RatingDependencies) -> Router {
    Router::new()
        .route("/manage/health", get(health_check))
        .route(
            "/api/v1/rating/",
            get(rating::get_rating).put(rating::update_rating),
        )
        .route(
            "/api/v1/rating",
            get(rating::get_rating).put(rating::update_rating),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(deps)
}

/// 予約サービスのルーター
///
/// - GET /api/v1/reservations - ユーザーの全予約
/// - POST /api/v1/reservations - 予約を作成
/// - GET /api/v1/reservations/amount - 貸出中の冊数
/// - GET /api/v1/reservations/info/:uid - 予約の詳細
/// - PUT /api/v1/reservations/info/:uid - 予約を返却済みにする
pub fn create_reservation_router(deps: ReservationDependencies) -> Router {
    Router::new()
        .route("/manage/health", get(health_check))
        .route(
            "/api/v1/reservations",
            get(reservation::list_reservations).post(reservation::create_reservation),
        )
        .route("/api/v1/reservations/amount", get(reservation::rented_amount))
        .route(
            "/api/v1/reservations/info/:uid",
            get(reservation::get_reservation).put(reservation::close_reservation),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(deps)
}

/// ゲートウェイのルーター
///
/// - GET /api/v1/libraries - 都市の図書館一覧（ページング）
/// - GET /api/v1/libraries/:uid/books/ - 所蔵書籍一覧（ページング）
/// - POST /api/v1/reservations - 書籍を借りる
/// - GET /api/v1/reservations - 予約一覧（管理者）
/// - POST /api/v1/reservations/:uid/return - 書籍を返却する（管理者）
/// - GET /api/v1/rating/ - ユーザーの評価（管理者）
pub fn create_gateway_router(deps: GatewayDependencies) -> Router {
    Router::new()
        .route("/manage/health", get(health_check))
        .route("/api/v1/libraries", get(gateway::list_libraries))
        .route(
            "/api/v1/libraries/:uid/books/",
            get(gateway::list_library_books),
        )
        .route(
            "/api/v1/libraries/:uid/books",
            get(gateway::list_library_books),
        )
        .route(
            "/api/v1/reservations",
            get(gateway::list_reservations).post(gateway::take_book),
        )
        .route(
            "/api/v1/reservations/:uid/return",
            post(gateway::return_book),
        )
        .route("/api/v1/rating/", get(gateway::get_rating))
        .route("/api/v1/rating", get(gateway::get_rating))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(deps)
}
