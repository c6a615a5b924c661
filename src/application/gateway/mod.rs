mod access;
mod errors;
mod orchestrator;
mod pagination;
mod queries;

use crate::ports::{CatalogClient, RatingClient, ReservationClient};
use std::sync::Arc;

pub use access::{AdminToken, require_admin, require_username};
pub use errors::{GatewayError, Result};
pub use orchestrator::{BorrowReceipt, ReturnReceipt, borrow_book, return_book};
pub use pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Page, PageRequest, paginate};
pub use queries::{
    ReservationDetails, get_user_rating, list_libraries, list_library_books,
    list_user_reservations,
};

/// ゲートウェイの依存関係
///
/// 下流の3サービスへのクライアントと管理者トークン。
/// 起動時に一度だけ組み立てられ、すべてのハンドラーで共有される。
#[derive(Clone)]
pub struct GatewayDependencies {
    pub catalog: Arc<dyn CatalogClient>,
    pub rating: Arc<dyn RatingClient>,
    pub reservation: Arc<dyn ReservationClient>,
    pub admin_token: AdminToken,
}
