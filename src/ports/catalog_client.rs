use crate::domain::{
    BookCondition, BookSummary, BookUid, ConditionUpdate, CountChange, Library, LibraryBook,
    LibraryUid,
};
use async_trait::async_trait;

use super::client_error::Result;

/// カタログ（図書館）サービスポート
///
/// ゲートウェイから見た図書館サービスの境界。
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// 都市の図書館一覧を取得する
    async fn list_libraries(&self, city: &str) -> Result<Vec<Library>>;

    /// 図書館の所蔵書籍一覧を取得する
    async fn list_library_books(
        &self,
        library_uid: LibraryUid,
        show_all: bool,
    ) -> Result<Vec<LibraryBook>>;

    /// 図書館の詳細を取得する
    async fn get_library(&self, library_uid: LibraryUid) -> Result<Library>;

    /// 書籍のサマリーを取得する
    async fn get_book(&self, book_uid: BookUid) -> Result<BookSummary>;

    /// 書籍の状態を更新する
    ///
    /// 状態が変わった場合は`ConditionUpdate::Changed`（HTTPでは201）を返す。
    async fn update_condition(
        &self,
        book_uid: BookUid,
        condition: BookCondition,
    ) -> Result<ConditionUpdate>;

    /// 貸出可能冊数を1冊増減する
    async fn update_count(
        &self,
        library_uid: LibraryUid,
        book_uid: BookUid,
        change: CountChange,
    ) -> Result<()>;
}
