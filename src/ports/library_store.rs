use crate::domain::{Book, BookCondition, BookUid, CountChange, Library, LibraryBook, LibraryUid};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出可能冊数の更新結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountUpdate {
    /// 更新された（更新後の冊数）
    Updated { available_count: u32 },
    /// 図書館にその書籍の所蔵がない
    HoldingNotFound,
    /// 在庫0の書籍を減らそうとした
    NoCopiesLeft,
}

/// 図書館・書籍ストアポート
///
/// カタログサービスが所有する図書館、書籍、所蔵（library_books）の永続化を抽象化する。
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// 都市で図書館を検索する
    async fn find_libraries_by_city(&self, city: &str) -> Result<Vec<Library>>;

    /// UIDで図書館を取得する
    async fn find_library(&self, library_uid: LibraryUid) -> Result<Option<Library>>;

    /// 図書館の所蔵書籍を検索する
    ///
    /// `show_all` が false の場合は貸出可能冊数が1以上の書籍のみ返す。
    async fn find_library_books(
        &self,
        library_uid: LibraryUid,
        show_all: bool,
    ) -> Result<Vec<LibraryBook>>;

    /// UIDで書籍を取得する
    async fn find_book(&self, book_uid: BookUid) -> Result<Option<Book>>;

    /// 書籍の状態を更新する
    async fn update_book_condition(&self, book_uid: BookUid, condition: BookCondition)
    -> Result<()>;

    /// 所蔵の貸出可能冊数を1冊増減する
    ///
    /// 読み取りと書き込みを分けず、1回の操作で適用する。
    /// 冊数が負になる変更は適用せず`CountUpdate::NoCopiesLeft`を返す。
    async fn change_available_count(
        &self,
        library_uid: LibraryUid,
        book_uid: BookUid,
        change: CountChange,
    ) -> Result<CountUpdate>;
}
