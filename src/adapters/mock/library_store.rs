use crate::domain::{Book, BookCondition, BookUid, CountChange, Library, LibraryBook, LibraryUid};
use crate::ports::library_store::{CountUpdate, LibraryStore as LibraryStoreTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Catalog {
    libraries: Vec<Library>,
    books: HashMap<BookUid, Book>,
    holdings: Vec<(LibraryUid, BookUid, u32)>,
}

/// LibraryStoreのインメモリ実装
///
/// 図書館と所蔵は登録順に保持するので、一覧の順序は安定している。
pub struct LibraryStore {
    catalog: Mutex<Catalog>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self {
            catalog: Mutex::new(Catalog::default()),
        }
    }

    /// 図書館を登録する
    pub fn add_library(&self, library: Library) {
        if let Ok(mut catalog) = self.catalog.lock() {
            catalog.libraries.push(library);
        }
    }

    /// 書籍を登録し、図書館に `available_count` 冊を所蔵させる
    pub fn add_holding(&self, library_uid: LibraryUid, book: Book, available_count: u32) {
        if let Ok(mut catalog) = self.catalog.lock() {
            catalog
                .holdings
                .push((library_uid, book.book_uid, available_count));
            catalog.books.insert(book.book_uid, book);
        }
    }

    /// 所蔵の現在の貸出可能冊数
    pub fn available_count(&self, library_uid: LibraryUid, book_uid: BookUid) -> Option<u32> {
        let catalog = self.catalog.lock().ok()?;
        catalog
            .holdings
            .iter()
            .find(|(l, b, _)| *l == library_uid && *b == book_uid)
            .map(|(_, _, count)| *count)
    }
}

impl Default for LibraryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LibraryStoreTrait for LibraryStore {
    async fn find_libraries_by_city(&self, city: &str) -> Result<Vec<Library>> {
        let catalog = self.catalog.lock().map_err(|e| e.to_string())?;
        Ok(catalog
            .libraries
            .iter()
            .filter(|library| library.city == city)
            .cloned()
            .collect())
    }

    async fn find_library(&self, library_uid: LibraryUid) -> Result<Option<Library>> {
        let catalog = self.catalog.lock().map_err(|e| e.to_string())?;
        Ok(catalog
            .libraries
            .iter()
            .find(|library| library.library_uid == library_uid)
            .cloned())
    }

    async fn find_library_books(
        &self,
        library_uid: LibraryUid,
        show_all: bool,
    ) -> Result<Vec<LibraryBook>> {
        let catalog = self.catalog.lock().map_err(|e| e.to_string())?;
        Ok(catalog
            .holdings
            .iter()
            .filter(|(l, _, count)| *l == library_uid && (show_all || *count > 0))
            .filter_map(|(_, book_uid, count)| {
                catalog.books.get(book_uid).map(|book| LibraryBook {
                    book: book.clone(),
                    available_count: *count,
                })
            })
            .collect())
    }

    async fn find_book(&self, book_uid: BookUid) -> Result<Option<Book>> {
        let catalog = self.catalog.lock().map_err(|e| e.to_string())?;
        Ok(catalog.books.get(&book_uid).cloned())
    }

    async fn update_book_condition(
        &self,
        book_uid: BookUid,
        condition: BookCondition,
    ) -> Result<()> {
        let mut catalog = self.catalog.lock().map_err(|e| e.to_string())?;
        if let Some(book) = catalog.books.get_mut(&book_uid) {
            book.condition = condition;
        }
        Ok(())
    }

    async fn change_available_count(
        &self,
        library_uid: LibraryUid,
        book_uid: BookUid,
        change: CountChange,
    ) -> Result<CountUpdate> {
        let mut catalog = self.catalog.lock().map_err(|e| e.to_string())?;
        let Some((_, _, count)) = catalog
            .holdings
            .iter_mut()
            .find(|(l, b, _)| *l == library_uid && *b == book_uid)
        else {
            return Ok(CountUpdate::HoldingNotFound);
        };

        match change.apply(*count) {
            Ok(updated) => {
                *count = updated;
                Ok(CountUpdate::Updated {
                    available_count: updated,
                })
            }
            Err(_) => Ok(CountUpdate::NoCopiesLeft),
        }
    }
}
