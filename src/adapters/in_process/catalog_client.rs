use crate::application::catalog::{self, CatalogDependencies};
use crate::domain::{
    BookCondition, BookSummary, BookUid, ConditionUpdate, CountChange, Library, LibraryBook,
    LibraryUid,
};
use crate::ports::catalog_client::CatalogClient as CatalogClientTrait;
use crate::ports::client_error::Result;
use async_trait::async_trait;

use super::to_client_error;

/// 図書館サービスのアプリケーション関数を直接呼ぶCatalogClient
pub struct CatalogClient {
    deps: CatalogDependencies,
}

impl CatalogClient {
    pub fn new(deps: CatalogDependencies) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl CatalogClientTrait for CatalogClient {
    async fn list_libraries(&self, city: &str) -> Result<Vec<Library>> {
        catalog::list_libraries(&self.deps, city)
            .await
            .map_err(to_client_error)
    }

    async fn list_library_books(
        &self,
        library_uid: LibraryUid,
        show_all: bool,
    ) -> Result<Vec<LibraryBook>> {
        catalog::list_library_books(&self.deps, library_uid, show_all)
            .await
            .map_err(to_client_error)
    }

    async fn get_library(&self, library_uid: LibraryUid) -> Result<Library> {
        catalog::get_library(&self.deps, library_uid)
            .await
            .map_err(to_client_error)
    }

    async fn get_book(&self, book_uid: BookUid) -> Result<BookSummary> {
        catalog::get_book(&self.deps, book_uid)
            .await
            .map_err(to_client_error)
    }

    async fn update_condition(
        &self,
        book_uid: BookUid,
        condition: BookCondition,
    ) -> Result<ConditionUpdate> {
        catalog::update_book_condition(&self.deps, book_uid, condition)
            .await
            .map_err(to_client_error)
    }

    async fn update_count(
        &self,
        library_uid: LibraryUid,
        book_uid: BookUid,
        change: CountChange,
    ) -> Result<()> {
        catalog::update_book_count(&self.deps, library_uid, book_uid, change)
            .await
            .map(|_| ())
            .map_err(to_client_error)
    }
}
