use crate::api::types::{UpdateConditionRequest, UpdateCountRequest};
use crate::domain::{
    BookCondition, BookSummary, BookUid, ConditionUpdate, CountChange, Library, LibraryBook,
    LibraryUid,
};
use crate::ports::catalog_client::CatalogClient as CatalogClientTrait;
use crate::ports::client_error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;

use super::{decode, endpoint, expect_success, send_error};

/// 図書館サービスのHTTPクライアント
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl CatalogClientTrait for CatalogClient {
    async fn list_libraries(&self, city: &str) -> Result<Vec<Library>> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/api/v1/libraries"))
            .query(&[("city", city)])
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    async fn list_library_books(
        &self,
        library_uid: LibraryUid,
        show_all: bool,
    ) -> Result<Vec<LibraryBook>> {
        let path = format!("/api/v1/libraries/{}/books/", library_uid);
        let response = self
            .client
            .get(endpoint(&self.base_url, &path))
            .query(&[("showAll", show_all)])
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    async fn get_library(&self, library_uid: LibraryUid) -> Result<Library> {
        let path = format!("/api/v1/libraries/{}", library_uid);
        let response = self
            .client
            .get(endpoint(&self.base_url, &path))
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    async fn get_book(&self, book_uid: BookUid) -> Result<BookSummary> {
        let path = format!("/api/v1/books/{}", book_uid);
        let response = self
            .client
            .get(endpoint(&self.base_url, &path))
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    /// 201なら状態が変わった、それ以外の成功は変化なし
    async fn update_condition(
        &self,
        book_uid: BookUid,
        condition: BookCondition,
    ) -> Result<ConditionUpdate> {
        let path = format!("/api/v1/books/{}/condition", book_uid);
        let response = self
            .client
            .put(endpoint(&self.base_url, &path))
            .json(&UpdateConditionRequest { condition })
            .send()
            .await
            .map_err(send_error)?;

        let response = expect_success(response).await?;
        Ok(if response.status() == StatusCode::CREATED {
            ConditionUpdate::Changed
        } else {
            ConditionUpdate::Unchanged
        })
    }

    async fn update_count(
        &self,
        library_uid: LibraryUid,
        book_uid: BookUid,
        change: CountChange,
    ) -> Result<()> {
        let path = format!("/api/v1/libraries/{}/books/{}/count", library_uid, book_uid);
        let response = self
            .client
            .put(endpoint(&self.base_url, &path))
            .json(&UpdateCountRequest { change })
            .send()
            .await
            .map_err(send_error)?;

        expect_success(response).await?;
        Ok(())
    }
}
