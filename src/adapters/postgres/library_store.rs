use crate::domain::{
    Book, BookCondition, BookUid, CountChange, Library, LibraryBook, LibraryUid,
};
use crate::ports::library_store::{CountUpdate, LibraryStore as LibraryStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

use super::invalid_data;

/// PostgreSQLの行データをLibraryに変換する
fn map_row_to_library(row: &PgRow) -> Library {
    Library {
        library_uid: LibraryUid::from_uuid(row.get("library_uid")),
        name: row.get("name"),
        address: row.get("address"),
        city: row.get("city"),
    }
}

/// PostgreSQLの行データをBookに変換する
///
/// author / genre はNULL許容のため空文字列に読み替える。
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    let condition_str: &str = row.get("condition");
    let condition = BookCondition::from_str(condition_str).map_err(|e| invalid_data(e.to_string()))?;

    Ok(Book {
        book_uid: BookUid::from_uuid(row.get("book_uid")),
        name: row.get("name"),
        author: row.get::<Option<String>, _>("author").unwrap_or_default(),
        genre: row.get::<Option<String>, _>("genre").unwrap_or_default(),
        condition,
    })
}

fn to_count(raw: i32) -> Result<u32> {
    u32::try_from(raw).map_err(|_| invalid_data(format!("available_count out of range: {}", raw)))
}

/// PostgreSQLの行データをLibraryBookに変換する
fn map_row_to_library_book(row: &PgRow) -> Result<LibraryBook> {
    Ok(LibraryBook {
        book: map_row_to_book(row)?,
        available_count: to_count(row.get("available_count"))?,
    })
}

/// LibraryStoreのPostgreSQL実装
///
/// テーブル構成：library、books、library_books（所蔵と貸出可能冊数）
pub struct LibraryStore {
    pool: PgPool,
}

impl LibraryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryStoreTrait for LibraryStore {
    async fn find_libraries_by_city(&self, city: &str) -> Result<Vec<Library>> {
        let rows = sqlx::query(
            r#"
            SELECT library_uid, name, city, address
            FROM library
            WHERE city = $1
            ORDER BY id
            "#,
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_library).collect())
    }

    async fn find_library(&self, library_uid: LibraryUid) -> Result<Option<Library>> {
        let row = sqlx::query(
            r#"
            SELECT library_uid, name, city, address
            FROM library
            WHERE library_uid = $1
            "#,
        )
        .bind(library_uid.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_library))
    }

    /// `show_all` が false の場合は `available_count > 0` の所蔵のみ
    async fn find_library_books(
        &self,
        library_uid: LibraryUid,
        show_all: bool,
    ) -> Result<Vec<LibraryBook>> {
        let rows = sqlx::query(
            r#"
            SELECT
                b.book_uid,
                b.name,
                b.author,
                b.genre,
                COALESCE(b.condition, 'EXCELLENT') AS condition,
                lb.available_count
            FROM library_books lb
            JOIN books b ON b.id = lb.book_id
            JOIN library l ON l.id = lb.library_id
            WHERE l.library_uid = $1 AND ($2 OR lb.available_count > 0)
            ORDER BY b.id
            "#,
        )
        .bind(library_uid.value())
        .bind(show_all)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_library_book).collect()
    }

    async fn find_book(&self, book_uid: BookUid) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT book_uid, name, author, genre, COALESCE(condition, 'EXCELLENT') AS condition
            FROM books
            WHERE book_uid = $1
            "#,
        )
        .bind(book_uid.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn update_book_condition(
        &self,
        book_uid: BookUid,
        condition: BookCondition,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET condition = $2
            WHERE book_uid = $1
            "#,
        )
        .bind(book_uid.value())
        .bind(condition.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 1回の条件付きUPDATEで増減する
    ///
    /// 減らす場合は `available_count > 0` を条件に含めるため、
    /// 同時に実行されても負にはならない。更新行がなければ所蔵の有無で
    /// `HoldingNotFound` と `NoCopiesLeft` を区別する。
    async fn change_available_count(
        &self,
        library_uid: LibraryUid,
        book_uid: BookUid,
        change: CountChange,
    ) -> Result<CountUpdate> {
        let delta: i32 = match change {
            CountChange::Decrement => -1,
            CountChange::Increment => 1,
        };

        let row = sqlx::query(
            r#"
            UPDATE library_books lb
            SET available_count = lb.available_count + $3
            FROM library l, books b
            WHERE lb.library_id = l.id
              AND lb.book_id = b.id
              AND l.library_uid = $1
              AND b.book_uid = $2
              AND lb.available_count + $3 >= 0
            RETURNING lb.available_count
            "#,
        )
        .bind(library_uid.value())
        .bind(book_uid.value())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(CountUpdate::Updated {
                available_count: to_count(row.get("available_count"))?,
            });
        }

        let held: bool = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM library_books lb
                JOIN library l ON l.id = lb.library_id
                JOIN books b ON b.id = lb.book_id
                WHERE l.library_uid = $1 AND b.book_uid = $2
            ) AS held
            "#,
        )
        .bind(library_uid.value())
        .bind(book_uid.value())
        .fetch_one(&self.pool)
        .await?
        .get("held");

        Ok(if held {
            CountUpdate::NoCopiesLeft
        } else {
            CountUpdate::HoldingNotFound
        })
    }
}
