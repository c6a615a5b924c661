use crate::domain::{
    BookUid, LibraryUid, Reservation, ReservationStatus, ReservationUid, Username,
};
use crate::ports::reservation_store::{ReservationStore as ReservationStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

use super::invalid_data;

/// PostgreSQLの行データをReservationに変換する
///
/// ステータス文字列と利用者名の検証で失敗した場合はエラーを返す。
fn map_row_to_reservation(row: &PgRow) -> Result<Reservation> {
    let status_str: &str = row.get("status");
    let status = ReservationStatus::from_str(status_str).map_err(|e| invalid_data(e.to_string()))?;

    let username: String = row.get("username");
    let username = Username::new(username).map_err(|e| invalid_data(e.to_string()))?;

    Ok(Reservation {
        reservation_uid: ReservationUid::from_uuid(row.get("reservation_uid")),
        username,
        book_uid: BookUid::from_uuid(row.get("book_uid")),
        library_uid: LibraryUid::from_uuid(row.get("library_uid")),
        status,
        start_date: row.get("start_date"),
        till_date: row.get("till_date"),
    })
}

/// ReservationStoreのPostgreSQL実装
pub struct ReservationStore {
    pool: PgPool,
}

impl ReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStoreTrait for ReservationStore {
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reservation (
                reservation_uid,
                username,
                book_uid,
                library_uid,
                status,
                start_date,
                till_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation.reservation_uid.value())
        .bind(reservation.username.as_str())
        .bind(reservation.book_uid.value())
        .bind(reservation.library_uid.value())
        .bind(reservation.status.as_str())
        .bind(reservation.start_date)
        .bind(reservation.till_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_uid(&self, reservation_uid: ReservationUid) -> Result<Option<Reservation>> {
        let row = sqlx::query(
            r#"
            SELECT reservation_uid, username, book_uid, library_uid, status, start_date, till_date
            FROM reservation
            WHERE reservation_uid = $1
            "#,
        )
        .bind(reservation_uid.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_reservation).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Vec<Reservation>> {
        let rows = sqlx::query(
            r#"
            SELECT reservation_uid, username, book_uid, library_uid, status, start_date, till_date
            FROM reservation
            WHERE username = $1
            ORDER BY id
            "#,
        )
        .bind(username.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_reservation).collect()
    }

    async fn count_rented(&self, username: &Username) -> Result<u32> {
        let count: i64 = sqlx::query(
            r#"
            SELECT COUNT(*) AS rented
            FROM reservation
            WHERE username = $1 AND status = 'RENTED'
            "#,
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?
        .get("rented");

        u32::try_from(count).map_err(|_| invalid_data(format!("rented count out of range: {}", count)))
    }

    async fn update_status(
        &self,
        reservation_uid: ReservationUid,
        status: ReservationStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reservation
            SET status = $2
            WHERE reservation_uid = $1
            "#,
        )
        .bind(reservation_uid.value())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
