use crate::domain::{Rating, Username};
use crate::ports::rating_store::{RatingStore as RatingStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::invalid_data;

fn map_row_to_rating(row: &PgRow) -> Result<Rating> {
    let username: String = row.get("username");
    Ok(Rating {
        username: Username::new(username).map_err(|e| invalid_data(e.to_string()))?,
        stars: row.get("stars"),
    })
}

/// RatingStoreのPostgreSQL実装
pub struct RatingStore {
    pool: PgPool,
}

impl RatingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStoreTrait for RatingStore {
    async fn find_rating(&self, username: &Username) -> Result<Option<Rating>> {
        let row = sqlx::query(
            r#"
            SELECT username, stars
            FROM rating
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_rating).transpose()
    }

    async fn update_stars(&self, username: &Username, stars: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE rating
            SET stars = $2
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .bind(stars)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
