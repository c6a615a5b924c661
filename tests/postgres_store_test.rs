//! PostgreSQLストアの統合テスト
//!
//! `DATABASE_URL` のデータベースが必要なため既定では実行しない。
//! `cargo test -- --ignored` で実行する。

mod common;

use library_reservation::adapters::postgres::{
    PostgresLibraryStore, PostgresRatingStore, PostgresReservationStore,
};
use library_reservation::domain::{
    BookCondition, BookUid, CountChange, LibraryUid, Reservation, ReservationStatus, Username,
};
use library_reservation::ports::{CountUpdate, LibraryStore, RatingStore, ReservationStore};
use serial_test::serial;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use common::date;

// シードデータ
const SEED_LIBRARY: &str = "83575e12-7ce0-48ee-9931-51919ff3c9ee";
const SEED_BOOK: &str = "f7cdc58f-2caf-4b15-9727-f89dcc629b27";
const SEED_USER: &str = "Test_Max";

fn seed_library() -> LibraryUid {
    LibraryUid::from_uuid(Uuid::from_str(SEED_LIBRARY).unwrap())
}

fn seed_book() -> BookUid {
    BookUid::from_uuid(Uuid::from_str(SEED_BOOK).unwrap())
}

/// シードの状態に戻す
async fn reset_seed(pool: &PgPool) {
    sqlx::query("UPDATE library_books SET available_count = 1")
        .execute(pool)
        .await
        .expect("Failed to reset available_count");
    sqlx::query("UPDATE books SET condition = 'EXCELLENT'")
        .execute(pool)
        .await
        .expect("Failed to reset condition");
    sqlx::query("UPDATE rating SET stars = 75 WHERE username = $1")
        .bind(SEED_USER)
        .execute(pool)
        .await
        .expect("Failed to reset rating");
    sqlx::query("DELETE FROM reservation WHERE username = $1")
        .bind(SEED_USER)
        .execute(pool)
        .await
        .expect("Failed to cleanup reservations");
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_library_store_reads_seed() {
    let pool = common::create_test_pool().await;
    reset_seed(&pool).await;
    let store = PostgresLibraryStore::new(pool.clone());

    let libraries = store.find_libraries_by_city("Москва").await.unwrap();
    assert!(libraries.iter().any(|l| l.library_uid == seed_library()));

    let library = store.find_library(seed_library()).await.unwrap().unwrap();
    assert_eq!(library.address, "2-я Бауманская ул., д.5, стр.1");

    let book = store.find_book(seed_book()).await.unwrap().unwrap();
    assert_eq!(book.author, "Бьерн Страуструп");
    assert_eq!(book.condition, BookCondition::Excellent);

    assert!(store.find_library(LibraryUid::new()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_library_store_count_never_goes_negative() {
    let pool = common::create_test_pool().await;
    reset_seed(&pool).await;
    let store = PostgresLibraryStore::new(pool.clone());

    let update = store
        .change_available_count(seed_library(), seed_book(), CountChange::Decrement)
        .await
        .unwrap();
    assert_eq!(update, CountUpdate::Updated { available_count: 0 });

    let update = store
        .change_available_count(seed_library(), seed_book(), CountChange::Decrement)
        .await
        .unwrap();
    assert_eq!(update, CountUpdate::NoCopiesLeft);

    // 在庫0の書籍は showAll=false では返らない
    let visible = store.find_library_books(seed_library(), false).await.unwrap();
    assert!(visible.iter().all(|b| b.book.book_uid != seed_book()));
    let all = store.find_library_books(seed_library(), true).await.unwrap();
    assert!(all.iter().any(|b| b.book.book_uid == seed_book() && b.available_count == 0));

    let update = store
        .change_available_count(seed_library(), BookUid::new(), CountChange::Increment)
        .await
        .unwrap();
    assert_eq!(update, CountUpdate::HoldingNotFound);

    reset_seed(&pool).await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_library_store_updates_condition() {
    let pool = common::create_test_pool().await;
    reset_seed(&pool).await;
    let store = PostgresLibraryStore::new(pool.clone());

    store
        .update_book_condition(seed_book(), BookCondition::Bad)
        .await
        .unwrap();

    let book = store.find_book(seed_book()).await.unwrap().unwrap();
    assert_eq!(book.condition, BookCondition::Bad);

    reset_seed(&pool).await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_rating_store_reads_and_overwrites_stars() {
    let pool = common::create_test_pool().await;
    reset_seed(&pool).await;
    let store = PostgresRatingStore::new(pool.clone());
    let user = Username::new(SEED_USER).unwrap();

    let rating = store.find_rating(&user).await.unwrap().unwrap();
    assert_eq!(rating.stars, 75);

    assert!(store.update_stars(&user, 60).await.unwrap());
    assert_eq!(store.find_rating(&user).await.unwrap().unwrap().stars, 60);

    let stranger = Username::new("Nobody").unwrap();
    assert!(store.find_rating(&stranger).await.unwrap().is_none());
    assert!(!store.update_stars(&stranger, 10).await.unwrap());

    reset_seed(&pool).await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_reservation_store_round_trip() {
    let pool = common::create_test_pool().await;
    reset_seed(&pool).await;
    let store = PostgresReservationStore::new(pool.clone());
    let user = Username::new(SEED_USER).unwrap();

    let reservation = Reservation::open(
        user.clone(),
        seed_book(),
        seed_library(),
        date("2024-05-01"),
        date("2024-06-01"),
    );
    store.insert(&reservation).await.unwrap();

    let loaded = store
        .find_by_uid(reservation.reservation_uid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, reservation);
    assert_eq!(loaded.till_date, date("2024-06-01"));
    assert_eq!(store.count_rented(&user).await.unwrap(), 1);

    assert!(
        store
            .update_status(reservation.reservation_uid, ReservationStatus::Expired)
            .await
            .unwrap()
    );
    assert_eq!(store.count_rented(&user).await.unwrap(), 0);

    let all = store.find_by_username(&user).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, ReservationStatus::Expired);

    reset_seed(&pool).await;
}
