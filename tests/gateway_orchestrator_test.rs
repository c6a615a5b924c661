use library_reservation::application::gateway::{
    self, GatewayError, list_user_reservations, return_book,
};
use library_reservation::domain::{
    BookCondition, LibraryUid, Reservation, ReservationStatus, ReservationUid,
    commands::ReturnBook,
};
use library_reservation::ports::{LibraryStore, ReservationStore};
use library_reservation::api::types::TakeBookResponse;

mod common;

use common::{ADMIN_TOKEN, Fixture, USER, date, username};

fn return_command(condition: BookCondition, raw_date: &str) -> ReturnBook {
    ReturnBook {
        condition,
        date: date(raw_date),
    }
}

async fn borrow(fixture: &Fixture, till_date: &str) -> ReservationUid {
    let receipt = gateway::borrow_book(
        &fixture.gateway_deps(),
        Some(USER),
        fixture.reserve(till_date),
    )
    .await
    .expect("borrow should succeed");
    receipt.reservation.reservation_uid
}

// ============================================================================
// 貸出フロー
// ============================================================================

#[tokio::test]
async fn test_borrow_creates_rented_reservation_and_takes_a_copy() {
    // Arrange
    let fixture = Fixture::new(75, 2);

    // Act
    let receipt = gateway::borrow_book(
        &fixture.gateway_deps(),
        Some(USER),
        fixture.reserve("2024-06-01"),
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(receipt.reservation.status, ReservationStatus::Rented);
    assert_eq!(receipt.reservation.till_date, date("2024-06-01"));
    assert_eq!(receipt.book.name, fixture.book.name);
    assert_eq!(receipt.library, fixture.library);
    assert_eq!(receipt.stars, 75);
    assert_eq!(fixture.available_count(), Some(1));
    assert_eq!(fixture.reservation_store.len(), 1);
}

#[tokio::test]
async fn test_borrow_response_keeps_due_date_unchanged() {
    let fixture = Fixture::new(75, 1);

    let receipt = gateway::borrow_book(
        &fixture.gateway_deps(),
        Some(USER),
        fixture.reserve("2024-06-01"),
    )
    .await
    .unwrap();

    let json = serde_json::to_value(TakeBookResponse::from(receipt)).unwrap();
    assert_eq!(json["tillDate"], "2024-06-01");
    assert_eq!(json["status"], "RENTED");
    assert_eq!(json["rating"]["stars"], 75);
    assert!(json["book"].get("condition").is_none());
}

#[tokio::test]
async fn test_borrow_allowed_while_rentals_below_rating() {
    // 評価3、貸出中2冊 → 3冊目は借りられる
    let fixture = Fixture::new(3, 10);
    borrow(&fixture, "2024-06-01").await;
    borrow(&fixture, "2024-06-01").await;

    let result = gateway::borrow_book(
        &fixture.gateway_deps(),
        Some(USER),
        fixture.reserve("2024-06-01"),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(fixture.reservation_store.len(), 3);
}

#[tokio::test]
async fn test_borrow_rejected_when_rentals_reach_rating() {
    // 評価3、貸出中3冊 → 拒否、予約は作られない
    let fixture = Fixture::new(3, 10);
    for _ in 0..3 {
        borrow(&fixture, "2024-06-01").await;
    }

    let result = gateway::borrow_book(
        &fixture.gateway_deps(),
        Some(USER),
        fixture.reserve("2024-06-01"),
    )
    .await;

    match result {
        Err(GatewayError::BadRequest(message)) => {
            assert_eq!(message, "user cannot take new book")
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(fixture.reservation_store.len(), 3);
    assert_eq!(fixture.available_count(), Some(7));
}

#[tokio::test]
async fn test_borrow_requires_username() {
    let fixture = Fixture::new(75, 1);

    let result =
        gateway::borrow_book(&fixture.gateway_deps(), None, fixture.reserve("2024-06-01")).await;

    assert!(matches!(result, Err(GatewayError::BadRequest(_))));
    assert!(fixture.reservation_store.is_empty());
}

#[tokio::test]
async fn test_borrow_unknown_user_is_rejected_before_reserving() {
    let fixture = Fixture::new(75, 1);

    let result = gateway::borrow_book(
        &fixture.gateway_deps(),
        Some("Nobody"),
        fixture.reserve("2024-06-01"),
    )
    .await;

    match result {
        Err(GatewayError::BadRequest(message)) => assert_eq!(message, "username not found"),
        other => panic!("expected BadRequest, got {:?}", other),
    }
    assert!(fixture.reservation_store.is_empty());
}

#[tokio::test]
async fn test_borrow_without_copies_leaves_reservation_behind() {
    // 在庫0：予約は作成された後で在庫更新が失敗し、予約は残る
    let fixture = Fixture::new(75, 0);

    let result = gateway::borrow_book(
        &fixture.gateway_deps(),
        Some(USER),
        fixture.reserve("2024-06-01"),
    )
    .await;

    match result {
        Err(GatewayError::BadRequest(message)) => {
            assert_eq!(message, "error while updating count")
        }
        other => panic!("expected BadRequest, got {:?}", other),
    }
    assert_eq!(fixture.reservation_store.len(), 1);
    assert_eq!(fixture.available_count(), Some(0));
}

// ============================================================================
// 返却フロー
// ============================================================================

#[tokio::test]
async fn test_clean_return_adds_one_star() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Excellent, "2024-06-01"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.status, ReservationStatus::Returned);
    assert_eq!(receipt.fee, 0);
    assert_eq!(receipt.stars, 76);
    assert_eq!(fixture.stars(), Some(76));
    assert_eq!(fixture.available_count(), Some(1));
}

#[tokio::test]
async fn test_late_damaged_return_costs_twenty_stars() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Bad, "2024-06-02"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.status, ReservationStatus::Expired);
    assert_eq!(receipt.fee, 2);
    assert_eq!(fixture.stars(), Some(55));
    assert_eq!(fixture.available_count(), Some(1));
}

#[tokio::test]
async fn test_late_return_in_same_condition_costs_ten_stars() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Excellent, "2024-06-02"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.status, ReservationStatus::Expired);
    assert_eq!(receipt.fee, 1);
    assert_eq!(fixture.stars(), Some(65));
}

#[tokio::test]
async fn test_on_time_return_with_changed_condition_costs_ten_stars() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Good, "2024-05-20"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.status, ReservationStatus::Returned);
    assert_eq!(receipt.fee, 1);
    assert_eq!(fixture.stars(), Some(65));
}

#[tokio::test]
async fn test_return_with_custom_condition_label_counts_one_fee() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;
    let damaged: BookCondition = "DAMAGED".parse().unwrap();

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(damaged.clone(), "2024-06-01"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.fee, 1);
    assert_eq!(fixture.stars(), Some(65));
    let book = fixture
        .library_store
        .find_book(fixture.book.book_uid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.condition, damaged);
}

#[tokio::test]
async fn test_return_continues_when_holding_is_missing() {
    // 予約の図書館がこの書籍を所蔵していない：在庫の更新は404だが返却は続行する
    let fixture = Fixture::new(75, 1);
    let reservation = Reservation::open(
        username(),
        fixture.book.book_uid,
        LibraryUid::new(),
        date("2024-05-01"),
        date("2024-06-01"),
    );
    fixture
        .reservation_store
        .insert(&reservation)
        .await
        .unwrap();

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation.reservation_uid,
        return_command(BookCondition::Excellent, "2024-06-01"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.status, ReservationStatus::Returned);
    assert_eq!(receipt.fee, 0);
    assert_eq!(fixture.stars(), Some(76));
    assert_eq!(fixture.available_count(), Some(1));
}

#[tokio::test]
async fn test_return_continues_when_book_is_unknown_to_catalog() {
    // 書籍が見つからない：状態更新は404、ペナルティは数えない
    let fixture = Fixture::new(75, 1);
    let reservation = Reservation::open(
        username(),
        library_reservation::domain::BookUid::new(),
        fixture.library.library_uid,
        date("2024-05-01"),
        date("2024-06-01"),
    );
    fixture
        .reservation_store
        .insert(&reservation)
        .await
        .unwrap();

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation.reservation_uid,
        return_command(BookCondition::Bad, "2024-06-02"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.status, ReservationStatus::Expired);
    assert_eq!(receipt.fee, 1);
    assert_eq!(fixture.stars(), Some(65));
}

#[tokio::test]
async fn test_penalty_is_floored_at_zero() {
    let fixture = Fixture::new(5, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;

    let receipt = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Good, "2024-07-01"),
    )
    .await
    .unwrap();

    assert_eq!(receipt.stars, 0);
    assert_eq!(fixture.stars(), Some(0));
}

#[tokio::test]
async fn test_return_requires_admin_token() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;

    let result = return_book(
        &fixture.gateway_deps(),
        Some("not-admin"),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Excellent, "2024-06-01"),
    )
    .await;

    assert!(matches!(result, Err(GatewayError::Unauthorized)));
    assert_eq!(fixture.stars(), Some(75));
    assert_eq!(fixture.available_count(), Some(0));
}

#[tokio::test]
async fn test_returning_twice_reapplies_rating_adjustment() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;
    let deps = fixture.gateway_deps();

    for _ in 0..2 {
        return_book(
            &deps,
            Some(ADMIN_TOKEN),
            Some(USER),
            reservation_uid,
            return_command(BookCondition::Excellent, "2024-06-01"),
        )
        .await
        .unwrap();
    }

    assert_eq!(fixture.stars(), Some(77));
    assert_eq!(fixture.available_count(), Some(2));
}

#[tokio::test]
async fn test_second_late_return_keeps_first_stored_status() {
    let fixture = Fixture::new(75, 1);
    let reservation_uid = borrow(&fixture, "2024-06-01").await;
    let deps = fixture.gateway_deps();

    return_book(
        &deps,
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Excellent, "2024-06-01"),
    )
    .await
    .unwrap();
    let second = return_book(
        &deps,
        Some(ADMIN_TOKEN),
        Some(USER),
        reservation_uid,
        return_command(BookCondition::Excellent, "2024-07-01"),
    )
    .await
    .unwrap();

    assert_eq!(second.status, ReservationStatus::Expired);
    assert_eq!(second.fee, 1);
    let stored = fixture
        .reservation_store
        .find_by_uid(reservation_uid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ReservationStatus::Returned);
}

#[tokio::test]
async fn test_return_unknown_reservation_is_bad_request() {
    let fixture = Fixture::new(75, 1);

    let result = return_book(
        &fixture.gateway_deps(),
        Some(ADMIN_TOKEN),
        Some(USER),
        ReservationUid::new(),
        return_command(BookCondition::Excellent, "2024-06-01"),
    )
    .await;

    assert!(matches!(result, Err(GatewayError::BadRequest(_))));
    assert_eq!(fixture.stars(), Some(75));
}

// ============================================================================
// 管理者向け参照
// ============================================================================

#[tokio::test]
async fn test_list_user_reservations_enriches_book_and_library() {
    let fixture = Fixture::new(75, 2);
    borrow(&fixture, "2024-06-01").await;
    borrow(&fixture, "2024-06-15").await;

    let details = list_user_reservations(&fixture.gateway_deps(), Some(ADMIN_TOKEN), Some(USER))
        .await
        .unwrap();

    assert_eq!(details.len(), 2);
    assert!(details.iter().all(|d| d.book.book_uid == fixture.book.book_uid));
    assert!(details.iter().all(|d| d.library == fixture.library));
    assert_eq!(details[1].reservation.till_date, date("2024-06-15"));
}

#[tokio::test]
async fn test_admin_reads_require_token() {
    let fixture = Fixture::new(75, 1);
    let deps = fixture.gateway_deps();

    assert!(matches!(
        list_user_reservations(&deps, None, Some(USER)).await,
        Err(GatewayError::Unauthorized)
    ));
    assert!(matches!(
        gateway::get_user_rating(&deps, Some("wrong"), Some(USER)).await,
        Err(GatewayError::Unauthorized)
    ));
    assert_eq!(
        gateway::get_user_rating(&deps, Some(ADMIN_TOKEN), Some(USER))
            .await
            .unwrap(),
        75
    );
}
