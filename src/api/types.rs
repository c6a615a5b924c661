use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::gateway::{BorrowReceipt, ReservationDetails};
use crate::domain::{
    BookCondition, BookSummary, CountChange, Library, ReservationStatus, ReservationUid,
};

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 確認メッセージ
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 評価（GET/PUT /api/v1/rating/）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingResponse {
    pub stars: i32,
}

/// 貸出中の冊数（GET /api/v1/reservations/amount）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountResponse {
    pub amount: u32,
}

/// 書籍状態の更新リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConditionRequest {
    pub condition: BookCondition,
}

/// 貸出可能冊数の更新リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCountRequest {
    pub change: CountChange,
}

/// 図書館一覧のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct LibrariesQuery {
    pub city: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

/// 所蔵書籍一覧のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct BooksQuery {
    #[serde(rename = "showAll")]
    pub show_all: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

/// 貸出レスポンス（POST /api/v1/reservations）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeBookResponse {
    pub reservation_uid: ReservationUid,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
    pub book: BookSummary,
    pub library: Library,
    pub rating: RatingResponse,
}

impl From<BorrowReceipt> for TakeBookResponse {
    fn from(receipt: BorrowReceipt) -> Self {
        Self {
            reservation_uid: receipt.reservation.reservation_uid,
            status: receipt.reservation.status,
            start_date: receipt.reservation.start_date,
            till_date: receipt.reservation.till_date,
            book: receipt.book,
            library: receipt.library,
            rating: RatingResponse {
                stars: receipt.stars,
            },
        }
    }
}

/// 予約一覧の要素（GET /api/v1/reservations、ゲートウェイ）
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_uid: ReservationUid,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
    pub book: BookSummary,
    pub library: Library,
}

impl From<ReservationDetails> for ReservationResponse {
    fn from(details: ReservationDetails) -> Self {
        Self {
            reservation_uid: details.reservation.reservation_uid,
            status: details.reservation.status,
            start_date: details.reservation.start_date,
            till_date: details.reservation.till_date,
            book: details.book,
            library: details.library,
        }
    }
}
