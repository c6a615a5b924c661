use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{BookUid, DomainError, LibraryUid, ReservationUid, Username};

/// 日付のワイヤー形式（タイムゾーンなし）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD` 形式の日付を解釈する
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DomainError::InvalidDate(raw.to_string()))
}

/// 予約ステータス
///
/// RENTED が初期状態、RETURNED / EXPIRED が終端状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// 貸出中
    Rented,
    /// 期限内に返却済み
    Returned,
    /// 期限後に返却済み
    Expired,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Rented => "RENTED",
            ReservationStatus::Returned => "RETURNED",
            ReservationStatus::Expired => "EXPIRED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReservationStatus::Rented)
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RENTED" => Ok(ReservationStatus::Rented),
            "RETURNED" => Ok(ReservationStatus::Returned),
            "EXPIRED" => Ok(ReservationStatus::Expired),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 返却日と返却期限から終端ステータスを決める
///
/// 返却期限当日の返却は期限内（RETURNED）として扱う。
pub fn resolve_return_status(return_date: NaiveDate, due_date: NaiveDate) -> ReservationStatus {
    if return_date > due_date {
        ReservationStatus::Expired
    } else {
        ReservationStatus::Returned
    }
}

/// 予約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_uid: ReservationUid,
    pub username: Username,
    pub book_uid: BookUid,
    pub library_uid: LibraryUid,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub till_date: NaiveDate,
}

impl Reservation {
    /// 新しい貸出中の予約を作成する
    pub fn open(
        username: Username,
        book_uid: BookUid,
        library_uid: LibraryUid,
        start_date: NaiveDate,
        till_date: NaiveDate,
    ) -> Self {
        Self {
            reservation_uid: ReservationUid::new(),
            username,
            book_uid,
            library_uid,
            status: ReservationStatus::Rented,
            start_date,
            till_date,
        }
    }

    /// 予約を終端ステータスに移す
    ///
    /// 戻り値は今回の返却日から決めた終端ステータス。既に閉じている予約では
    /// 最初の終端ステータスを保持し、戻り値だけを再計算する（返却フローの
    /// 再実行で評価調整が二重に適用されるのはこのため）。
    pub fn close(&mut self, return_date: NaiveDate) -> ReservationStatus {
        let status = resolve_return_status(return_date, self.till_date);
        if !self.status.is_terminal() {
            self.status = status;
        }
        status
    }
}
