use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookCondition, BookUid, LibraryUid};

/// コマンド：書籍を予約して借りる
///
/// ゲートウェイの入力と予約サービスへのリクエスト本文を兼ねる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveBook {
    pub book_uid: BookUid,
    pub library_uid: LibraryUid,
    pub till_date: NaiveDate,
}

/// コマンド：書籍を返却する
///
/// 司書が書籍の状態を評価して返却日とともに送る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub condition: BookCondition,
    pub date: NaiveDate,
}
