use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{BookUid, DomainError, LibraryUid};

/// 書籍の状態
///
/// よく使われる3つの状態以外にも、司書が付けた任意の大文字ラベル
/// （例: `DAMAGED`）を受け付ける。空文字列、小文字や空白を含むラベルは拒否する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BookCondition {
    Excellent,
    Good,
    Bad,
    /// その他のラベル
    Other(String),
}

impl BookCondition {
    pub fn as_str(&self) -> &str {
        match self {
            BookCondition::Excellent => "EXCELLENT",
            BookCondition::Good => "GOOD",
            BookCondition::Bad => "BAD",
            BookCondition::Other(label) => label,
        }
    }
}

impl FromStr for BookCondition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXCELLENT" => Ok(BookCondition::Excellent),
            "GOOD" => Ok(BookCondition::Good),
            "BAD" => Ok(BookCondition::Bad),
            label
                if !label.is_empty()
                    && !label
                        .chars()
                        .any(|c| c.is_lowercase() || c.is_whitespace()) =>
            {
                Ok(BookCondition::Other(label.to_string()))
            }
            other => Err(DomainError::InvalidCondition(other.to_string())),
        }
    }
}

impl TryFrom<String> for BookCondition {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BookCondition> for String {
    fn from(condition: BookCondition) -> Self {
        match condition {
            BookCondition::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BookCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 図書館
///
/// オーケストレーターからは読み取り専用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub library_uid: LibraryUid,
    pub name: String,
    pub address: String,
    pub city: String,
}

/// 書籍（カタログ上の書誌情報と現在の状態）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_uid: BookUid,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub condition: BookCondition,
}

/// 図書館に所蔵されている書籍と、その貸出可能冊数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBook {
    #[serde(flatten)]
    pub book: Book,
    pub available_count: u32,
}

/// 利用者向けの書籍サマリー（状態と冊数を含まない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub book_uid: BookUid,
    pub name: String,
    pub author: String,
    pub genre: String,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            book_uid: book.book_uid,
            name: book.name,
            author: book.author,
            genre: book.genre,
        }
    }
}

/// 貸出可能冊数の変更方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountChange {
    /// 貸出時（棚から1冊減らす）
    Decrement,
    /// 返却時（棚に1冊戻す）
    Increment,
}

impl CountChange {
    /// 変更後の冊数を計算する
    ///
    /// 不変条件：貸出可能冊数は負にならない。
    ///
    /// # エラー
    /// 0冊の状態で減らそうとした場合は`DomainError::NoCopiesLeft`
    pub fn apply(self, available_count: u32) -> Result<u32, DomainError> {
        match self {
            CountChange::Decrement => available_count
                .checked_sub(1)
                .ok_or(DomainError::NoCopiesLeft),
            CountChange::Increment => Ok(available_count.saturating_add(1)),
        }
    }
}

/// 書籍状態の更新結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionUpdate {
    /// 状態が変わった（破損などの検出）
    Changed,
    /// 既に同じ状態だった
    Unchanged,
}

/// `showAll` クエリパラメータの解釈
///
/// 真偽値として解釈できない値（未指定を含む）は false とみなす。
pub fn parse_show_all(raw: Option<&str>) -> bool {
    matches!(
        raw.map(str::trim),
        Some("1" | "t" | "T" | "true" | "TRUE" | "True")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_never_goes_negative() {
        assert_eq!(CountChange::Decrement.apply(2), Ok(1));
        assert_eq!(CountChange::Decrement.apply(1), Ok(0));
        assert_eq!(
            CountChange::Decrement.apply(0),
            Err(DomainError::NoCopiesLeft)
        );
    }

    #[test]
    fn test_increment_returns_book_to_shelf() {
        assert_eq!(CountChange::Increment.apply(0), Ok(1));
        assert_eq!(CountChange::Increment.apply(u32::MAX), Ok(u32::MAX));
    }

    #[test]
    fn test_parse_show_all_defaults_to_false() {
        assert!(parse_show_all(Some("true")));
        assert!(parse_show_all(Some("1")));
        assert!(parse_show_all(Some("True")));
        assert!(!parse_show_all(Some("false")));
        assert!(!parse_show_all(Some("yes")));
        assert!(!parse_show_all(Some("")));
        assert!(!parse_show_all(None));
    }

    #[test]
    fn test_library_book_wire_format_is_flat() {
        let book = LibraryBook {
            book: Book {
                book_uid: BookUid::new(),
                name: "Краткий курс C++ в 7 томах".to_string(),
                author: "Бьерн Страуструп".to_string(),
                genre: "Научная фантастика".to_string(),
                condition: BookCondition::Excellent,
            },
            available_count: 1,
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["condition"], "EXCELLENT");
        assert_eq!(json["availableCount"], 1);
        assert_eq!(json["bookUid"], book.book.book_uid.to_string());
    }

    #[test]
    fn test_condition_round_trips_through_str() {
        for condition in [
            BookCondition::Excellent,
            BookCondition::Good,
            BookCondition::Bad,
        ] {
            assert_eq!(condition.as_str().parse::<BookCondition>(), Ok(condition.clone()));
        }
    }

    #[test]
    fn test_condition_accepts_other_upper_case_labels() {
        assert_eq!(
            "DAMAGED".parse::<BookCondition>(),
            Ok(BookCondition::Other("DAMAGED".to_string()))
        );
        assert_eq!(
            serde_json::from_str::<BookCondition>("\"DAMAGED\"").unwrap(),
            BookCondition::Other("DAMAGED".to_string())
        );
        assert_eq!(
            serde_json::to_value(BookCondition::Other("TORN_COVER".to_string())).unwrap(),
            "TORN_COVER"
        );
        assert_eq!(serde_json::to_value(BookCondition::Good).unwrap(), "GOOD");
    }

    #[test]
    fn test_condition_rejects_blank_and_lower_case() {
        for raw in ["", "damaged", "Good", "VERY BAD"] {
            assert_eq!(
                raw.parse::<BookCondition>(),
                Err(DomainError::InvalidCondition(raw.to_string()))
            );
        }
        assert!(serde_json::from_str::<BookCondition>("\"worn\"").is_err());
    }
}
