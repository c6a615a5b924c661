use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::errors::DomainError;

/// 図書館UID - カタログコンテキストの図書館識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryUid(Uuid);

impl LibraryUid {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for LibraryUid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LibraryUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 書籍UID - カタログコンテキストの書籍識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookUid(Uuid);

impl BookUid {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookUid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 予約UID - 予約管理コンテキストの集約ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationUid(Uuid);

impl ReservationUid {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for ReservationUid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ユーザー名
///
/// 上流から `X-User-Name` ヘッダーで渡される（認証はされない）。
/// 不変条件：空文字列ではない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// 空白のみの名前は拒否する
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::MissingUsername);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_serializes_as_plain_string() {
        let uuid = Uuid::parse_str("83575e12-7ce0-48ee-9931-51919ff3c9ee").unwrap();
        let uid = LibraryUid::from_uuid(uuid);

        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"83575e12-7ce0-48ee-9931-51919ff3c9ee\"");
        assert_eq!(uid.to_string(), "83575e12-7ce0-48ee-9931-51919ff3c9ee");
    }

    #[test]
    fn test_username_rejects_blank() {
        assert_eq!(Username::new(""), Err(DomainError::MissingUsername));
        assert_eq!(Username::new("   "), Err(DomainError::MissingUsername));
        assert_eq!(Username::new("Test_Max").unwrap().as_str(), "Test_Max");
    }
}
