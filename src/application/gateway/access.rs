use std::fmt;

use crate::domain::{DomainError, Username};

use super::errors::{GatewayError, Result};

/// 管理者用エンドポイントの共有シークレット
///
/// `X-Authorization` ヘッダーの値と完全一致で比較される。
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn matches(&self, presented: Option<&str>) -> bool {
        presented == Some(self.0.as_str())
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(***)")
    }
}

/// 管理者トークンを検証する
pub fn require_admin(token: &AdminToken, presented: Option<&str>) -> Result<()> {
    if token.matches(presented) {
        Ok(())
    } else {
        Err(GatewayError::Unauthorized)
    }
}

/// `X-User-Name` ヘッダーの値をユーザー名として検証する
pub fn require_username(raw: Option<&str>) -> Result<Username> {
    let raw = raw.ok_or(DomainError::MissingUsername)?;
    Ok(Username::new(raw)?)
}
