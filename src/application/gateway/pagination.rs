use serde::{Deserialize, Serialize};

use super::errors::{GatewayError, Result};

/// 既定のページ番号（1始まり）
pub const DEFAULT_PAGE: usize = 1;
/// 既定のページサイズ
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// ページ指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// クエリパラメータ `page` / `size` を解釈する
    ///
    /// 未指定または空文字列は既定値。数値でない値と0は拒否する。
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Result<Self> {
        Ok(Self {
            page: parse_positive("page", page, DEFAULT_PAGE)?,
            size: parse_positive("size", size, DEFAULT_PAGE_SIZE)?,
        })
    }
}

fn parse_positive(name: &str, raw: Option<&str>, default: usize) -> Result<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => match value.parse::<usize>() {
            Ok(0) | Err(_) => Err(GatewayError::BadRequest(format!(
                "{} must be a positive integer, got '{}'",
                name, value
            ))),
            Ok(parsed) => Ok(parsed),
        },
    }
}

/// ページングされたレスポンス
///
/// `total_elements` は返したページの件数であり、コレクション全体の件数ではない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub items: Vec<T>,
}

/// コレクションから `[(page-1)*size, min(page*size, len))` を切り出す
///
/// 開始位置がコレクションの末尾を越える場合は空のページを返す。
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let start = (request.page - 1).saturating_mul(request.size);
    let items: Vec<T> = items.into_iter().skip(start).take(request.size).collect();

    Page {
        page: request.page,
        page_size: request.size,
        total_elements: items.len(),
        items,
    }
}
