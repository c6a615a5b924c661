use axum::http::HeaderMap;

/// 利用者名ヘッダー（上流で信頼される、認証なし）
pub const USER_NAME_HEADER: &str = "X-User-Name";

/// 管理者トークンヘッダー
pub const AUTHORIZATION_HEADER: &str = "X-Authorization";

/// ヘッダーの値を文字列として取り出す
///
/// 存在しない、空、またはASCIIとして読めない値は None。
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

pub fn user_name(headers: &HeaderMap) -> Option<&str> {
    header_value(headers, USER_NAME_HEADER)
}

pub fn authorization(headers: &HeaderMap) -> Option<&str> {
    header_value(headers, AUTHORIZATION_HEADER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-name", HeaderValue::from_static("Test_Max"));

        assert_eq!(user_name(&headers), Some("Test_Max"));
        assert_eq!(authorization(&headers), None);
    }

    #[test]
    fn test_empty_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_NAME_HEADER, HeaderValue::from_static(""));

        assert_eq!(user_name(&headers), None);
    }
}
