//! ゲートウェイから下流サービスへのreqwestクライアント。
//!
//! 非成功レスポンスは `ClientError::Status` になり、下流のエラー本文に
//! `message` があればそれを保持する。

pub mod catalog_client;
pub mod rating_client;
pub mod reservation_client;

pub use catalog_client::CatalogClient;
pub use rating_client::RatingClient;
pub use reservation_client::ReservationClient;

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::ports::ClientError;
use crate::ports::client_error::Result;

/// 下流リクエスト1回あたりの既定タイムアウト
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 全クライアントで共有するHTTPクライアントを組み立てる
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ClientError::Request(e.to_string()))
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// reqwestの失敗をリクエスト構築エラーか通信エラーに分類する
pub(crate) fn send_error(err: reqwest::Error) -> ClientError {
    if err.is_builder() {
        ClientError::Request(err.to_string())
    } else {
        ClientError::Transport(Box::new(err))
    }
}

async fn failure(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return send_error(e),
    };

    let message = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(&body).to_string());

    let message = if message.trim().is_empty() {
        format!("downstream service responded with {}", status)
    } else {
        message
    };

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

pub(crate) async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(failure(response).await)
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    expect_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use serde_json::json;

    async fn spawn_status_server(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/probe", get(move || async move { (status, body) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{addr}")
    }

    async fn probe(base_url: &str) -> Result<serde_json::Value> {
        let response = build_client()?
            .get(endpoint(base_url, "/probe"))
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("http://rating:8050/", "/api/v1/rating/"),
            "http://rating:8050/api/v1/rating/"
        );
    }

    #[tokio::test]
    async fn test_error_envelope_message_is_extracted() {
        let body = r#"{"message":"username not found"}"#;
        let base_url = spawn_status_server(StatusCode::NOT_FOUND, body).await;

        match probe(&base_url).await {
            Err(ClientError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "username not found");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plain_text_error_body_is_kept() {
        let base_url = spawn_status_server(StatusCode::BAD_GATEWAY, "upstream down").await;

        assert!(matches!(
            probe(&base_url).await,
            Err(ClientError::Status { status: 502, message }) if message == "upstream down"
        ));
    }

    #[tokio::test]
    async fn test_invalid_success_body_is_decode_error() {
        let base_url = spawn_status_server(StatusCode::OK, "not json").await;

        assert!(matches!(probe(&base_url).await, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let base_url = spawn_status_server(StatusCode::OK, r#"{"stars":75}"#).await;

        assert_eq!(probe(&base_url).await.unwrap(), json!({ "stars": 75 }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert!(matches!(
            probe(&format!("http://{addr}")).await,
            Err(ClientError::Transport(_))
        ));
    }
}
