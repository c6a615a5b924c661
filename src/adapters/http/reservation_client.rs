use crate::api::headers::USER_NAME_HEADER;
use crate::api::types::AmountResponse;
use crate::domain::{
    Reservation, ReservationStatus, ReservationUid, Username,
    commands::{ReserveBook, ReturnBook},
};
use crate::ports::client_error::Result;
use crate::ports::reservation_client::ReservationClient as ReservationClientTrait;
use async_trait::async_trait;
use reqwest::StatusCode;

use super::{decode, endpoint, expect_success, send_error};

/// 予約サービスのHTTPクライアント
#[derive(Clone)]
pub struct ReservationClient {
    base_url: String,
    client: reqwest::Client,
}

impl ReservationClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn info_url(&self, reservation_uid: ReservationUid) -> String {
        endpoint(
            &self.base_url,
            &format!("/api/v1/reservations/info/{}", reservation_uid),
        )
    }
}

#[async_trait]
impl ReservationClientTrait for ReservationClient {
    async fn list_reservations(&self, username: &Username) -> Result<Vec<Reservation>> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/api/v1/reservations"))
            .header(USER_NAME_HEADER, username.as_str())
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    async fn get_reservation(&self, reservation_uid: ReservationUid) -> Result<Reservation> {
        let response = self
            .client
            .get(self.info_url(reservation_uid))
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    async fn rented_amount(&self, username: &Username) -> Result<u32> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/api/v1/reservations/amount"))
            .header(USER_NAME_HEADER, username.as_str())
            .send()
            .await
            .map_err(send_error)?;

        let amount: AmountResponse = decode(response).await?;
        Ok(amount.amount)
    }

    async fn create_reservation(
        &self,
        username: &Username,
        command: &ReserveBook,
    ) -> Result<Reservation> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "/api/v1/reservations"))
            .header(USER_NAME_HEADER, username.as_str())
            .json(command)
            .send()
            .await
            .map_err(send_error)?;
        decode(response).await
    }

    /// 204ならEXPIRED、それ以外の成功はRETURNED
    async fn close_reservation(
        &self,
        reservation_uid: ReservationUid,
        command: &ReturnBook,
    ) -> Result<ReservationStatus> {
        let response = self
            .client
            .put(self.info_url(reservation_uid))
            .json(command)
            .send()
            .await
            .map_err(send_error)?;

        let response = expect_success(response).await?;
        Ok(if response.status() == StatusCode::NO_CONTENT {
            ReservationStatus::Expired
        } else {
            ReservationStatus::Returned
        })
    }
}
