use crate::application::reservation::{self, ReservationDependencies};
use crate::domain::{
    Reservation, ReservationStatus, ReservationUid, Username,
    commands::{ReserveBook, ReturnBook},
};
use crate::ports::client_error::Result;
use crate::ports::reservation_client::ReservationClient as ReservationClientTrait;
use async_trait::async_trait;
use chrono::Utc;

use super::to_client_error;

/// 予約サービスのアプリケーション関数を直接呼ぶReservationClient
pub struct ReservationClient {
    deps: ReservationDependencies,
}

impl ReservationClient {
    pub fn new(deps: ReservationDependencies) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl ReservationClientTrait for ReservationClient {
    async fn list_reservations(&self, username: &Username) -> Result<Vec<Reservation>> {
        reservation::list_reservations(&self.deps, username)
            .await
            .map_err(to_client_error)
    }

    async fn get_reservation(&self, reservation_uid: ReservationUid) -> Result<Reservation> {
        reservation::get_reservation(&self.deps, reservation_uid)
            .await
            .map_err(to_client_error)
    }

    async fn rented_amount(&self, username: &Username) -> Result<u32> {
        reservation::rented_amount(&self.deps, username)
            .await
            .map_err(to_client_error)
    }

    async fn create_reservation(
        &self,
        username: &Username,
        command: &ReserveBook,
    ) -> Result<Reservation> {
        let today = Utc::now().date_naive();
        reservation::create_reservation(&self.deps, username.clone(), command.clone(), today)
            .await
            .map_err(to_client_error)
    }

    async fn close_reservation(
        &self,
        reservation_uid: ReservationUid,
        command: &ReturnBook,
    ) -> Result<ReservationStatus> {
        reservation::close_reservation(&self.deps, reservation_uid, command.clone())
            .await
            .map_err(to_client_error)
    }
}
