use crate::domain::{Reservation, ReservationStatus, ReservationUid, Username};
use crate::ports::reservation_store::{ReservationStore as ReservationStoreTrait, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// ReservationStoreのインメモリ実装
pub struct ReservationStore {
    reservations: Mutex<Vec<Reservation>>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
        }
    }

    /// 保存済みの予約数
    pub fn len(&self) -> usize {
        self.reservations.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStoreTrait for ReservationStore {
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        let mut reservations = self.reservations.lock().map_err(|e| e.to_string())?;
        reservations.push(reservation.clone());
        Ok(())
    }

    async fn find_by_uid(&self, reservation_uid: ReservationUid) -> Result<Option<Reservation>> {
        let reservations = self.reservations.lock().map_err(|e| e.to_string())?;
        Ok(reservations
            .iter()
            .find(|r| r.reservation_uid == reservation_uid)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.lock().map_err(|e| e.to_string())?;
        Ok(reservations
            .iter()
            .filter(|r| &r.username == username)
            .cloned()
            .collect())
    }

    async fn count_rented(&self, username: &Username) -> Result<u32> {
        let reservations = self.reservations.lock().map_err(|e| e.to_string())?;
        let count = reservations
            .iter()
            .filter(|r| &r.username == username && r.status == ReservationStatus::Rented)
            .count();
        Ok(u32::try_from(count)?)
    }

    async fn update_status(
        &self,
        reservation_uid: ReservationUid,
        status: ReservationStatus,
    ) -> Result<bool> {
        let mut reservations = self.reservations.lock().map_err(|e| e.to_string())?;
        match reservations
            .iter_mut()
            .find(|r| r.reservation_uid == reservation_uid)
        {
            Some(reservation) => {
                reservation.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
