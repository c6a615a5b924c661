use crate::domain::{Rating, Username};
use crate::ports::rating_store::{RatingStore as RatingStoreTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// RatingStoreのインメモリ実装
pub struct RatingStore {
    stars: Mutex<HashMap<Username, i32>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self {
            stars: Mutex::new(HashMap::new()),
        }
    }

    /// 初期評価付きでユーザーを登録する
    pub fn add_user(&self, username: Username, stars: i32) {
        if let Ok(mut map) = self.stars.lock() {
            map.insert(username, stars);
        }
    }

    /// ユーザーの現在の評価
    pub fn stars_of(&self, username: &Username) -> Option<i32> {
        self.stars.lock().ok()?.get(username).copied()
    }
}

impl Default for RatingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RatingStoreTrait for RatingStore {
    async fn find_rating(&self, username: &Username) -> Result<Option<Rating>> {
        let map = self.stars.lock().map_err(|e| e.to_string())?;
        Ok(map.get(username).map(|stars| Rating {
            username: username.clone(),
            stars: *stars,
        }))
    }

    async fn update_stars(&self, username: &Username, stars: i32) -> Result<bool> {
        let mut map = self.stars.lock().map_err(|e| e.to_string())?;
        match map.get_mut(username) {
            Some(current) => {
                *current = stars;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
