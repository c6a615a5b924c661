use serde::{Deserialize, Serialize};

use super::{DomainError, ReservationStatus, Username};

/// 評価の下限
pub const MIN_STARS: i32 = 0;
/// 評価の上限
pub const MAX_STARS: i32 = 100;
/// ペナルティ1件あたりの減点
pub const PENALTY_PER_FEE: i32 = 10;
/// 問題のない返却に対する加点
pub const CLEAN_RETURN_BONUS: i32 = 1;

/// 利用者の評価（信用スコア）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub username: Username,
    pub stars: i32,
}

/// 評価が範囲内であることを検証する
pub fn validate_stars(stars: i32) -> Result<i32, DomainError> {
    if (MIN_STARS..=MAX_STARS).contains(&stars) {
        Ok(stars)
    } else {
        Err(DomainError::StarsOutOfRange {
            min: MIN_STARS,
            max: MAX_STARS,
            actual: stars,
        })
    }
}

/// 新しい本を借りられるか
///
/// 評価が高いほど同時に借りられる冊数が増える。
/// 貸出中の冊数が評価以上であれば借りられない。
pub fn can_take_book(active_rentals: u32, stars: i32) -> bool {
    i64::from(active_rentals) < i64::from(stars)
}

/// 返却フローで検出された「悪い結果」の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeCounter(u32);

impl FeeCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// 延滞返却なら1件数える
    pub fn charge_status(&mut self, status: ReservationStatus) {
        if status == ReservationStatus::Expired {
            self.0 += 1;
        }
    }

    /// 書籍状態が変わっていれば1件数える
    pub fn charge_condition(&mut self, changed: bool) {
        if changed {
            self.0 += 1;
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// 返却結果から新しい評価を計算する
///
/// - ペナルティあり: `stars - 10 * fee`
/// - ペナルティなし: `stars + 1`
///
/// 結果は常に[0, 100]に丸められる。
pub fn adjust_stars(stars: i32, fee: FeeCounter) -> i32 {
    let stars = i64::from(stars);
    let adjusted = if fee.value() == 0 {
        stars + i64::from(CLEAN_RETURN_BONUS)
    } else {
        stars - i64::from(PENALTY_PER_FEE) * i64::from(fee.value())
    };

    // 範囲内に丸めてからi32に戻すので切り捨ては起きない
    adjusted.clamp(i64::from(MIN_STARS), i64::from(MAX_STARS)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(n: u32) -> FeeCounter {
        let mut counter = FeeCounter::new();
        for _ in 0..n {
            counter.charge_condition(true);
        }
        counter
    }

    #[test]
    fn test_clean_return_adds_one_star() {
        assert_eq!(adjust_stars(75, fee(0)), 76);
        assert_eq!(adjust_stars(0, fee(0)), 1);
    }

    #[test]
    fn test_clean_return_is_capped_at_max() {
        assert_eq!(adjust_stars(100, fee(0)), 100);
    }

    #[test]
    fn test_penalty_is_ten_per_fee() {
        assert_eq!(adjust_stars(75, fee(1)), 65);
        assert_eq!(adjust_stars(75, fee(2)), 55);
    }

    #[test]
    fn test_penalty_is_floored_at_min() {
        assert_eq!(adjust_stars(15, fee(2)), 0);
        assert_eq!(adjust_stars(0, fee(1)), 0);
    }

    #[test]
    fn test_adjust_matches_clamp_formula_for_all_inputs() {
        for stars in MIN_STARS..=MAX_STARS {
            for n in 0..=3u32 {
                let expected = if n == 0 {
                    (stars + 1).clamp(0, 100)
                } else {
                    (stars - 10 * n as i32).clamp(0, 100)
                };
                assert_eq!(adjust_stars(stars, fee(n)), expected);
            }
        }
    }

    #[test]
    fn test_fee_counter_counts_expired_and_condition_change() {
        let mut counter = FeeCounter::new();
        counter.charge_status(ReservationStatus::Returned);
        counter.charge_condition(false);
        assert_eq!(counter.value(), 0);

        counter.charge_status(ReservationStatus::Expired);
        counter.charge_condition(true);
        assert_eq!(counter.value(), 2);
    }

    #[test]
    fn test_can_take_book_rejects_when_rentals_reach_rating() {
        assert!(!can_take_book(3, 3));
        assert!(can_take_book(2, 3));
        assert!(!can_take_book(0, 0));
        assert!(!can_take_book(5, 3));
    }

    #[test]
    fn test_validate_stars_range() {
        assert_eq!(validate_stars(0), Ok(0));
        assert_eq!(validate_stars(100), Ok(100));
        assert!(validate_stars(-1).is_err());
        assert!(validate_stars(101).is_err());
    }
}
