use crate::errors::{MerchantError, Result};

pub struct WithdrawalService;

impl WithdrawalService {
    /// Accepts a withdrawal when it is positive and does not exceed the
    /// available balance. Amounts are compared in whole cents, and the
    /// returned amount is the one to record, rounded to the cent.
    pub fn authorize(amount: f64, available: f64) -> Result<f64> {
        if !amount.is_finite() || to_cents(amount) <= 0 {
            return Err(MerchantError::InvalidAmount(amount));
        }
        if to_cents(amount) > to_cents(available) {
            return Err(MerchantError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        Ok(to_cents(amount) as f64 / 100.0)
    }
}

fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
