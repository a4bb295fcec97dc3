//! Conversion between token amounts and the unit of account.

use soroban_sdk::{Address, Env, I256};

use crate::error::LendingError;
use crate::{oracle, storage};

/// Fixed-point scale shared by prices and health factors (18 decimals).
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// `a * b / denominator`, floored, with the product held in 256 bits.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, LendingError> {
    if denominator == 0 {
        return Err(LendingError::DivisionByZero);
    }

    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
        .ok_or(LendingError::ArithmeticOverflow)
}

/// Current validated price of `token` from its registered feed.
pub fn price_of(env: &Env, token: &Address) -> Result<i128, LendingError> {
    let feed = storage::price_feed(env, token).ok_or(LendingError::TokenNotAllowed)?;
    let config = storage::config(env)?;
    oracle::latest_price(env, &feed, config.max_price_age)
}

/// Value of `amount` (smallest token units) in the unit of account.
pub fn value_in_unit_of_account(
    env: &Env,
    token: &Address,
    amount: i128,
) -> Result<i128, LendingError> {
    if amount < 0 {
        return Err(LendingError::InvalidAmount);
    }

    let price = price_of(env, token)?;
    mul_div(env, amount, price, SCALE)
}

/// Amount of `token` worth `unit_amount` in the unit of account.
pub fn amount_from_unit_of_account(
    env: &Env,
    token: &Address,
    unit_amount: i128,
) -> Result<i128, LendingError> {
    if unit_amount < 0 {
        return Err(LendingError::InvalidAmount);
    }

    let price = price_of(env, token)?;
    mul_div(env, unit_amount, SCALE, price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floors() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 10, 3, 4), Ok(7));
        assert_eq!(mul_div(&env, 1, 15 * SCALE / 10, SCALE), Ok(1));
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        let env = Env::default();
        // 1e21 * 1e18 does not fit in i128 but the quotient does
        let amount = 1_000 * SCALE;
        assert_eq!(mul_div(&env, amount, SCALE, SCALE), Ok(amount));
    }

    #[test]
    fn test_mul_div_overflow() {
        let env = Env::default();
        assert_eq!(
            mul_div(&env, i128::MAX, 2, 1),
            Err(LendingError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 5, 5, 0), Err(LendingError::DivisionByZero));
    }
}
