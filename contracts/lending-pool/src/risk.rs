//! Solvency assessment of an account.
//!
//! Health factor = risk-adjusted collateral value / borrowed value, scaled by
//! 1e18. Values at or above `MIN_HEALTH_FACTOR` are solvent. Nothing here
//! liquidates; the result only gates withdrawals and borrows.

use soroban_sdk::{log, Address, Env, I256};

use crate::error::LendingError;
use crate::storage::{self, Position};
use crate::valuation::{self, SCALE};

/// Share of collateral value counted toward solvency, in percent (80%)
pub const LIQUIDATION_THRESHOLD: i128 = 80;
pub const LIQUIDATION_PRECISION: i128 = 100;

/// Below this health factor a position is insolvent (1.0)
pub const MIN_HEALTH_FACTOR: i128 = SCALE;

/// Reported for accounts with no debt at all (100.0)
pub const HEALTH_FACTOR_CEILING: i128 = 100 * SCALE;

/// Sums the unit-of-account value of one side of every position the account
/// holds, across the full allowed-token set.
fn total_value(
    env: &Env,
    account: &Address,
    side: fn(&Position) -> i128,
) -> Result<i128, LendingError> {
    let mut total: i128 = 0;

    for token in storage::allowed_tokens(env).iter() {
        let amount = side(&storage::position(env, account, &token));
        // An empty balance is worth nothing whatever its feed says
        if amount == 0 {
            continue;
        }

        let value = valuation::value_in_unit_of_account(env, &token, amount)?;
        total = total
            .checked_add(value)
            .ok_or(LendingError::ArithmeticOverflow)?;
    }

    Ok(total)
}

pub fn collateral_value(env: &Env, account: &Address) -> Result<i128, LendingError> {
    total_value(env, account, |position| position.deposited)
}

pub fn borrowed_value(env: &Env, account: &Address) -> Result<i128, LendingError> {
    total_value(env, account, |position| position.borrowed)
}

/// Health factor from already computed aggregate values.
///
/// `collateral * 80 * 1e18 / (100 * borrowed)`, evaluated in 256 bits with a
/// single final division. Saturates at `i128::MAX`.
pub fn health_factor_from(env: &Env, collateral: i128, borrowed: i128) -> i128 {
    if borrowed == 0 {
        return HEALTH_FACTOR_CEILING;
    }

    let numerator = I256::from_i128(env, collateral)
        .mul(&I256::from_i128(env, LIQUIDATION_THRESHOLD))
        .mul(&I256::from_i128(env, SCALE));
    let denominator =
        I256::from_i128(env, borrowed).mul(&I256::from_i128(env, LIQUIDATION_PRECISION));

    numerator.div(&denominator).to_i128().unwrap_or(i128::MAX)
}

pub fn health_factor(env: &Env, account: &Address) -> Result<i128, LendingError> {
    let borrowed = borrowed_value(env, account)?;
    if borrowed == 0 {
        return Ok(HEALTH_FACTOR_CEILING);
    }

    let collateral = collateral_value(env, account)?;
    Ok(health_factor_from(env, collateral, borrowed))
}

/// Fails with `InsolventPosition` unless the account's current health factor
/// is at least `MIN_HEALTH_FACTOR`.
pub fn ensure_healthy(env: &Env, account: &Address) -> Result<(), LendingError> {
    let health_factor = health_factor(env, account)?;
    if health_factor < MIN_HEALTH_FACTOR {
        log!(env, "position would be insolvent", account.clone(), health_factor);
        return Err(LendingError::InsolventPosition);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_debt_reports_ceiling() {
        let env = Env::default();
        assert_eq!(health_factor_from(&env, 0, 0), HEALTH_FACTOR_CEILING);
        assert_eq!(
            health_factor_from(&env, 1_000 * SCALE, 0),
            HEALTH_FACTOR_CEILING
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let env = Env::default();
        let collateral = 1_000 * SCALE;

        assert_eq!(
            health_factor_from(&env, collateral, 800 * SCALE),
            MIN_HEALTH_FACTOR
        );
        assert!(health_factor_from(&env, collateral, 800 * SCALE + 1) < MIN_HEALTH_FACTOR);
        assert_eq!(health_factor_from(&env, collateral, 400 * SCALE), 2 * SCALE);
    }

    #[test]
    fn test_small_values_keep_precision() {
        let env = Env::default();
        // 80/100 evaluated first would truncate this to zero
        assert_eq!(health_factor_from(&env, 1, 1), 8 * SCALE / 10);
    }

    #[test]
    fn test_no_collateral_with_debt() {
        let env = Env::default();
        assert_eq!(health_factor_from(&env, 0, 1), 0);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let env = Env::default();
        assert_eq!(health_factor_from(&env, i128::MAX, 1), i128::MAX);
    }
}
