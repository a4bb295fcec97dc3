//! Per-account, per-token bookkeeping.
//!
//! These functions only adjust recorded balances. Moving the tokens
//! themselves is the caller's job. Amounts are assumed to be positive; the
//! façade validates them before anything reaches the ledger.

use soroban_sdk::{Address, Env};

use crate::error::LendingError;
use crate::storage::{self, Position};

pub fn record_deposit(
    env: &Env,
    account: &Address,
    token: &Address,
    amount: i128,
) -> Result<Position, LendingError> {
    let mut position = storage::position(env, account, token);
    position.deposited = position
        .deposited
        .checked_add(amount)
        .ok_or(LendingError::ArithmeticOverflow)?;
    storage::set_position(env, account, token, &position);
    Ok(position)
}

pub fn record_withdrawal(
    env: &Env,
    account: &Address,
    token: &Address,
    amount: i128,
) -> Result<Position, LendingError> {
    let mut position = storage::position(env, account, token);
    if position.deposited < amount {
        return Err(LendingError::InsufficientFunds);
    }
    position.deposited -= amount;
    storage::set_position(env, account, token, &position);
    Ok(position)
}

pub fn record_borrow(
    env: &Env,
    account: &Address,
    token: &Address,
    amount: i128,
) -> Result<Position, LendingError> {
    let mut position = storage::position(env, account, token);
    position.borrowed = position
        .borrowed
        .checked_add(amount)
        .ok_or(LendingError::ArithmeticOverflow)?;
    storage::set_position(env, account, token, &position);
    Ok(position)
}

pub fn record_repay(
    env: &Env,
    account: &Address,
    token: &Address,
    amount: i128,
) -> Result<Position, LendingError> {
    let mut position = storage::position(env, account, token);
    if position.borrowed < amount {
        return Err(LendingError::InsufficientDebt);
    }
    position.borrowed -= amount;
    storage::set_position(env, account, token, &position);
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DataKey;
    use crate::LendingPool;
    use soroban_sdk::testutils::Address as _;

    fn setup() -> (Env, Address, Address, Address) {
        let env = Env::default();
        let pool = env.register(LendingPool, ());
        let account = Address::generate(&env);
        let token = Address::generate(&env);
        (env, pool, account, token)
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let (env, pool, account, token) = setup();

        env.as_contract(&pool, || {
            record_deposit(&env, &account, &token, 500).unwrap();
            let position = record_deposit(&env, &account, &token, 250).unwrap();
            assert_eq!(position.deposited, 750);

            let position = record_withdrawal(&env, &account, &token, 700).unwrap();
            assert_eq!(position.deposited, 50);
            assert_eq!(storage::position(&env, &account, &token).deposited, 50);
        });
    }

    #[test]
    fn test_withdrawal_beyond_deposit() {
        let (env, pool, account, token) = setup();

        env.as_contract(&pool, || {
            record_deposit(&env, &account, &token, 100).unwrap();
            assert_eq!(
                record_withdrawal(&env, &account, &token, 101),
                Err(LendingError::InsufficientFunds)
            );
            assert_eq!(storage::position(&env, &account, &token).deposited, 100);
        });
    }

    #[test]
    fn test_repay_beyond_debt() {
        let (env, pool, account, token) = setup();

        env.as_contract(&pool, || {
            assert_eq!(
                record_repay(&env, &account, &token, 1),
                Err(LendingError::InsufficientDebt)
            );

            record_borrow(&env, &account, &token, 40).unwrap();
            assert_eq!(
                record_repay(&env, &account, &token, 41),
                Err(LendingError::InsufficientDebt)
            );
            let position = record_repay(&env, &account, &token, 40).unwrap();
            assert_eq!(position.borrowed, 0);
        });
    }

    #[test]
    fn test_deposit_overflow() {
        let (env, pool, account, token) = setup();

        env.as_contract(&pool, || {
            record_deposit(&env, &account, &token, i128::MAX).unwrap();
            assert_eq!(
                record_deposit(&env, &account, &token, 1),
                Err(LendingError::ArithmeticOverflow)
            );
            assert_eq!(
                storage::position(&env, &account, &token).deposited,
                i128::MAX
            );
        });
    }

    #[test]
    fn test_empty_position_removed() {
        let (env, pool, account, token) = setup();
        let key = DataKey::Position(account.clone(), token.clone());

        env.as_contract(&pool, || {
            record_deposit(&env, &account, &token, 10).unwrap();
            record_borrow(&env, &account, &token, 5).unwrap();
            assert!(env.storage().persistent().has(&key));

            record_withdrawal(&env, &account, &token, 10).unwrap();
            assert!(env.storage().persistent().has(&key));

            record_repay(&env, &account, &token, 5).unwrap();
            assert!(!env.storage().persistent().has(&key));
            assert_eq!(storage::position(&env, &account, &token), Position::default());
        });
    }
}
