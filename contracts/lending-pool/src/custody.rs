//! Token movement between accounts and the pool's own custody.

use soroban_sdk::{log, token, Address, Env};

use crate::error::LendingError;

/// Moves `amount` of `token` from `from` into the pool.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), LendingError> {
    transfer(env, token, from, &env.current_contract_address(), amount)
}

/// Moves `amount` of `token` out of the pool to `to`.
pub fn release(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), LendingError> {
    transfer(env, token, &env.current_contract_address(), to, amount)
}

/// Balance of `token` held by the pool itself.
pub fn balance(env: &Env, token: &Address) -> Result<i128, LendingError> {
    let client = token::Client::new(env, token);
    match client.try_balance(&env.current_contract_address()) {
        Ok(Ok(balance)) => Ok(balance),
        _ => {
            log!(env, "custody balance query failed", token.clone());
            Err(LendingError::TransferFailed)
        }
    }
}

fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), LendingError> {
    let client = token::Client::new(env, token);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "token transfer failed", token.clone(), amount);
            Err(LendingError::TransferFailed)
        }
    }
}
