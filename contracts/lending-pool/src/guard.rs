//! Explicit reentrancy lock around the mutating entry points.
//!
//! The host already rejects contract re-entry, but the ledger must not depend
//! on that policy: a token or price-feed contract that manages to call back
//! into the pool while an operation is in flight gets `ReentrantCall`.

use soroban_sdk::{log, Env};

use crate::error::LendingError;
use crate::storage;

/// Runs `op` while holding the pool lock.
///
/// On failure the host discards the whole invocation, including the lock
/// write, so the lock is only ever observed set from inside `op`.
pub fn non_reentrant<T, F>(env: &Env, op: F) -> Result<T, LendingError>
where
    F: FnOnce() -> Result<T, LendingError>,
{
    if storage::is_locked(env) {
        log!(env, "rejected re-entrant call");
        return Err(LendingError::ReentrantCall);
    }

    storage::set_lock(env);
    let result = op();
    storage::clear_lock(env);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LendingPool;

    #[test]
    fn test_lock_released_after_operation() {
        let env = Env::default();
        let pool = env.register(LendingPool, ());

        env.as_contract(&pool, || {
            let value = non_reentrant(&env, || {
                assert!(storage::is_locked(&env));
                Ok(7u32)
            });
            assert_eq!(value, Ok(7));
            assert!(!storage::is_locked(&env));
        });
    }

    #[test]
    fn test_nested_call_rejected() {
        let env = Env::default();
        let pool = env.register(LendingPool, ());

        env.as_contract(&pool, || {
            let outer = non_reentrant(&env, || {
                let inner = non_reentrant(&env, || Ok(()));
                assert_eq!(inner, Err(LendingError::ReentrantCall));
                Ok(())
            });
            assert_eq!(outer, Ok(()));
        });
    }

    #[test]
    fn test_rejected_while_locked() {
        let env = Env::default();
        let pool = env.register(LendingPool, ());

        env.as_contract(&pool, || {
            storage::set_lock(&env);
            let mut ran = false;
            let result = non_reentrant(&env, || {
                ran = true;
                Ok(())
            });
            assert_eq!(result, Err(LendingError::ReentrantCall));
            assert!(!ran);
        });
    }
}
