//! Lending Pool Contract
//!
//! Account holders deposit allowed tokens as collateral, borrow other allowed
//! tokens against it, and repay or withdraw. Every token is priced through
//! its own price-feed contract, and withdrawals and borrows are only accepted
//! while the account's health factor stays at or above 1.0.
//!
//! Interest accrual and liquidation are out of scope: the health factor is
//! computed and exposed, but nothing acts on it beyond gating operations.

#![no_std]

use soroban_sdk::{contract, contractimpl, log, vec, Address, Env, Vec};

mod custody;
mod error;
mod events;
mod guard;
mod ledger;
mod oracle;
mod registry;
mod risk;
mod storage;
mod valuation;

pub use error::LendingError;
pub use oracle::{PriceFeed, PriceFeedClient, PriceQuote};
pub use risk::{
    HEALTH_FACTOR_CEILING, LIQUIDATION_PRECISION, LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR,
};
pub use storage::{AccountSummary, PoolConfig, Position};
pub use valuation::SCALE;

#[contract]
pub struct LendingPool;

#[contractimpl]
impl LendingPool {
    // ========================================================================
    // Administration
    // ========================================================================

    /// Initialize the pool with its first admin.
    ///
    /// # Arguments
    /// * `admin` - First entry of the admin list
    /// * `max_price_age` - Seconds after which a price quote is stale
    ///
    /// # Events
    /// Emits `init`
    pub fn initialize(env: Env, admin: Address, max_price_age: u64) -> Result<(), LendingError> {
        if storage::is_initialized(&env) {
            return Err(LendingError::AlreadyInitialized);
        }
        if max_price_age == 0 {
            return Err(LendingError::InvalidConfig);
        }

        admin.require_auth();

        storage::set_admins(&env, &vec![&env, admin.clone()]);
        storage::set_config(&env, &PoolConfig { max_price_age });

        events::initialized(&env, &admin, max_price_age);
        Ok(())
    }

    /// Add `new_admin` to the admin list (admin only). No-op if present.
    pub fn add_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), LendingError> {
        registry::require_admin(&env, &admin)?;

        let mut admins = storage::admins(&env)?;
        if !admins.contains(&new_admin) {
            admins.push_back(new_admin.clone());
            storage::set_admins(&env, &admins);
            events::admin_added(&env, &new_admin);
        }
        Ok(())
    }

    /// Remove `target` from the admin list (admin only). No-op if absent.
    ///
    /// The list can never become empty.
    pub fn remove_admin(env: Env, admin: Address, target: Address) -> Result<(), LendingError> {
        registry::require_admin(&env, &admin)?;

        let mut admins = storage::admins(&env)?;
        let Some(index) = admins.first_index_of(&target) else {
            return Ok(());
        };
        if admins.len() == 1 {
            return Err(LendingError::LastAdmin);
        }

        admins.remove(index);
        storage::set_admins(&env, &admins);
        events::admin_removed(&env, &target);
        Ok(())
    }

    /// Update the price staleness bound (admin only).
    pub fn set_max_price_age(
        env: Env,
        admin: Address,
        max_price_age: u64,
    ) -> Result<(), LendingError> {
        registry::require_admin(&env, &admin)?;
        if max_price_age == 0 {
            return Err(LendingError::InvalidConfig);
        }

        storage::set_config(&env, &PoolConfig { max_price_age });
        events::config_updated(&env, max_price_age);
        Ok(())
    }

    pub fn get_admins(env: Env) -> Result<Vec<Address>, LendingError> {
        storage::admins(&env)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, LendingError> {
        storage::config(&env)
    }

    // ========================================================================
    // Token registry
    // ========================================================================

    /// Allow `token` and point it at `price_feed` (admin only).
    ///
    /// Re-registering an allowed token only replaces its feed; the token keeps
    /// its first position in the allowed-token list.
    ///
    /// # Events
    /// Emits `tok_allow`
    pub fn register_token(
        env: Env,
        admin: Address,
        token: Address,
        price_feed: Address,
    ) -> Result<(), LendingError> {
        registry::require_admin(&env, &admin)?;
        registry::register_token(&env, &token, &price_feed);
        Ok(())
    }

    pub fn is_allowed(env: Env, token: Address) -> bool {
        registry::is_allowed(&env, &token)
    }

    /// Allowed tokens in registration order.
    pub fn get_allowed_tokens(env: Env) -> Vec<Address> {
        storage::allowed_tokens(&env)
    }

    pub fn get_price_feed(env: Env, token: Address) -> Option<Address> {
        storage::price_feed(&env, &token)
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Deposit `amount` of `token` as collateral.
    ///
    /// # Events
    /// Emits `deposit`
    pub fn deposit(
        env: Env,
        account: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), LendingError> {
        account.require_auth();
        validate_operation(&env, &token, amount)?;

        guard::non_reentrant(&env, || {
            custody::pull(&env, &token, &account, amount)?;
            ledger::record_deposit(&env, &account, &token, amount)?;
            events::movement(&env, events::DEPOSIT, &account, &token, amount);
            Ok(())
        })
    }

    /// Withdraw previously deposited collateral.
    ///
    /// Rejected with `InsolventPosition` if the account would be left with a
    /// health factor below 1.0; nothing is transferred in that case.
    ///
    /// # Events
    /// Emits `withdraw`
    pub fn withdraw(
        env: Env,
        account: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), LendingError> {
        account.require_auth();
        validate_operation(&env, &token, amount)?;

        guard::non_reentrant(&env, || {
            ledger::record_withdrawal(&env, &account, &token, amount)?;
            custody::release(&env, &token, &account, amount)?;
            risk::ensure_healthy(&env, &account)?;
            events::movement(&env, events::WITHDRAW, &account, &token, amount);
            Ok(())
        })
    }

    /// Borrow `amount` of `token` from the pool's custody.
    ///
    /// Solvency is evaluated after the new debt is recorded.
    ///
    /// # Events
    /// Emits `borrow`
    pub fn borrow(
        env: Env,
        account: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), LendingError> {
        account.require_auth();
        validate_operation(&env, &token, amount)?;

        guard::non_reentrant(&env, || {
            let available = custody::balance(&env, &token)?;
            if available < amount {
                log!(&env, "insufficient liquidity", token.clone(), available, amount);
                return Err(LendingError::InsufficientLiquidity);
            }

            custody::release(&env, &token, &account, amount)?;
            ledger::record_borrow(&env, &account, &token, amount)?;
            risk::ensure_healthy(&env, &account)?;
            events::movement(&env, events::BORROW, &account, &token, amount);
            Ok(())
        })
    }

    /// Repay up to the outstanding debt in `token`.
    ///
    /// # Events
    /// Emits `repay`
    pub fn repay(
        env: Env,
        account: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), LendingError> {
        account.require_auth();
        validate_operation(&env, &token, amount)?;

        guard::non_reentrant(&env, || {
            ledger::record_repay(&env, &account, &token, amount)?;
            custody::pull(&env, &token, &account, amount)?;
            events::movement(&env, events::REPAY, &account, &token, amount);
            Ok(())
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get_position(env: Env, account: Address, token: Address) -> Position {
        storage::position(&env, &account, &token)
    }

    pub fn get_deposited(env: Env, account: Address, token: Address) -> i128 {
        storage::position(&env, &account, &token).deposited
    }

    pub fn get_borrowed(env: Env, account: Address, token: Address) -> i128 {
        storage::position(&env, &account, &token).borrowed
    }

    pub fn get_value_in_unit_of_account(
        env: Env,
        token: Address,
        amount: i128,
    ) -> Result<i128, LendingError> {
        valuation::value_in_unit_of_account(&env, &token, amount)
    }

    pub fn get_amount_from_unit_of_account(
        env: Env,
        token: Address,
        unit_amount: i128,
    ) -> Result<i128, LendingError> {
        valuation::amount_from_unit_of_account(&env, &token, unit_amount)
    }

    pub fn get_account_collateral_value(env: Env, account: Address) -> Result<i128, LendingError> {
        risk::collateral_value(&env, &account)
    }

    pub fn get_account_borrowed_value(env: Env, account: Address) -> Result<i128, LendingError> {
        risk::borrowed_value(&env, &account)
    }

    pub fn get_account_summary(env: Env, account: Address) -> Result<AccountSummary, LendingError> {
        Ok(AccountSummary {
            collateral_value: risk::collateral_value(&env, &account)?,
            borrowed_value: risk::borrowed_value(&env, &account)?,
        })
    }

    /// Health factor with 18 decimals; `HEALTH_FACTOR_CEILING` when the
    /// account has no debt.
    pub fn get_health_factor(env: Env, account: Address) -> Result<i128, LendingError> {
        risk::health_factor(&env, &account)
    }
}

/// Checks shared by the four operations, before any state is touched.
fn validate_operation(env: &Env, token: &Address, amount: i128) -> Result<(), LendingError> {
    if !storage::is_initialized(env) {
        return Err(LendingError::NotInitialized);
    }
    if amount <= 0 {
        return Err(LendingError::InvalidAmount);
    }
    registry::ensure_allowed(env, token)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
