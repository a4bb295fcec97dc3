//! Persisted state layout and typed accessors.
//!
//! Instance storage holds the small, contract-wide records (admin list,
//! configuration, allowed-token set, reentrancy lock). Persistent storage holds
//! the per-token price-feed references and the per-account ledger positions.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::error::LendingError;

// Ledger counts at ~5s per ledger
const INSTANCE_LIFETIME_THRESHOLD: u32 = 100_800; // ~7 days
const INSTANCE_BUMP_AMOUNT: u32 = 518_400; // ~30 days
const ENTRY_LIFETIME_THRESHOLD: u32 = 518_400; // ~30 days
const ENTRY_BUMP_AMOUNT: u32 = 3_110_400; // ~180 days

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admins,
    Config,
    AllowedTokens,
    Lock,
    PriceFeed(Address),
    /// (account, token)
    Position(Address, Address),
}

/// Runtime-tunable pool parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Maximum age in seconds of a price quote before it is rejected as stale
    pub max_price_age: u64,
}

/// Ledger entry for one (account, token) pair, in the token's smallest unit.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub deposited: i128,
    pub borrowed: i128,
}

impl Position {
    pub fn is_empty(&self) -> bool {
        self.deposited == 0 && self.borrowed == 0
    }
}

/// Aggregate valuation of an account in the unit of account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountSummary {
    pub collateral_value: i128,
    pub borrowed_value: i128,
}

// ---------------------------------------------------------------------------
// TTL
// ---------------------------------------------------------------------------

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn extend_entry(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, ENTRY_LIFETIME_THRESHOLD, ENTRY_BUMP_AMOUNT);
}

// ---------------------------------------------------------------------------
// Lifecycle / administration
// ---------------------------------------------------------------------------

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admins)
}

pub fn admins(env: &Env) -> Result<Vec<Address>, LendingError> {
    env.storage()
        .instance()
        .get(&DataKey::Admins)
        .ok_or(LendingError::NotInitialized)
}

pub fn set_admins(env: &Env, admins: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Admins, admins);
    extend_instance(env);
}

pub fn config(env: &Env) -> Result<PoolConfig, LendingError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(LendingError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance(env);
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub fn allowed_tokens(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::AllowedTokens)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_allowed_tokens(env: &Env, tokens: &Vec<Address>) {
    env.storage().instance().set(&DataKey::AllowedTokens, tokens);
    extend_instance(env);
}

pub fn price_feed(env: &Env, token: &Address) -> Option<Address> {
    let key = DataKey::PriceFeed(token.clone());
    let feed = env.storage().persistent().get(&key);
    if feed.is_some() {
        extend_entry(env, &key);
    }
    feed
}

pub fn set_price_feed(env: &Env, token: &Address, feed: &Address) {
    let key = DataKey::PriceFeed(token.clone());
    env.storage().persistent().set(&key, feed);
    extend_entry(env, &key);
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

pub fn position(env: &Env, account: &Address, token: &Address) -> Position {
    let key = DataKey::Position(account.clone(), token.clone());
    match env.storage().persistent().get(&key) {
        Some(position) => {
            extend_entry(env, &key);
            position
        }
        None => Position::default(),
    }
}

/// Writes a position back, dropping the entry once both balances are zero.
pub fn set_position(env: &Env, account: &Address, token: &Address, position: &Position) {
    let key = DataKey::Position(account.clone(), token.clone());
    if position.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, position);
        extend_entry(env, &key);
    }
    extend_instance(env);
}

// ---------------------------------------------------------------------------
// Reentrancy lock
// ---------------------------------------------------------------------------

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Lock)
}

pub fn set_lock(env: &Env) {
    env.storage().instance().set(&DataKey::Lock, &true);
}

pub fn clear_lock(env: &Env) {
    env.storage().instance().remove(&DataKey::Lock);
}
