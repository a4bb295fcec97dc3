//! Events published for indexers and other off-chain observers.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub const INITIALIZED: Symbol = symbol_short!("init");
pub const ADMIN_ADDED: Symbol = symbol_short!("adm_add");
pub const ADMIN_REMOVED: Symbol = symbol_short!("adm_rem");
pub const CONFIG_UPDATED: Symbol = symbol_short!("cfg_upd");
pub const TOKEN_ALLOWED: Symbol = symbol_short!("tok_allow");
pub const DEPOSIT: Symbol = symbol_short!("deposit");
pub const WITHDRAW: Symbol = symbol_short!("withdraw");
pub const BORROW: Symbol = symbol_short!("borrow");
pub const REPAY: Symbol = symbol_short!("repay");

pub fn initialized(env: &Env, admin: &Address, max_price_age: u64) {
    env.events()
        .publish((INITIALIZED,), (admin.clone(), max_price_age));
}

pub fn admin_added(env: &Env, admin: &Address) {
    env.events().publish((ADMIN_ADDED, admin.clone()), ());
}

pub fn admin_removed(env: &Env, admin: &Address) {
    env.events().publish((ADMIN_REMOVED, admin.clone()), ());
}

pub fn config_updated(env: &Env, max_price_age: u64) {
    env.events().publish((CONFIG_UPDATED,), max_price_age);
}

pub fn token_allowed(env: &Env, token: &Address, price_feed: &Address) {
    env.events()
        .publish((TOKEN_ALLOWED, token.clone()), price_feed.clone());
}

/// Publishes one of the four ledger movements (deposit, withdraw, borrow,
/// repay) under `(kind, account, token)` with the amount as data.
pub fn movement(env: &Env, kind: Symbol, account: &Address, token: &Address, amount: i128) {
    env.events()
        .publish((kind, account.clone(), token.clone()), amount);
}
