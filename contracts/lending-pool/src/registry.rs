//! Allowed-token registry and the admin gate that protects it.

use soroban_sdk::{log, Address, Env};

use crate::error::LendingError;
use crate::{events, storage};

/// Fails with `Unauthorized` unless `admin` is on the admin list, then
/// requires its signature.
pub fn require_admin(env: &Env, admin: &Address) -> Result<(), LendingError> {
    let admins = storage::admins(env)?;
    if !admins.contains(admin) {
        log!(env, "caller is not an admin", admin.clone());
        return Err(LendingError::Unauthorized);
    }
    admin.require_auth();
    Ok(())
}

/// Admits `token` (if new) and points it at `price_feed`, replacing any
/// previous feed.
pub fn register_token(env: &Env, token: &Address, price_feed: &Address) {
    let mut tokens = storage::allowed_tokens(env);
    if !tokens.contains(token) {
        tokens.push_back(token.clone());
        storage::set_allowed_tokens(env, &tokens);
    }

    storage::set_price_feed(env, token, price_feed);
    events::token_allowed(env, token, price_feed);
}

pub fn is_allowed(env: &Env, token: &Address) -> bool {
    storage::price_feed(env, token).is_some()
}

pub fn ensure_allowed(env: &Env, token: &Address) -> Result<(), LendingError> {
    if !is_allowed(env, token) {
        log!(env, "token is not allowed", token.clone());
        return Err(LendingError::TokenNotAllowed);
    }
    Ok(())
}
