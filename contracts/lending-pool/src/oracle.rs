//! Price feed interface consumed by the pool.
//!
//! Every allowed token points at its own feed contract. A feed answers with
//! the most recent quote, scaled by 1e18, or `None` when it has nothing to
//! report.

use soroban_sdk::{contractclient, contracttype, log, Address, Env};

use crate::error::LendingError;

/// A single price observation in unit-of-account per whole token, 1e18 scale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceQuote {
    pub price: i128,
    /// Ledger timestamp (seconds) at which the quote was produced
    pub timestamp: u64,
}

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_price(env: Env) -> Option<PriceQuote>;
}

/// Fetches and validates the latest price from `feed`.
///
/// Any failure of the feed call itself, a missing quote, a non-positive price
/// or a quote older than `max_age` seconds is reported as `OracleUnavailable`.
pub fn latest_price(env: &Env, feed: &Address, max_age: u64) -> Result<i128, LendingError> {
    let client = PriceFeedClient::new(env, feed);

    let quote = match client.try_latest_price() {
        Ok(Ok(Some(quote))) => quote,
        _ => {
            log!(env, "price feed returned no quote", feed.clone());
            return Err(LendingError::OracleUnavailable);
        }
    };

    validate_quote(&quote, env.ledger().timestamp(), max_age).map_err(|err| {
        log!(env, "price feed quote rejected", feed.clone(), quote.price, quote.timestamp);
        err
    })
}

/// Checks a quote against the current ledger time.
///
/// Quotes stamped slightly ahead of `now` are treated as fresh.
pub fn validate_quote(quote: &PriceQuote, now: u64, max_age: u64) -> Result<i128, LendingError> {
    if quote.price <= 0 {
        return Err(LendingError::OracleUnavailable);
    }

    if now.saturating_sub(quote.timestamp) > max_age {
        return Err(LendingError::OracleUnavailable);
    }

    Ok(quote.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: i128, timestamp: u64) -> PriceQuote {
        PriceQuote { price, timestamp }
    }

    #[test]
    fn test_fresh_quote_accepted() {
        assert_eq!(validate_quote(&quote(2_000, 100), 150, 60), Ok(2_000));
        // Exactly at the age limit is still fresh
        assert_eq!(validate_quote(&quote(2_000, 100), 160, 60), Ok(2_000));
    }

    #[test]
    fn test_stale_quote_rejected() {
        assert_eq!(
            validate_quote(&quote(2_000, 100), 161, 60),
            Err(LendingError::OracleUnavailable)
        );
    }

    #[test]
    fn test_non_positive_price_rejected() {
        assert_eq!(
            validate_quote(&quote(0, 100), 100, 60),
            Err(LendingError::OracleUnavailable)
        );
        assert_eq!(
            validate_quote(&quote(-5, 100), 100, 60),
            Err(LendingError::OracleUnavailable)
        );
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        assert_eq!(validate_quote(&quote(7, 500), 100, 60), Ok(7));
    }
}
