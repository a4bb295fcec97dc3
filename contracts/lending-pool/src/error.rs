use soroban_sdk::contracterror;

/// Errors returned by the lending pool.
///
/// Codes are part of the contract ABI and must stay stable.
#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LendingError {
    // Lifecycle / access control
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,

    // Input validation
    InvalidAmount = 4,
    TokenNotAllowed = 5,

    // Token movement
    TransferFailed = 6,

    // Ledger
    InsufficientFunds = 7,
    InsufficientDebt = 8,
    InsufficientLiquidity = 9,

    // Risk
    InsolventPosition = 10,

    // Oracle / math
    OracleUnavailable = 11,
    DivisionByZero = 12,
    ArithmeticOverflow = 13,

    // Guard
    ReentrantCall = 14,

    // Administration
    InvalidConfig = 15,
    LastAdmin = 16,
}
