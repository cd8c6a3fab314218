//! Error types for the client.

use battle_engine::{Address, BattleError};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Client error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error.
    Config(String),
    /// Contract call or event query failed.
    Rpc(String),
    /// Wallet refused or is not connected.
    Wallet(String),
    /// Token metadata could not be resolved.
    Metadata(String),
    /// Minting service or mint transaction failed.
    Mint(String),
    /// Battle resolution error.
    Battle(BattleError),
    /// No other holder to battle against.
    NoOpponents,
    /// The chosen opponent holds no tokens.
    NoOpponentTokens(Address),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Rpc(msg) => write!(f, "rpc error: {msg}"),
            Error::Wallet(msg) => write!(f, "wallet error: {msg}"),
            Error::Metadata(msg) => write!(f, "metadata error: {msg}"),
            Error::Mint(msg) => write!(f, "mint error: {msg}"),
            Error::Battle(e) => write!(f, "battle error: {e}"),
            Error::NoOpponents => write!(f, "no opponents available"),
            Error::NoOpponentTokens(who) => write!(f, "no NFTs found for opponent {who}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Battle(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BattleError> for Error {
    fn from(e: BattleError) -> Self {
        Error::Battle(e)
    }
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
