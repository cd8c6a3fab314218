//! # CryptoClash client
//!
//! Reads battles, win counts and NFT metadata through narrow collaborator
//! traits and hands the fetched records to `battle-engine` for resolution.
//!
//! ## Pieces
//! - [`BattleFeed`] - event scan + concurrent battle reads, classified
//! - [`GameSession`] - start/answer/check battles, mint, balances
//! - [`NftCatalog`] - token metadata from content-addressed storage
//! - [`WalletSession`] - connection state driven by account changes

pub mod catalog;
pub mod collaborators;
pub mod config;
mod error;
pub mod feed;
pub mod session;
pub mod telemetry;
pub mod wallet;

pub use catalog::NftCatalog;
pub use config::Config;
pub use error::{Error, Result};
pub use feed::{BattleBoard, BattleFeed};
pub use session::GameSession;
pub use wallet::WalletSession;
