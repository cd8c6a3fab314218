//! Battle resolution for CryptoClash rock-paper-scissors NFT battles.
//!
//! Everything here is pure: records are fetched elsewhere and handed in.

pub mod address;
pub mod attacks;
pub mod classify;
pub mod codec;
pub mod error;
pub mod ranking;
pub mod resolve;
pub mod types;

pub use address::Address;
pub use classify::{classify, Partition};
pub use error::BattleError;
pub use ranking::{rank, reward_tiers, top_k, RewardTier, WinCount};
pub use resolve::{determine_winner, winner_address};
pub use types::{Attack, BattleId, BattleRecord, BattleStatus, TokenId, Winner};
