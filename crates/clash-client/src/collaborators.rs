//! Narrow interfaces to the wallet, the contracts, metadata storage and the
//! minting backend.
//!
//! Methods return `Send` futures so reads can be fanned out on the runtime.

use crate::error::Result;
use battle_engine::{Address, Attack, BattleId, BattleRecord, TokenId};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio::sync::mpsc::UnboundedReceiver;

/// `BattleStarted` log emitted by the NFT contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStarted {
    pub battle_id: BattleId,
    pub player1: Address,
    pub player2: Address,
    pub token_id1: TokenId,
    pub token_id2: TokenId,
}

/// `AttackSubmitted` log emitted by the NFT contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSubmitted {
    pub battle_id: BattleId,
    pub player: Address,
    pub token_id: TokenId,
    pub attack: String,
}

/// ERC-721 `Transfer` log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub token_id: TokenId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub hash: String,
    pub block_number: u64,
}

/// A submitted transaction that can be awaited until it is mined.
pub trait PendingTx: Send {
    fn hash(&self) -> &str;

    fn wait(self) -> impl Future<Output = Result<TxReceipt>> + Send;
}

pub trait WalletConnector: Send + Sync {
    /// Ask the wallet for account access; resolves to the selected account.
    fn connect(&self) -> impl Future<Output = Result<Address>> + Send;

    fn disconnect(&self);

    fn current_address(&self) -> Option<Address>;

    /// Account lists pushed by the wallet. An empty list means the user
    /// revoked access.
    fn accounts_changed(&self) -> UnboundedReceiver<Vec<Address>>;
}

/// View calls and log queries against the game contracts.
pub trait ContractReader: Send + Sync {
    fn latest_block(&self) -> impl Future<Output = Result<u64>> + Send;

    fn get_battle(&self, battle_id: BattleId) -> impl Future<Output = Result<BattleRecord>> + Send;

    fn get_wins(&self, token_id: TokenId) -> impl Future<Output = Result<u64>> + Send;

    /// Id of the most recently started battle.
    fn get_battle_counter(&self) -> impl Future<Output = Result<BattleId>> + Send;

    fn query_battle_started_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> impl Future<Output = Result<Vec<BattleStarted>>> + Send;

    fn query_attack_submitted_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> impl Future<Output = Result<Vec<AttackSubmitted>>> + Send;

    fn query_transfer_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> impl Future<Output = Result<Vec<Transfer>>> + Send;

    fn tokens_of_owner(&self, owner: Address) -> impl Future<Output = Result<Vec<TokenId>>> + Send;

    fn token_uri(&self, token_id: TokenId) -> impl Future<Output = Result<String>> + Send;

    /// ERC-20 reward token balance in base units.
    fn token_balance(&self, owner: Address) -> impl Future<Output = Result<u128>> + Send;

    /// First, second and third place rewards in base units.
    fn place_rewards(&self) -> impl Future<Output = Result<[u128; 3]>> + Send;
}

/// State-changing calls, signed by the connected wallet.
pub trait ContractWriter: Send + Sync {
    type Tx: PendingTx;

    fn start_battle(
        &self,
        token_id1: TokenId,
        token_id2: TokenId,
        attack: Attack,
    ) -> impl Future<Output = Result<Self::Tx>> + Send;

    fn submit_attack(
        &self,
        battle_id: BattleId,
        token_id: TokenId,
        attack: Attack,
    ) -> impl Future<Output = Result<Self::Tx>> + Send;

    fn safe_mint(
        &self,
        owner: Address,
        metadata_uri: &str,
        value_wei: u128,
    ) -> impl Future<Output = Result<Self::Tx>> + Send;
}

/// Content-addressed blob store.
pub trait MetadataStore: Send + Sync {
    fn fetch(&self, content_id: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Backend that uploads fresh metadata and authorizes a mint.
pub trait MintingService: Send + Sync {
    fn mint(&self, owner: Address) -> impl Future<Output = Result<Vec<String>>> + Send;
}
