//! Game session: the battle flow a connected player drives.

use crate::collaborators::{ContractReader, ContractWriter, MintingService, PendingTx, TxReceipt};
use crate::config::Config;
use crate::error::{Error, Result};
use battle_engine::{determine_winner, Address, Attack, BattleId, BattleRecord, TokenId, Winner};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

/// Decimals of the ERC-20 reward token.
pub const TOKEN_DECIMALS: u32 = 18;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartedBattle {
    pub battle_id: BattleId,
    pub opponent: Address,
    pub opponent_token: TokenId,
    pub receipt: TxReceipt,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleStatusReport {
    /// The opponent has not played yet.
    Waiting,
    /// Both sides played; `wins` is the total for the token asked about.
    Completed { winner: Winner, wins: u64 },
}

pub struct GameSession<R, W> {
    reader: Arc<R>,
    writer: W,
    player: Address,
    mint_price_wei: u128,
}

impl<R, W> GameSession<R, W>
where
    R: ContractReader,
    W: ContractWriter,
{
    pub fn new(reader: Arc<R>, writer: W, player: Address, config: &Config) -> Self {
        Self {
            reader,
            writer,
            player,
            mint_price_wei: config.mint_price_wei,
        }
    }

    pub fn player(&self) -> Address {
        self.player
    }

    /// Every address that ever received a token, in first-seen order.
    pub async fn holders(&self) -> Result<Vec<Address>> {
        let latest = self.reader.latest_block().await?;
        let transfers = self.reader.query_transfer_events(0, latest).await?;
        let mut holders: Vec<Address> = Vec::new();
        for transfer in transfers {
            if !transfer.to.is_zero() && !holders.contains(&transfer.to) {
                holders.push(transfer.to);
            }
        }
        Ok(holders)
    }

    /// Challenge a random holder's random token with `my_token`.
    pub async fn start_battle<G: Rng + Send>(
        &self,
        my_token: TokenId,
        attack: Attack,
        rng: &mut G,
    ) -> Result<StartedBattle> {
        let holders = self.holders().await?;
        let opponent = pick_opponent(&holders, &self.player, rng)?;
        let opponent_tokens = self.reader.tokens_of_owner(opponent).await?;
        let opponent_token = *opponent_tokens
            .choose(rng)
            .ok_or(Error::NoOpponentTokens(opponent))?;

        info!(
            my_token,
            opponent = %opponent,
            opponent_token,
            %attack,
            "Starting battle"
        );
        let tx = self.writer.start_battle(my_token, opponent_token, attack).await?;
        info!(tx = tx.hash(), "Start battle transaction sent");
        let receipt = tx.wait().await?;
        let battle_id = self.reader.get_battle_counter().await?;
        info!(battle_id, tx = %receipt.hash, block = receipt.block_number, "Battle started");

        Ok(StartedBattle {
            battle_id,
            opponent,
            opponent_token,
            receipt,
        })
    }

    /// Answer a challenge and return the battle as it reads after the
    /// transaction is mined, ready for `Partition::apply_update`.
    pub async fn submit_attack(
        &self,
        battle_id: BattleId,
        token_id: TokenId,
        attack: Attack,
    ) -> Result<BattleRecord> {
        info!(battle_id, token_id, %attack, "Submitting attack");
        let tx = self.writer.submit_attack(battle_id, token_id, attack).await?;
        info!(battle_id, tx = tx.hash(), "Attack transaction sent");
        let receipt = tx.wait().await?;
        info!(battle_id, tx = %receipt.hash, block = receipt.block_number, "Attack confirmed");
        self.reader.get_battle(battle_id).await
    }

    pub async fn check_status(&self, battle_id: BattleId, token_id: TokenId) -> Result<BattleStatusReport> {
        let battle = self.reader.get_battle(battle_id).await?;
        if !battle.is_completed() {
            return Ok(BattleStatusReport::Waiting);
        }
        let winner = determine_winner(&battle)?;
        let wins = self.reader.get_wins(token_id).await?;
        Ok(BattleStatusReport::Completed { winner, wins })
    }

    /// Mint every token the minting backend prepared for `owner`, in order.
    /// Stops at the first failed mint.
    pub async fn mint<S: MintingService>(&self, service: &S, owner: Address) -> Result<Vec<TxReceipt>> {
        let uris = service.mint(owner).await?;
        let mut receipts = Vec::with_capacity(uris.len());
        for uri in &uris {
            let tx = self
                .writer
                .safe_mint(owner, uri, self.mint_price_wei)
                .await
                .map_err(|e| Error::Mint(format!("safeMint {uri}: {e}")))?;
            info!(uri = %uri, tx = tx.hash(), "Mint transaction sent");
            let receipt = tx.wait().await.map_err(|e| {
                warn!(uri = %uri, error = %e, "Mint transaction failed");
                Error::Mint(format!("safeMint {uri}: {e}"))
            })?;
            info!(owner = %owner, uri = %uri, tx = %receipt.hash, "NFT minted");
            receipts.push(receipt);
        }
        Ok(receipts)
    }

    /// Reward token balance of `owner`, formatted in whole tokens.
    pub async fn token_balance(&self, owner: Address) -> Result<String> {
        let raw = self.reader.token_balance(owner).await?;
        format_units(raw, TOKEN_DECIMALS)
            .ok_or_else(|| Error::Config(format!("unsupported token decimals: {TOKEN_DECIMALS}")))
    }
}

/// Uniformly random holder other than `me`.
pub fn pick_opponent<G: Rng + ?Sized>(holders: &[Address], me: &Address, rng: &mut G) -> Result<Address> {
    let others: Vec<Address> = holders.iter().filter(|h| *h != me).copied().collect();
    others.choose(rng).copied().ok_or(Error::NoOpponents)
}

/// Render a base-unit amount with `decimals` places, trailing zeros trimmed
/// but keeping at least one fractional digit. `None` if `10^decimals` does
/// not fit in a `u128`.
pub fn format_units(amount: u128, decimals: u32) -> Option<String> {
    let scale = 10u128.checked_pow(decimals)?;
    let whole = amount / scale;
    let frac = amount % scale;
    let mut frac = format!("{frac:0width$}", width = decimals as usize);
    while frac.len() > 1 && frac.ends_with('0') {
        frac.pop();
    }
    if frac.is_empty() {
        frac.push('0');
    }
    Some(format!("{whole}.{frac}"))
}
