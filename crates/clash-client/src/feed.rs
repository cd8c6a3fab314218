//! Battle feed: rebuilds a player's battle lists from contract logs.
//!
//! Scans `BattleStarted`/`AttackSubmitted` over a recent block window, reads
//! every battle of the player concurrently, patches in attacks seen in the
//! logs and classifies the result. A battle that cannot be read is logged
//! and left out; it never sinks the whole board.

use crate::collaborators::{AttackSubmitted, BattleStarted, ContractReader};
use crate::config::Config;
use crate::error::Result;
use battle_engine::ranking::REWARD_PLACES;
use battle_engine::{
    classify, rank, reward_tiers, Address, BattleId, BattleRecord, Partition, RewardTier, TokenId,
    WinCount,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A player's classified battles.
#[derive(Clone, Debug, Default)]
pub struct BattleBoard {
    pub player: Option<Address>,
    pub partition: Partition,
    /// Battle id -> the token the player brought into it.
    pub tokens_in_battle: BTreeMap<BattleId, TokenId>,
}

impl BattleBoard {
    /// Whether `token_id` is locked in one of the player's pending battles.
    pub fn token_in_pending(&self, token_id: TokenId) -> bool {
        match &self.player {
            Some(player) => self.partition.pending_tokens(player).contains(&token_id),
            None => false,
        }
    }
}

pub struct BattleFeed<R> {
    reader: Arc<R>,
    lookback_blocks: u64,
    reward_places: usize,
}

impl<R> BattleFeed<R>
where
    R: ContractReader + 'static,
{
    pub fn new(reader: Arc<R>, lookback_blocks: u64) -> Self {
        Self {
            reader,
            lookback_blocks,
            reward_places: REWARD_PLACES,
        }
    }

    pub fn from_config(reader: Arc<R>, config: &Config) -> Self {
        Self::new(reader, config.lookback_blocks).with_reward_places(config.reward_places)
    }

    /// Limit the leaderboard to the first `places` places.
    pub fn with_reward_places(mut self, places: usize) -> Self {
        self.reward_places = places;
        self
    }

    /// Rebuild `player`'s battle board.
    pub async fn load(&self, player: Address) -> Result<BattleBoard> {
        let to_block = self.reader.latest_block().await?;
        let from_block = to_block.saturating_sub(self.lookback_blocks);

        let (started, attacks) = tokio::join!(
            self.reader.query_battle_started_events(from_block, to_block),
            self.reader.query_attack_submitted_events(from_block, to_block),
        );
        let (started, attacks) = (started?, attacks?);

        let mine: Vec<BattleStarted> = started
            .into_iter()
            .filter(|e| e.player1 == player || e.player2 == player)
            .collect();

        debug!(
            player = %player,
            from_block,
            to_block,
            battles = mine.len(),
            attack_logs = attacks.len(),
            "Scanned battle logs"
        );

        let ids: Vec<BattleId> = mine.iter().map(|e| e.battle_id).collect();
        let records = self
            .fetch_battles(&ids)
            .await
            .into_iter()
            .flatten()
            .map(|record| merge_attacks(record, &attacks));

        let partition = classify(records);
        let tokens_in_battle = partition
            .pending
            .iter()
            .chain(partition.completed.iter())
            .filter_map(|r| r.token_of(&player).map(|t| (r.battle_id, t)))
            .collect();

        info!(
            player = %player,
            pending = partition.pending.len(),
            completed = partition.completed.len(),
            "Battle board loaded"
        );

        Ok(BattleBoard {
            player: Some(player),
            partition,
            tokens_in_battle,
        })
    }

    /// Read battles concurrently. The result is in `ids` order; failed reads
    /// are `None`.
    pub async fn fetch_battles(&self, ids: &[BattleId]) -> Vec<Option<BattleRecord>> {
        let mut handles = JoinSet::new();
        for (idx, &battle_id) in ids.iter().enumerate() {
            let reader = Arc::clone(&self.reader);
            handles.spawn(async move { (idx, battle_id, reader.get_battle(battle_id).await) });
        }

        let mut slots: Vec<Option<BattleRecord>> = vec![None; ids.len()];
        while let Some(joined) = handles.join_next().await {
            match joined {
                Ok((idx, _, Ok(record))) => slots[idx] = Some(record),
                Ok((_, battle_id, Err(e))) => {
                    warn!(battle_id, error = %e, "Failed to read battle, skipping");
                }
                Err(e) => {
                    warn!(error = %e, "Battle read task panicked");
                }
            }
        }
        slots
    }

    /// Win counts for `tokens`, ranked. Tokens whose count cannot be read
    /// are skipped.
    pub async fn win_counts(&self, tokens: &[TokenId]) -> Vec<WinCount> {
        let mut handles = JoinSet::new();
        for &token_id in tokens {
            let reader = Arc::clone(&self.reader);
            handles.spawn(async move { (token_id, reader.get_wins(token_id).await) });
        }

        let mut counts = Vec::with_capacity(tokens.len());
        while let Some(joined) = handles.join_next().await {
            match joined {
                Ok((token_id, Ok(wins))) => counts.push((token_id, wins)),
                Ok((token_id, Err(e))) => {
                    warn!(token_id, error = %e, "Failed to read win count, skipping");
                }
                Err(e) => {
                    warn!(error = %e, "Win count task panicked");
                }
            }
        }
        rank(counts)
    }

    /// Reward-eligible leaders among `tokens` with the contract's place rewards.
    pub async fn leaderboard(&self, tokens: &[TokenId]) -> Result<Vec<RewardTier>> {
        let rewards = self.reader.place_rewards().await?;
        let counts = self.win_counts(tokens).await;
        Ok(reward_tiers(
            counts.into_iter().map(|w| (w.token_id, w.wins)),
            rewards,
            self.reward_places,
        ))
    }
}

/// Fill attacks the record is missing from the submission logs.
fn merge_attacks(mut record: BattleRecord, attacks: &[AttackSubmitted]) -> BattleRecord {
    for log in attacks.iter().filter(|a| a.battle_id == record.battle_id) {
        if log.player == record.player1 {
            if record.attack1.is_empty() {
                record.attack1 = log.attack.clone();
            }
        } else if log.player == record.player2 && record.attack2.is_empty() {
            record.attack2 = log.attack.clone();
        }
    }
    record
}
