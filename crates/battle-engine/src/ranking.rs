use crate::types::TokenId;

/// Number of reward-eligible places.
pub const REWARD_PLACES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WinCount {
    pub token_id: TokenId,
    pub wins: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardTier {
    /// 1-indexed place.
    pub place: u8,
    pub token_id: TokenId,
    pub wins: u64,
    /// Reward in token base units.
    pub reward: u128,
}

/// Sort by wins descending, ties by ascending token id.
pub fn rank<I>(counts: I) -> Vec<WinCount>
where
    I: IntoIterator<Item = (TokenId, u64)>,
{
    let mut ranked: Vec<WinCount> = counts
        .into_iter()
        .map(|(token_id, wins)| WinCount { token_id, wins })
        .collect();
    ranked.sort_unstable_by(|a, b| b.wins.cmp(&a.wins).then(a.token_id.cmp(&b.token_id)));
    ranked
}

pub fn top_k<I>(counts: I, k: usize) -> Vec<WinCount>
where
    I: IntoIterator<Item = (TokenId, u64)>,
{
    let mut ranked = rank(counts);
    ranked.truncate(k);
    ranked
}

/// Pair the top `places` leaders with the contract's place rewards (first,
/// second, third). At most [`REWARD_PLACES`] tiers; fewer ranked tokens
/// yields fewer tiers.
pub fn reward_tiers<I>(counts: I, rewards: [u128; REWARD_PLACES], places: usize) -> Vec<RewardTier>
where
    I: IntoIterator<Item = (TokenId, u64)>,
{
    top_k(counts, places.min(REWARD_PLACES))
        .into_iter()
        .zip(rewards)
        .enumerate()
        .map(|(i, (entry, reward))| RewardTier {
            place: i as u8 + 1,
            token_id: entry.token_id,
            wins: entry.wins,
            reward,
        })
        .collect()
}
