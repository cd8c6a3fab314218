use crate::address::Address;
use crate::types::{BattleId, BattleRecord, TokenId};

/// Battles split by status, each side in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    pub pending: Vec<BattleRecord>,
    pub completed: Vec<BattleRecord>,
}

/// Stable partition into pending and completed battles.
pub fn classify<I>(records: I) -> Partition
where
    I: IntoIterator<Item = BattleRecord>,
{
    let (completed, pending) = records.into_iter().partition(BattleRecord::is_completed);
    Partition { pending, completed }
}

/// Battles in which `player` takes either side.
pub fn battles_for<'a>(records: &'a [BattleRecord], player: &Address) -> Vec<&'a BattleRecord> {
    records.iter().filter(|r| r.involves(player)).collect()
}

impl Partition {
    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }

    /// Fold a freshly re-read battle into the lists.
    ///
    /// A battle that became completed moves from pending to the end of
    /// completed. A battle that is still pending replaces its old copy.
    /// Ids not seen before are appended to the side matching their status.
    pub fn apply_update(&mut self, updated: BattleRecord) {
        let id = updated.battle_id;
        let pending_idx = self.pending.iter().position(|r| r.battle_id == id);

        if updated.is_completed() {
            if let Some(idx) = pending_idx {
                self.pending.remove(idx);
            }
            match self.completed.iter_mut().find(|r| r.battle_id == id) {
                Some(existing) => *existing = updated,
                None => self.completed.push(updated),
            }
        } else {
            match pending_idx {
                Some(idx) => self.pending[idx] = updated,
                None => {
                    if !self.completed.iter().any(|r| r.battle_id == id) {
                        self.pending.push(updated);
                    }
                }
            }
        }
    }

    /// The pending battle the player should look at next.
    pub fn first_pending(&self) -> Option<&BattleRecord> {
        self.pending.first()
    }

    pub fn find(&self, battle_id: BattleId) -> Option<&BattleRecord> {
        self.pending
            .iter()
            .chain(self.completed.iter())
            .find(|r| r.battle_id == battle_id)
    }

    /// Pending battles where `player` was challenged and has yet to answer.
    pub fn awaiting(&self, player: &Address) -> Vec<&BattleRecord> {
        self.pending
            .iter()
            .filter(|r| r.player2 == *player && !r.player2_played)
            .collect()
    }

    /// Tokens of `player` that are tied up in pending battles.
    pub fn pending_tokens(&self, player: &Address) -> Vec<TokenId> {
        self.pending.iter().filter_map(|r| r.token_of(player)).collect()
    }
}
