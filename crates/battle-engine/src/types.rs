use crate::address::Address;

pub type TokenId = u64;
pub type BattleId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Attack {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Attack {
    pub const ALL: [Attack; 3] = [Attack::Rock, Attack::Paper, Attack::Scissors];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    Player1,
    Player2,
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleStatus {
    Pending,
    Completed,
}

/// A battle as read back from the NFT contract.
///
/// Attacks are kept as the raw strings the contract stores; an empty string
/// means the player has not played yet. Use [`crate::codec::decode_attack`]
/// to interpret them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecord {
    pub battle_id: BattleId,
    pub player1: Address,
    pub player2: Address,
    pub token_id1: TokenId,
    pub token_id2: TokenId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack1: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack2: String,
    pub player1_played: bool,
    pub player2_played: bool,
}

impl BattleRecord {
    /// Completed iff both players have played.
    pub fn status(&self) -> BattleStatus {
        if self.player1_played && self.player2_played {
            BattleStatus::Completed
        } else {
            BattleStatus::Pending
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status() == BattleStatus::Completed
    }

    pub fn involves(&self, player: &Address) -> bool {
        self.player1 == *player || self.player2 == *player
    }

    /// The token `player` brought into this battle, if they are in it.
    pub fn token_of(&self, player: &Address) -> Option<TokenId> {
        if self.player1 == *player {
            Some(self.token_id1)
        } else if self.player2 == *player {
            Some(self.token_id2)
        } else {
            None
        }
    }
}
