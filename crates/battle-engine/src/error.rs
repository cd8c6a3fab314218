use core::fmt;

use crate::types::BattleId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleError {
    /// An attack string that is not rock, paper or scissors.
    MalformedAttack(String),
    /// Winner requested for a battle that is still waiting on a player.
    IncompleteBattle(BattleId),
}

impl fmt::Display for BattleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleError::MalformedAttack(raw) => write!(f, "malformed attack: {raw:?}"),
            BattleError::IncompleteBattle(id) => write!(f, "battle {id} is not completed"),
        }
    }
}

impl std::error::Error for BattleError {}
