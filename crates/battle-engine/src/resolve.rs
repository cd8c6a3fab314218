use crate::address::Address;
use crate::attacks::compare;
use crate::codec::decode_attack;
use crate::error::BattleError;
use crate::types::{BattleRecord, Winner};

/// Resolve a completed battle.
///
/// Malformed or missing attacks resolve to a draw so a bad record can never
/// break a battle list. Asking for the winner of a pending battle is a
/// caller bug and returns `IncompleteBattle`.
pub fn determine_winner(record: &BattleRecord) -> Result<Winner, BattleError> {
    if !record.is_completed() {
        return Err(BattleError::IncompleteBattle(record.battle_id));
    }
    Ok(compare(
        decode_attack(&record.attack1),
        decode_attack(&record.attack2),
    ))
}

/// Address of the winning player, `None` on a draw.
pub fn winner_address(record: &BattleRecord) -> Result<Option<Address>, BattleError> {
    Ok(match determine_winner(record)? {
        Winner::Player1 => Some(record.player1),
        Winner::Player2 => Some(record.player2),
        Winner::Draw => None,
    })
}
