use core::fmt;
use core::str::FromStr;

use crate::error::BattleError;
use crate::types::Attack;

/// Encode an attack as the lowercase string the contract stores.
pub fn encode_attack(attack: Attack) -> &'static str {
    match attack {
        Attack::Rock => "rock",
        Attack::Paper => "paper",
        Attack::Scissors => "scissors",
    }
}

/// Decode a stored attack string. Empty, unknown or differently-cased
/// values decode to `None`; the contract only ever compares exact strings.
pub fn decode_attack(raw: &str) -> Option<Attack> {
    match raw {
        "rock" => Some(Attack::Rock),
        "paper" => Some(Attack::Paper),
        "scissors" => Some(Attack::Scissors),
        _ => None,
    }
}

impl FromStr for Attack {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_attack(s).ok_or_else(|| BattleError::MalformedAttack(s.to_string()))
    }
}

impl fmt::Display for Attack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(encode_attack(*self))
    }
}
