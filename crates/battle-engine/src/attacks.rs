use crate::types::{Attack, Winner};

/// Beats cycle: Rock -> Scissors -> Paper -> Rock
pub fn beats(attacker: Attack, defender: Attack) -> bool {
    let attacker_beats = match attacker {
        Attack::Rock => Attack::Scissors,
        Attack::Scissors => Attack::Paper,
        Attack::Paper => Attack::Rock,
    };
    attacker_beats == defender
}

/// Compare two played attacks. A side that has no valid attack never wins,
/// so anything short of two valid, different attacks is a draw.
pub fn compare(attack1: Option<Attack>, attack2: Option<Attack>) -> Winner {
    match (attack1, attack2) {
        (Some(a), Some(b)) if beats(a, b) => Winner::Player1,
        (Some(a), Some(b)) if beats(b, a) => Winner::Player2,
        _ => Winner::Draw,
    }
}
