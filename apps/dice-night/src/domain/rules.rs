use std::ops::RangeInclusive;

pub const PLAYERS: usize = 3;
pub const MAX_ROUNDS: u8 = 5;
pub const DIE_FACES: RangeInclusive<u8> = 1..=6;

/// Extra full turns per axis a die spins before settling (animation only).
pub const EXTRA_TURNS: RangeInclusive<u8> = 2..=4;

/// Built-in roster. Not configurable.
pub const DEFAULT_ROSTER: [&str; PLAYERS] = ["たいが", "さっちゃん", "パピー"];

/// Dice rolled per turn in a 1-based round: two, plus one extra in the final round.
pub fn dice_for_round(round_no: u8) -> Option<usize> {
    match round_no {
        0 => None,
        r if r < MAX_ROUNDS => Some(2),
        r if r == MAX_ROUNDS => Some(3),
        _ => None,
    }
}

/// Inclusive range a turn total can take in the given round.
pub fn total_range_for_round(round_no: u8) -> Option<RangeInclusive<u16>> {
    dice_for_round(round_no).map(|n| {
        let n = n as u16;
        n * (*DIE_FACES.start() as u16)..=n * (*DIE_FACES.end() as u16)
    })
}

pub fn default_roster() -> Vec<String> {
    DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect()
}
