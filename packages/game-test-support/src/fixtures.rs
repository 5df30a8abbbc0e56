//! Dice-face fixtures for scripted games.

/// Players in every scripted game.
pub const PLAYERS: usize = 3;
/// Round in which a third die is rolled.
pub const FINAL_ROUND: usize = 5;

/// Dice rolled on the `turn`-th turn (0-based) of back-to-back three-player games.
pub fn dice_for_turn(turn: usize) -> usize {
    let turn_in_game = turn % (PLAYERS * FINAL_ROUND);
    if turn_in_game / PLAYERS + 1 == FINAL_ROUND {
        3
    } else {
        2
    }
}

/// Split `total` into `dice` faces in `1..=6`, largest first.
///
/// Panics when `total` cannot be made with that many dice.
pub fn split_total(total: u16, dice: usize) -> Vec<u8> {
    let dice_u16 = dice as u16;
    assert!(
        (dice_u16..=dice_u16 * 6).contains(&total),
        "total {total} cannot be rolled with {dice} dice"
    );
    let mut remaining = total;
    let mut faces = Vec::with_capacity(dice);
    for k in 0..dice {
        let dice_left = (dice - k - 1) as u16;
        let face = (remaining - dice_left).min(6);
        faces.push(face as u8);
        remaining -= face;
    }
    faces
}

/// Flatten per-turn totals into the face script a game will consume,
/// choosing two or three dice per turn by round.
pub fn faces_for_turns(totals: &[u16]) -> Vec<u8> {
    totals
        .iter()
        .enumerate()
        .flat_map(|(turn, &total)| split_total(total, dice_for_turn(turn)))
        .collect()
}

/// Totals from the reference game: A ends on 36, B on 35, C on 34.
pub const REFERENCE_TOTALS: [u16; 15] = [7, 9, 5, 4, 6, 8, 10, 3, 7, 9, 11, 2, 6, 6, 12];
