use serde::{Deserialize, Serialize};

use crate::domain::dice::RandomSource;
use crate::domain::rules::dice_for_round;

/// Faces rolled for a single turn and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub faces: Vec<u8>,
    pub total: u16,
}

impl DiceRoll {
    pub fn from_faces(faces: Vec<u8>) -> Self {
        let total = faces.iter().map(|&f| f as u16).sum();
        Self { faces, total }
    }
}

/// Roll the dice for one turn of `round_no`. `None` outside the round schedule.
pub fn roll_for_round<R: RandomSource + ?Sized>(round_no: u8, rng: &mut R) -> Option<DiceRoll> {
    let count = dice_for_round(round_no)?;
    let faces = (0..count).map(|_| rng.roll_die()).collect();
    Some(DiceRoll::from_faces(faces))
}

/// Target orientation for a die's spin animation, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DieSpin {
    pub face: u8,
    pub rotate_x: i32,
    pub rotate_y: i32,
}

/// Orientation (x, y) at which `face` shows on top.
pub fn resting_rotation(face: u8) -> (i32, i32) {
    match face {
        2 => (0, -90),
        3 => (-90, 0),
        4 => (90, 0),
        5 => (0, 90),
        6 => (0, 180),
        _ => (0, 0),
    }
}

/// Resting orientation plus a few extra full turns on each axis.
pub fn spin_for<R: RandomSource + ?Sized>(face: u8, rng: &mut R) -> DieSpin {
    let (x, y) = resting_rotation(face);
    let extra_x = rng.extra_turns() as i32 * 360;
    let extra_y = rng.extra_turns() as i32 * 360;
    DieSpin {
        face,
        rotate_x: x + extra_x,
        rotate_y: y + extra_y,
    }
}
