//! RNG seed derivation for reproducible batches of games.

/// Derive the seed for one game of a simulated batch.
///
/// Same inputs always produce the same seed, and neighbouring game numbers
/// land far apart (SplitMix64 finalizer).
///
/// # Arguments
///
/// * `base` - Base seed for the whole batch (`--seed`, or drawn from the OS)
/// * `game_no` - 1-based game number within the batch
///
/// # Returns
///
/// Seed for that game's `SeededDice`; recorded in the game's metrics so the
/// game can be replayed on its own.
pub fn derive_game_seed(base: u64, game_no: u32) -> u64 {
    let mut z = base.wrapping_add((game_no as u64).wrapping_mul(0x9E3779B97F4A7C15));
    z ^= z >> 30;
    z = z.wrapping_mul(0xBF58476D1CE4E5B9);
    z ^= z >> 27;
    z = z.wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
