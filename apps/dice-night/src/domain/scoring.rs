use crate::domain::state::{Player, Standing};

/// Players ordered by score, highest first. Ties keep their turn order.
pub fn rankings(players: &[Player]) -> Vec<Standing> {
    let mut sorted: Vec<Standing> = players.iter().map(Standing::from).collect();
    // `sort_by` is stable
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted
}

/// Everyone sharing the top score, in ranking order, plus that score.
pub fn winners(rankings: &[Standing]) -> (Vec<String>, u16) {
    let Some(top) = rankings.first().map(|s| s.score) else {
        return (Vec::new(), 0);
    };
    let names = rankings
        .iter()
        .filter(|s| s.score == top)
        .map(|s| s.name.clone())
        .collect();
    (names, top)
}
