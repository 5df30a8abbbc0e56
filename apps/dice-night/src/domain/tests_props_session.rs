//! Property-based tests for the session state machine.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::domain::dice::{ScriptedDice, SeededDice};
use crate::domain::events::{GameEvent, NullSink};
use crate::domain::rules::{total_range_for_round, MAX_ROUNDS};
use crate::domain::session::GameSession;
use crate::domain::statistics::{win_rate_percent, PlayerStatistics};
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::{ConfigurationKind, DomainError};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: start deals a permutation of the roster with zero scores.
    #[test]
    fn prop_start_is_a_permutation(
        roster in test_gens::roster(),
        picks in test_gens::shuffle_picks(),
    ) {
        let mut dice = ScriptedDice::new(vec![1]).with_picks(picks);
        let session = GameSession::start(&roster, &mut dice).unwrap();

        let mut dealt: Vec<String> = session.players().iter().map(|p| p.name.clone()).collect();
        let mut expected = roster.clone();
        dealt.sort();
        expected.sort();
        prop_assert_eq!(dealt, expected);
        prop_assert!(session.players().iter().all(|p| p.score == 0));
        prop_assert_eq!(session.round(), 1);
        prop_assert_eq!(session.current_player_index(), 0);
    }

    /// Property: invalid rosters are rejected without a session.
    #[test]
    fn prop_wrong_size_roster_is_rejected(roster in test_gens::roster_wrong_size()) {
        let mut dice = ScriptedDice::new(vec![1]);
        let err = GameSession::start(&roster, &mut dice).unwrap_err();
        prop_assert!(
            matches!(err, DomainError::Configuration(ConfigurationKind::RosterSize, _)),
            "unexpected error {:?}", err
        );
    }

    #[test]
    fn prop_duplicate_roster_is_rejected(roster in test_gens::roster_with_duplicate()) {
        let mut dice = ScriptedDice::new(vec![1]);
        let err = GameSession::start(&roster, &mut dice).unwrap_err();
        prop_assert!(
            matches!(err, DomainError::Configuration(ConfigurationKind::DuplicateName, _)),
            "unexpected error {:?}", err
        );
    }

    /// Property: every player takes exactly MAX_ROUNDS turns, dice counts follow
    /// the round schedule, and each final score is the sum of that player's totals.
    #[test]
    fn prop_full_game_accounting(
        roster in test_gens::roster(),
        faces in test_gens::game_faces(),
    ) {
        let mut dice = ScriptedDice::new(faces);
        let mut session = GameSession::start(&roster, &mut dice).unwrap();
        let mut stats = PlayerStatistics::new(&roster);
        let mut events: Vec<GameEvent> = Vec::new();

        let mut turns: HashMap<String, u8> = HashMap::new();
        let mut sums: HashMap<String, u16> = HashMap::new();
        while !session.is_over() {
            let round = session.round();
            let resolved = session
                .roll_for_current_player(&mut dice, &mut stats, &mut events)
                .unwrap();
            let expected_dice = if round == MAX_ROUNDS { 3 } else { 2 };
            prop_assert_eq!(resolved.roll.faces.len(), expected_dice);
            prop_assert!(total_range_for_round(round).unwrap().contains(&resolved.roll.total));
            *turns.entry(resolved.player_name.clone()).or_default() += 1;
            *sums.entry(resolved.player_name).or_default() += resolved.roll.total;
        }

        prop_assert_eq!(turns.len(), roster.len());
        prop_assert!(turns.values().all(|&t| t == MAX_ROUNDS));
        for player in session.players() {
            prop_assert_eq!(sums[&player.name], player.score);
        }
        prop_assert_eq!(dice.faces_used(), test_gens::FACES_PER_GAME);

        let game_overs = events.iter().filter(|e| matches!(e, GameEvent::GameOver { .. })).count();
        prop_assert_eq!(game_overs, 1);
        prop_assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })), "last event should be GameOver");
    }

    /// Property: the winner set is non-empty, at most the roster, all at the top score.
    #[test]
    fn prop_winners_hold_the_top_score(
        roster in test_gens::roster(),
        faces in test_gens::game_faces(),
    ) {
        let mut dice = ScriptedDice::new(faces);
        let mut session = GameSession::start(&roster, &mut dice).unwrap();
        let mut stats = PlayerStatistics::new(&roster);
        let mut result = None;
        while !session.is_over() {
            let resolved = session
                .roll_for_current_player(&mut dice, &mut stats, &mut NullSink)
                .unwrap();
            result = resolved.game_over;
        }
        let result = result.unwrap();
        let top = session.players().iter().map(|p| p.score).max().unwrap();

        prop_assert!(!result.winners.is_empty() && result.winners.len() <= roster.len());
        prop_assert_eq!(result.winning_score, top);
        for name in &result.winners {
            let player = session.players().iter().find(|p| &p.name == name).unwrap();
            prop_assert_eq!(player.score, top);
        }
        let top_count = session.players().iter().filter(|p| p.score == top).count();
        prop_assert_eq!(top_count, result.winners.len());
    }

    /// Property: after N seeded games, everyone played N and won at most N,
    /// and reported win rates match the formula.
    #[test]
    fn prop_statistics_after_many_games(
        roster in test_gens::roster(),
        seed in any::<u64>(),
        games in 1u32..8,
    ) {
        let mut dice = SeededDice::new(Some(seed));
        let mut stats = PlayerStatistics::new(&roster);
        let mut session = GameSession::start(&roster, &mut dice).unwrap();
        let mut last_rates = Vec::new();

        for _ in 0..games {
            let mut events: Vec<GameEvent> = Vec::new();
            while !session.is_over() {
                session.roll_for_current_player(&mut dice, &mut stats, &mut events).unwrap();
            }
            if let Some(GameEvent::GameOver { win_rates, .. }) = events.pop() {
                last_rates = win_rates;
            }
            session = session.reset(&mut dice);
        }

        let total_wins: u32 = roster.iter().map(|n| stats.get(n).unwrap().wins).sum();
        prop_assert!(total_wins >= games, "every game has at least one winner");
        for name in &roster {
            let record = stats.get(name).unwrap();
            prop_assert_eq!(record.games_played, games);
            prop_assert!(record.wins <= games);
        }
        prop_assert_eq!(last_rates.len(), roster.len());
        for rate in &last_rates {
            prop_assert_eq!(rate.percentage, win_rate_percent(rate.wins, rate.games));
            prop_assert_eq!(rate.games, games);
        }
    }
}
