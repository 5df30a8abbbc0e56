use game_test_support::{faces_for_turns, REFERENCE_TOTALS};

use crate::domain::dice::ScriptedDice;
use crate::domain::events::{GameEvent, NullSink};
use crate::domain::rules::MAX_ROUNDS;
use crate::domain::session::GameSession;
use crate::domain::state::{PhaseKind, SessionPhase, Standing};
use crate::domain::statistics::{PlayerRecord, PlayerStatistics};
use crate::errors::domain::{ConfigurationKind, DomainError, InvalidStateKind};

const ABC: [&str; 3] = ["A", "B", "C"];

fn abc_session(faces: Vec<u8>) -> (GameSession, ScriptedDice, PlayerStatistics) {
    let mut dice = ScriptedDice::new(faces);
    let session = GameSession::start(&ABC, &mut dice).unwrap();
    (session, dice, PlayerStatistics::new(&ABC))
}

fn standing(name: &str, score: u16) -> Standing {
    Standing {
        name: name.to_string(),
        score,
    }
}

fn play_out(
    session: &mut GameSession,
    dice: &mut ScriptedDice,
    stats: &mut PlayerStatistics,
    events: &mut Vec<GameEvent>,
) {
    while !session.is_over() {
        session
            .roll_for_current_player(dice, stats, events)
            .unwrap();
    }
}

#[test]
fn start_resets_everything() {
    let (session, _, _) = abc_session(vec![1]);
    assert_eq!(session.round(), 1);
    assert_eq!(session.current_player_index(), 0);
    assert_eq!(session.phase(), &SessionPhase::Idle);
    assert!(!session.is_over());
    assert!(session.players().iter().all(|p| p.score == 0));
    // Scripted picks default to identity order.
    let names: Vec<&str> = session.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ABC.to_vec());
}

#[test]
fn start_uses_the_shuffle() {
    let mut dice = ScriptedDice::new(vec![1]).with_picks(vec![0, 0]);
    let session = GameSession::start(&ABC, &mut dice).unwrap();
    let names: Vec<&str> = session.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "A"]);
    assert_eq!(session.roster(), &["A", "B", "C"]);
}

#[test]
fn start_rejects_bad_rosters() {
    let mut dice = ScriptedDice::new(vec![1]);

    let err = GameSession::start(&["A", "B"], &mut dice).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Configuration(ConfigurationKind::RosterSize, _)
    ));

    let err = GameSession::start(&["A", "B", "C", "D"], &mut dice).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Configuration(ConfigurationKind::RosterSize, _)
    ));

    let err = GameSession::start(&["A", "B", "A"], &mut dice).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Configuration(ConfigurationKind::DuplicateName, _)
    ));
}

#[test]
fn reference_game_is_won_by_a() {
    let (mut session, mut dice, mut stats) = abc_session(faces_for_turns(&REFERENCE_TOTALS));
    let mut events: Vec<GameEvent> = Vec::new();
    play_out(&mut session, &mut dice, &mut stats, &mut events);

    let scores: Vec<(String, u16)> = session
        .players()
        .iter()
        .map(|p| (p.name.clone(), p.score))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("A".to_string(), 36),
            ("B".to_string(), 35),
            ("C".to_string(), 34)
        ]
    );

    let Some(GameEvent::GameOver {
        final_rankings,
        winners,
        winning_score,
        win_rates,
    }) = events.last()
    else {
        panic!("last event must be GameOver, got {:?}", events.last());
    };
    assert_eq!(
        final_rankings,
        &vec![standing("A", 36), standing("B", 35), standing("C", 34)]
    );
    assert_eq!(winners, &vec!["A".to_string()]);
    assert_eq!(*winning_score, 36);
    let rates: Vec<(String, u32)> = win_rates
        .iter()
        .map(|w| (w.name.clone(), w.percentage))
        .collect();
    assert_eq!(
        rates,
        vec![
            ("A".to_string(), 100),
            ("B".to_string(), 0),
            ("C".to_string(), 0)
        ]
    );
}

#[test]
fn turn_events_are_ordered_and_game_over_is_last() {
    let (mut session, mut dice, mut stats) = abc_session(faces_for_turns(&REFERENCE_TOTALS));
    let mut events: Vec<GameEvent> = Vec::new();

    let first = session
        .roll_for_current_player(&mut dice, &mut stats, &mut events)
        .unwrap();
    assert_eq!(first.player_name, "A");
    assert_eq!(first.roll.faces, vec![6, 1]);
    assert_eq!(first.roll.total, 7);
    assert!(first.game_over.is_none());

    let kinds: Vec<&str> = events.iter().map(GameEvent::name).collect();
    assert_eq!(kinds, vec!["roll_started", "roll_resolved", "turn_advanced"]);
    assert_eq!(
        events[2],
        GameEvent::TurnAdvanced {
            round: 1,
            current_player_name: "B".to_string()
        }
    );

    play_out(&mut session, &mut dice, &mut stats, &mut events);
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
    assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));

    // The final turn resolves straight into GameOver, with no TurnAdvanced between.
    let n = events.len();
    assert!(matches!(events[n - 2], GameEvent::RollResolved { .. }));
    assert!(matches!(events[n - 3], GameEvent::RollStarted { .. }));
}

#[test]
fn rollresolved_carries_full_rankings() {
    let (mut session, mut dice, mut stats) = abc_session(faces_for_turns(&REFERENCE_TOTALS));
    let mut events: Vec<GameEvent> = Vec::new();
    for _ in 0..3 {
        session
            .roll_for_current_player(&mut dice, &mut stats, &mut events)
            .unwrap();
    }
    // After A:7, B:9, C:5
    let last_rankings = events
        .iter()
        .rev()
        .find_map(|e| match e {
            GameEvent::RollResolved { rankings, .. } => Some(rankings.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        last_rankings,
        vec![standing("B", 9), standing("A", 7), standing("C", 5)]
    );
}

#[test]
fn round_advances_after_last_seat() {
    let (mut session, mut dice, mut stats) = abc_session(vec![1, 1]);
    for expected_index in [1, 2, 0] {
        session
            .roll_for_current_player(&mut dice, &mut stats, &mut NullSink)
            .unwrap();
        assert_eq!(session.current_player_index(), expected_index);
    }
    assert_eq!(session.round(), 2);
}

#[test]
fn final_round_rolls_three_dice() {
    let (mut session, mut dice, mut stats) = abc_session(vec![2]);
    let mut dice_counts = Vec::new();
    while !session.is_over() {
        let round = session.round();
        let resolved = session
            .roll_for_current_player(&mut dice, &mut stats, &mut NullSink)
            .unwrap();
        dice_counts.push((round, resolved.roll.faces.len()));
    }
    assert_eq!(dice_counts.len(), 15);
    for (round, count) in dice_counts {
        let expected = if round == MAX_ROUNDS { 3 } else { 2 };
        assert_eq!(count, expected, "round {round}");
    }
    assert_eq!(session.players()[0].score, 4 * 4 + 6);
}

#[test]
fn roll_in_flight_rejects_a_second_roll() {
    let (mut session, mut dice, mut stats) = abc_session(vec![3, 4]);
    let mut events: Vec<GameEvent> = Vec::new();

    session.begin_roll(&mut dice, &mut events).unwrap();
    assert_eq!(session.phase().kind(), PhaseKind::RollInFlight);
    let events_before = events.len();
    let faces_before = dice.faces_used();

    let err = session.begin_roll(&mut dice, &mut events).unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidState(
            InvalidStateKind::RollInFlight,
            "previous roll has not resolved yet".to_string()
        )
    );
    assert_eq!(events.len(), events_before, "rejection must not emit");
    assert_eq!(dice.faces_used(), faces_before, "rejection must not roll");

    let resolved = session.resolve_roll(&mut stats, &mut events).unwrap();
    assert_eq!(resolved.roll.total, 7);
    assert_eq!(session.phase(), &SessionPhase::Idle);
}

#[test]
fn resolve_without_pending_roll_is_rejected() {
    let (mut session, _, mut stats) = abc_session(vec![1]);
    let mut events: Vec<GameEvent> = Vec::new();
    let err = session.resolve_roll(&mut stats, &mut events).unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidState(InvalidStateKind::NoRollInFlight, _)
    ));
    assert!(events.is_empty());
    assert!(session.players().iter().all(|p| p.score == 0));
}

#[test]
fn roll_after_game_over_changes_nothing() {
    let (mut session, mut dice, mut stats) = abc_session(vec![5]);
    play_out(&mut session, &mut dice, &mut stats, &mut Vec::new());

    let before = session.snapshot();
    let stats_before = stats.clone();
    let mut events: Vec<GameEvent> = Vec::new();
    let err = session
        .roll_for_current_player(&mut dice, &mut stats, &mut events)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidState(InvalidStateKind::GameOver, _)
    ));
    assert!(events.is_empty());
    assert_eq!(session.snapshot(), before);
    assert_eq!(stats, stats_before);
}

#[test]
fn three_way_tie_credits_everyone() {
    // Every face is 3: each player ends on 4*6 + 9 = 33.
    let (mut session, mut dice, mut stats) = abc_session(vec![3]);
    let mut events: Vec<GameEvent> = Vec::new();
    play_out(&mut session, &mut dice, &mut stats, &mut events);

    let Some(GameEvent::GameOver {
        winners,
        winning_score,
        ..
    }) = events.last()
    else {
        panic!("expected GameOver");
    };
    assert_eq!(winners.len(), 3);
    assert_eq!(*winning_score, 33);
    for name in ABC {
        assert_eq!(
            stats.get(name),
            Some(PlayerRecord {
                wins: 1,
                games_played: 1
            })
        );
    }
}

#[test]
fn reset_keeps_statistics_and_clears_session() {
    let (mut session, mut dice, mut stats) = abc_session(faces_for_turns(&REFERENCE_TOTALS));
    play_out(&mut session, &mut dice, &mut stats, &mut Vec::new());
    let stats_before = stats.clone();

    let fresh = session.reset(&mut dice);
    assert_eq!(fresh.round(), 1);
    assert_eq!(fresh.current_player_index(), 0);
    assert!(!fresh.is_over());
    assert!(fresh.players().iter().all(|p| p.score == 0));
    assert_eq!(fresh.roster(), session.roster());
    assert_eq!(stats, stats_before);
}

#[test]
fn announce_start_paints_banner_and_history() {
    let (session, _, stats) = abc_session(vec![1]);
    let mut events: Vec<GameEvent> = Vec::new();
    session.announce_start(&stats, &mut events);
    assert_eq!(events.len(), 2);
    match &events[0] {
        GameEvent::GameStarted {
            turn_order,
            max_rounds,
            win_rates,
        } => {
            assert_eq!(turn_order, &vec!["A", "B", "C"]);
            assert_eq!(*max_rounds, MAX_ROUNDS);
            assert_eq!(win_rates.len(), 3);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        events[1],
        GameEvent::TurnAdvanced {
            round: 1,
            current_player_name: "A".to_string()
        }
    );
}

#[test]
fn snapshot_reflects_progress() {
    let (mut session, mut dice, mut stats) = abc_session(vec![6]);
    session
        .roll_for_current_player(&mut dice, &mut stats, &mut NullSink)
        .unwrap();
    let snap = session.snapshot();
    assert_eq!(snap.current_player.as_deref(), Some("B"));
    assert_eq!(snap.round, 1);
    assert_eq!(snap.phase, PhaseKind::Idle);
    assert_eq!(snap.turn_order[0], standing("A", 12));

    play_out(&mut session, &mut dice, &mut stats, &mut Vec::new());
    let snap = session.snapshot();
    assert_eq!(snap.current_player, None);
    assert_eq!(snap.phase, PhaseKind::Over);
}
