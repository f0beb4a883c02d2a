use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::actions::{Action, ActionKind};
use crate::domain::day::NoEliminationReason;
use crate::domain::night::Investigation;
use crate::domain::phase_engine::{join, reset, start, submit_action};
use crate::domain::player_view::PlayerView;
use crate::domain::roles::{assign_roles, Role};
use crate::domain::seed_derivation::derive_role_seed;
use crate::domain::state::{GameSession, JoinOutcome, Phase};
use crate::domain::test_state_helpers::{
    act, investigate, kill, lobby, save, started_with, table_of_four, vote,
};
use crate::domain::win::Winner;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};

fn assert_validation(err: DomainError, expected: ValidationKind) {
    match err {
        DomainError::Validation(kind, _) => assert_eq!(kind, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

#[test]
fn four_player_game_end_to_end() {
    let mut s = table_of_four();
    assert_eq!(s.phase, Phase::Night);

    act(&mut s, "A", kill("D"));
    act(&mut s, "B", save("C"));
    assert_eq!(s.phase, Phase::Night, "detective has not acted yet");
    act(&mut s, "C", investigate("A"));

    assert_eq!(s.phase, Phase::Day);
    assert_eq!(s.players, ["A", "B", "C"]);
    let night = s.last_outcome.clone().expect("night outcome recorded");
    assert_eq!(night.death.as_deref(), Some("D"));
    assert_eq!(night.saved, None);
    assert!(s.is_eliminated("D"));
    assert_eq!(s.role_of("D"), Some(Role::Villager));

    let c_view = PlayerView::for_viewer(&s, Some("C"));
    assert_eq!(
        c_view.me.and_then(|m| m.investigation),
        Some(Investigation {
            detective: "C".into(),
            target: "A".into(),
            revealed_role: Role::Mafia,
        })
    );

    act(&mut s, "B", vote("A"));
    act(&mut s, "C", vote("A"));
    act(&mut s, "A", vote("A"));

    assert_eq!(s.phase, Phase::GameOver);
    assert!(s.game_over);
    assert_eq!(s.winner, Some(Winner::Villagers));
    assert!(s.pending_actions.is_empty());
    let day = s.last_elimination.clone().expect("day outcome recorded");
    assert_eq!(day.eliminated.as_deref(), Some("A"));
    assert_eq!(day.revealed_role, Some(Role::Mafia));
    assert_eq!(day.tally.counts.len(), 1);
    assert_eq!(day.tally.counts[0].target, "A");
    assert_eq!(day.tally.counts[0].votes, 3);
    assert_eq!(day.tally.skip_count, 0);
}

/// Base seed whose first deal for A..D is A mafia, B doctor, C detective,
/// D villager.
fn seed_dealing_table_of_four() -> u64 {
    let players: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();
    let wanted: BTreeMap<String, Role> = [
        ("A", Role::Mafia),
        ("B", Role::Doctor),
        ("C", Role::Detective),
        ("D", Role::Villager),
    ]
    .into_iter()
    .map(|(n, r)| (n.to_string(), r))
    .collect();

    (0..10_000u64)
        .find(|&seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(derive_role_seed(seed, 0));
            assign_roles(&players, &mut rng) == wanted
        })
        .expect("some seed deals the table of four")
}

#[test]
fn seeded_deal_plays_the_four_player_game() {
    let seed = seed_dealing_table_of_four();
    let mut s = GameSession::new("TEST01", "A", seed);
    for n in ["B", "C", "D"] {
        join(&mut s, n).unwrap();
    }
    start(&mut s, "A").unwrap();
    assert_eq!(s.role_of("A"), Some(Role::Mafia));
    assert_eq!(s.role_of("B"), Some(Role::Doctor));
    assert_eq!(s.role_of("C"), Some(Role::Detective));
    assert_eq!(s.role_of("D"), Some(Role::Villager));

    act(&mut s, "A", kill("D"));
    act(&mut s, "B", save("C"));
    act(&mut s, "C", investigate("A"));
    assert_eq!(s.phase, Phase::Day);
    assert_eq!(s.players, ["A", "B", "C"]);

    act(&mut s, "B", vote("A"));
    act(&mut s, "C", vote("A"));
    act(&mut s, "A", vote("A"));
    assert_eq!(s.winner, Some(Winner::Villagers));
    let day = s.last_elimination.clone().expect("day outcome recorded");
    assert_eq!(day.tally.max_votes(), 3);
    assert_eq!(day.tally.skip_count, 0);
}

#[test]
fn anyone_may_vote_against_themselves() {
    let mut s = table_of_four();
    act(&mut s, "A", kill("B"));
    act(&mut s, "B", save("C"));
    act(&mut s, "C", investigate("D"));
    assert_eq!(s.phase, Phase::Day);

    act(&mut s, "D", vote("D"));
    assert_eq!(s.pending_actions[0].action, vote("D"));
    assert!(s.valid_targets("D", ActionKind::Eliminate).contains(&"D".to_string()));
    assert!(!s.valid_targets("A", ActionKind::Kill).contains(&"A".to_string()));
}

#[test]
fn mafia_wins_at_parity_after_day_vote() {
    let mut s = table_of_four();
    act(&mut s, "A", kill("B"));
    act(&mut s, "B", save("C"));
    act(&mut s, "C", investigate("D"));
    assert_eq!(s.players, ["A", "C", "D"]);
    assert_eq!(s.phase, Phase::Day);

    act(&mut s, "A", vote("C"));
    act(&mut s, "C", vote("A"));
    act(&mut s, "D", vote("C"));

    assert_eq!(s.winner, Some(Winner::Mafia));
    assert_eq!(s.phase, Phase::GameOver);
}

#[test]
fn saved_target_survives_and_day_follows() {
    let mut s = table_of_four();
    act(&mut s, "A", kill("C"));
    act(&mut s, "B", save("C"));
    act(&mut s, "C", investigate("B"));

    assert_eq!(s.phase, Phase::Day);
    assert_eq!(s.players.len(), 4);
    let night = s.last_outcome.clone().unwrap();
    assert_eq!(night.saved.as_deref(), Some("C"));
    assert_eq!(night.death, None);
}

#[test]
fn tied_day_returns_to_next_night() {
    let mut s = table_of_four();
    act(&mut s, "A", kill("D"));
    act(&mut s, "B", save("B"));
    act(&mut s, "C", investigate("B"));
    assert_eq!(s.phase, Phase::Day);

    // A:1, B:1, C:1 with nobody skipping
    act(&mut s, "A", vote("B"));
    act(&mut s, "B", vote("C"));
    act(&mut s, "C", vote("A"));

    assert_eq!(s.phase, Phase::Night);
    assert_eq!(s.day_count, 2);
    assert_eq!(s.last_outcome, None);
    assert!(s.pending_actions.is_empty());
    let day = s.last_elimination.clone().unwrap();
    assert_eq!(day.reason, Some(NoEliminationReason::Tie));
    assert_eq!(s.players, ["A", "B", "C"]);
}

#[test]
fn zero_required_night_voters_resolves_immediately() {
    let s = started_with(&[
        ("A", Role::Villager),
        ("B", Role::Villager),
        ("C", Role::Villager),
        ("D", Role::Villager),
    ]);
    // Nobody acts at night, so the start itself runs the night to completion.
    assert_eq!(s.phase, Phase::GameOver);
    assert_eq!(s.winner, Some(Winner::Villagers));
}

#[test]
fn dead_specials_drop_out_of_night_quorum() {
    let mut s = started_with(&[
        ("A", Role::Mafia),
        ("B", Role::Doctor),
        ("C", Role::Detective),
        ("D", Role::Villager),
        ("E", Role::Villager),
    ]);
    act(&mut s, "A", kill("B"));
    act(&mut s, "B", save("C"));
    act(&mut s, "C", investigate("A"));
    assert_eq!(s.phase, Phase::Day);

    act(&mut s, "A", vote("D"));
    act(&mut s, "C", vote("E"));
    act(&mut s, "D", Action::Skip);
    act(&mut s, "E", Action::Skip);
    assert_eq!(s.phase, Phase::Night);
    assert_eq!(s.required_voters(), ["A", "C"]);

    act(&mut s, "A", kill("E"));
    assert_eq!(s.phase, Phase::Night);
    act(&mut s, "C", investigate("D"));
    assert_eq!(s.phase, Phase::Day);
    assert_eq!(s.players, ["A", "C", "D"]);
}

#[test]
fn submission_validation_order() {
    let mut lobby_session = lobby(&["A", "B", "C", "D"]);
    assert_validation(
        submit_action(&mut lobby_session, "A", kill("B")).unwrap_err(),
        ValidationKind::PhaseMismatch,
    );

    let mut s = table_of_four();
    assert!(matches!(
        submit_action(&mut s, "Zed", kill("B")).unwrap_err(),
        DomainError::Forbidden(ForbiddenKind::NotAPlayer, _)
    ));
    assert_validation(
        submit_action(&mut s, "A", vote("B")).unwrap_err(),
        ValidationKind::PhaseMismatch,
    );
    assert_validation(
        submit_action(&mut s, "D", kill("B")).unwrap_err(),
        ValidationKind::InvalidRoleForAction,
    );
    assert_validation(
        submit_action(&mut s, "B", investigate("A")).unwrap_err(),
        ValidationKind::InvalidRoleForAction,
    );
    assert_validation(
        submit_action(&mut s, "A", kill("Zed")).unwrap_err(),
        ValidationKind::UnknownTarget,
    );
    assert_validation(
        submit_action(&mut s, "A", kill("A")).unwrap_err(),
        ValidationKind::InvalidTarget,
    );
    assert_validation(
        submit_action(&mut s, "C", investigate("C")).unwrap_err(),
        ValidationKind::InvalidTarget,
    );

    act(&mut s, "A", kill("D"));
    assert!(matches!(
        submit_action(&mut s, "A", kill("C")).unwrap_err(),
        DomainError::Conflict(ConflictKind::DuplicateSubmission, _)
    ));

    act(&mut s, "B", save("B"));
    act(&mut s, "C", investigate("A"));
    assert_validation(
        submit_action(&mut s, "D", vote("A")).unwrap_err(),
        ValidationKind::PlayerEliminated,
    );
    assert_validation(
        submit_action(&mut s, "B", vote("D")).unwrap_err(),
        ValidationKind::InvalidTarget,
    );
}

#[test]
fn rejected_submission_leaves_session_untouched() {
    let mut s = table_of_four();
    act(&mut s, "A", kill("D"));
    let before = s.clone();

    let _ = submit_action(&mut s, "A", kill("C"));
    let _ = submit_action(&mut s, "D", kill("C"));
    let _ = submit_action(&mut s, "B", save("Nobody"));
    assert_eq!(s, before);
}

#[test]
fn names_are_normalized_on_submission() {
    let mut s = table_of_four();
    act(&mut s, "  A ", kill(" D"));
    assert_eq!(s.pending_actions[0].player, "A");
    assert_eq!(s.pending_actions[0].action, kill("D"));
}

#[test]
fn join_rules() {
    let mut s = lobby(&["A"]);
    assert_eq!(join(&mut s, "B").unwrap(), JoinOutcome::Joined);
    assert_eq!(join(&mut s, " B ").unwrap(), JoinOutcome::Rejoined);
    assert_eq!(s.players, ["A", "B"]);
    assert_validation(join(&mut s, "   ").unwrap_err(), ValidationKind::InvalidPlayerName);

    let mut running = table_of_four();
    act(&mut running, "A", kill("D"));
    act(&mut running, "B", save("B"));
    act(&mut running, "C", investigate("A"));
    assert_eq!(join(&mut running, "D").unwrap(), JoinOutcome::Rejoined);
    assert_eq!(join(&mut running, "B").unwrap(), JoinOutcome::Rejoined);
    assert!(matches!(
        join(&mut running, "E").unwrap_err(),
        DomainError::Conflict(ConflictKind::GameAlreadyStarted, _)
    ));
}

#[test]
fn start_rules() {
    let mut s = lobby(&["A", "B", "C"]);
    assert_validation(
        start(&mut s, "A").unwrap_err(),
        ValidationKind::InsufficientPlayers,
    );

    join(&mut s, "D").unwrap();
    assert!(matches!(
        start(&mut s, "B").unwrap_err(),
        DomainError::Forbidden(ForbiddenKind::NotHost, _)
    ));

    start(&mut s, "A").unwrap();
    assert_eq!(s.phase, Phase::Night);
    assert_eq!(s.roles.len(), 4);
    assert_eq!(s.games_started, 1);
    assert!(matches!(
        start(&mut s, "A").unwrap_err(),
        DomainError::Conflict(ConflictKind::GameAlreadyStarted, _)
    ));
}

#[test]
fn seeded_start_is_reproducible() {
    let mut a = lobby(&["A", "B", "C", "D", "E", "F"]);
    let mut b = a.clone();
    start(&mut a, "A").unwrap();
    start(&mut b, "A").unwrap();
    assert_eq!(a.roles, b.roles);
}

#[test]
fn reset_after_game_over_returns_to_lobby() {
    let mut s = table_of_four();
    act(&mut s, "A", kill("D"));
    act(&mut s, "B", save("C"));
    act(&mut s, "C", investigate("A"));
    act(&mut s, "B", vote("A"));
    act(&mut s, "C", vote("A"));
    act(&mut s, "A", Action::Skip);
    assert!(s.game_over);
    let players = s.players.clone();

    assert!(matches!(
        reset(&mut s, "B").unwrap_err(),
        DomainError::Forbidden(ForbiddenKind::NotHost, _)
    ));
    reset(&mut s, "A").unwrap();

    assert_eq!(s.phase, Phase::Lobby);
    assert!(s.roles.is_empty());
    assert_eq!(s.players, players);
    assert_eq!(s.day_count, 1);
    assert!(!s.game_over);
    assert_eq!(s.winner, None);
    assert_eq!(s.last_outcome, None);
    assert_eq!(s.last_elimination, None);
    assert!(s.pending_actions.is_empty());
}

#[test]
fn reset_mid_game_allows_a_fresh_deal() {
    let mut s = lobby(&["A", "B", "C", "D", "E"]);
    start(&mut s, "A").unwrap();
    reset(&mut s, "A").unwrap();
    assert_eq!(join(&mut s, "F").unwrap(), JoinOutcome::Joined);
    start(&mut s, "A").unwrap();
    assert_eq!(s.games_started, 2);
    assert_eq!(s.roles.len(), 6);
}
