//! Lobby -> Night -> Day -> (Night | GameOver) sequencing.
//!
//! Every operation validates against the session it is given and returns an
//! error before touching anything, so a failed call leaves the session as it
//! was. Services apply these to a working copy and only persist on success.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::actions::{Action, PendingAction};
use crate::domain::day::{tally_day_votes, DayDecision, DayOutcome};
use crate::domain::names::normalize_name;
use crate::domain::night::{apply_night, resolve_night};
use crate::domain::roles::{assign_roles, Role, MIN_PLAYERS};
use crate::domain::seed_derivation::derive_role_seed;
use crate::domain::state::{GameSession, JoinOutcome, Phase};
use crate::domain::win::{evaluate_winner, Winner};
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, ValidationKind};

/// Add `name` to the lobby, or recognise a returning player.
pub fn join(session: &mut GameSession, name: &str) -> Result<JoinOutcome, DomainError> {
    let name = normalize_name(name)?;

    if session.phase == Phase::Lobby {
        if session.is_alive(&name) {
            return Ok(JoinOutcome::Rejoined);
        }
        session.players.push(name);
        return Ok(JoinOutcome::Joined);
    }

    if session.roles.contains_key(&name) {
        Ok(JoinOutcome::Rejoined)
    } else {
        Err(DomainError::conflict(
            ConflictKind::GameAlreadyStarted,
            format!("session {} is already in progress", session.id),
        ))
    }
}

/// Host starts the game; roles come from the session's derived seed.
pub fn start(session: &mut GameSession, caller: &str) -> Result<(), DomainError> {
    let seed = derive_role_seed(session.rng_seed, session.games_started);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    start_with_rng(session, caller, &mut rng)
}

/// Same as [`start`] with an explicit source of randomness.
pub fn start_with_rng<R: Rng + ?Sized>(
    session: &mut GameSession,
    caller: &str,
    rng: &mut R,
) -> Result<(), DomainError> {
    check_can_start(session, caller)?;
    let roles = assign_roles(&session.players, rng);
    begin_night_one(session, roles);
    Ok(())
}

/// Start with a fixed deal. `roles` must cover every player.
pub(crate) fn start_with_roles(
    session: &mut GameSession,
    caller: &str,
    roles: BTreeMap<String, Role>,
) -> Result<(), DomainError> {
    check_can_start(session, caller)?;
    begin_night_one(session, roles);
    Ok(())
}

fn check_can_start(session: &GameSession, caller: &str) -> Result<(), DomainError> {
    let caller = normalize_name(caller)?;
    if !session.is_host(&caller) {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotHost,
            format!("only the host can start session {}", session.id),
        ));
    }
    if session.phase != Phase::Lobby {
        return Err(DomainError::conflict(
            ConflictKind::GameAlreadyStarted,
            format!("session {} has already started", session.id),
        ));
    }
    if session.players.len() < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::InsufficientPlayers,
            format!(
                "{} players joined; at least {MIN_PLAYERS} are needed",
                session.players.len()
            ),
        ));
    }
    Ok(())
}

fn begin_night_one(session: &mut GameSession, roles: BTreeMap<String, Role>) {
    session.roles = roles;
    session.pending_actions.clear();
    session.day_count = 1;
    session.last_outcome = None;
    session.last_elimination = None;
    session.phase = Phase::Night;
    session.games_started = session.games_started.saturating_add(1);
    advance_while_ready(session);
}

/// Record a night or day action; resolves the phase when it completes quorum.
pub fn submit_action(
    session: &mut GameSession,
    caller: &str,
    action: Action,
) -> Result<(), DomainError> {
    let caller = normalize_name(caller)?;
    let action = normalize_target(action)?;

    validate_submission(session, &caller, &action)?;

    session.pending_actions.push(PendingAction {
        player: caller,
        action,
    });
    advance_while_ready(session);
    Ok(())
}

fn normalize_target(action: Action) -> Result<Action, DomainError> {
    let Some(target) = action.target() else {
        return Ok(action);
    };
    let target = normalize_name(target).map_err(|_| {
        DomainError::validation(
            ValidationKind::UnknownTarget,
            "target is not a valid player name",
        )
    })?;
    Ok(action.map_target(|_| target))
}

fn validate_submission(
    session: &GameSession,
    caller: &str,
    action: &Action,
) -> Result<(), DomainError> {
    if !session.phase.is_active() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("no actions are accepted during {}", session.phase.as_str()),
        ));
    }
    let Some(role) = session.role_of(caller) else {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotAPlayer,
            format!("{caller} is not playing in session {}", session.id),
        ));
    };
    if !session.is_alive(caller) {
        return Err(DomainError::validation(
            ValidationKind::PlayerEliminated,
            format!("{caller} has been eliminated"),
        ));
    }

    let kind = action.kind();
    if kind.phase() != session.phase {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!(
                "{kind:?} is a {} action but it is {}",
                kind.phase().as_str(),
                session.phase.as_str()
            ),
        ));
    }
    if let Some(required) = kind.required_role() {
        if role != required {
            return Err(DomainError::validation(
                ValidationKind::InvalidRoleForAction,
                format!("{kind:?} requires the {} role", required.as_str()),
            ));
        }
    }
    if session.has_acted(caller) {
        return Err(DomainError::conflict(
            ConflictKind::DuplicateSubmission,
            format!("{caller} already acted this {}", session.phase.as_str()),
        ));
    }

    if let Some(target) = action.target() {
        if !session.is_member(target) {
            return Err(DomainError::validation(
                ValidationKind::UnknownTarget,
                format!("{target} is not in this session"),
            ));
        }
        if !session.is_alive(target) {
            return Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                format!("{target} has already been eliminated"),
            ));
        }
        if target == caller && !kind.allows_self_target() {
            return Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                format!("{kind:?} cannot target yourself"),
            ));
        }
    }
    Ok(())
}

/// Resolve phases for as long as the current one has quorum.
fn advance_while_ready(session: &mut GameSession) {
    while session.quorum_reached() {
        match session.phase {
            Phase::Night => resolve_night_phase(session),
            Phase::Day => resolve_day_phase(session),
            Phase::Lobby | Phase::GameOver => break,
        }
    }
}

fn resolve_night_phase(session: &mut GameSession) {
    let outcome = resolve_night(&session.pending_actions, &session.roles);
    apply_night(&outcome, &mut session.players);
    session.pending_actions.clear();

    if let Some(winner) = evaluate_winner(&session.players, &session.roles) {
        finish(session, winner);
        return;
    }
    session.last_outcome = Some(outcome);
    session.phase = Phase::Day;
}

fn resolve_day_phase(session: &mut GameSession) {
    let tally = tally_day_votes(&session.pending_actions, &session.players);
    let record = match tally.decide() {
        DayDecision::Eliminate(name) => {
            session.players.retain(|p| p != &name);
            DayOutcome {
                revealed_role: session.role_of(&name),
                eliminated: Some(name),
                reason: None,
                tally,
            }
        }
        DayDecision::NoElimination(reason) => DayOutcome {
            eliminated: None,
            revealed_role: None,
            reason: Some(reason),
            tally,
        },
    };
    session.last_elimination = Some(record);
    session.pending_actions.clear();

    if let Some(winner) = evaluate_winner(&session.players, &session.roles) {
        finish(session, winner);
        return;
    }
    session.last_outcome = None;
    session.day_count += 1;
    session.phase = Phase::Night;
}

fn finish(session: &mut GameSession, winner: Winner) {
    session.phase = Phase::GameOver;
    session.game_over = true;
    session.winner = Some(winner);
    session.pending_actions.clear();
}

/// Host returns the session to the lobby, keeping the living roster.
pub fn reset(session: &mut GameSession, caller: &str) -> Result<(), DomainError> {
    let caller = normalize_name(caller)?;
    if !session.is_host(&caller) {
        return Err(DomainError::forbidden(
            ForbiddenKind::NotHost,
            format!("only the host can reset session {}", session.id),
        ));
    }
    session.phase = Phase::Lobby;
    session.roles.clear();
    session.pending_actions.clear();
    session.day_count = 1;
    session.last_outcome = None;
    session.last_elimination = None;
    session.game_over = false;
    session.winner = None;
    Ok(())
}
