use mafia_backend::domain::actions::Action;
use mafia_backend::domain::day::NoEliminationReason;
use mafia_backend::domain::roles::Role;
use mafia_backend::domain::state::Phase;
use mafia_backend::domain::win::Winner;
use mafia_backend::errors::domain::{ConflictKind, DomainError, ValidationKind};

use crate::support::sessions::{
    holder, investigate, kill, memory_service, save, started_four, town_other_than, vote,
};

#[tokio::test]
async fn villagers_win_by_voting_out_the_mafia() {
    let svc = memory_service().await;
    let s = started_four(&svc).await;
    assert_eq!(s.phase, Phase::Night);

    let mafia = holder(&s, Role::Mafia);
    let doctor = holder(&s, Role::Doctor);
    let detective = holder(&s, Role::Detective);
    let villager = holder(&s, Role::Villager);

    svc.submit_action(&s.id, &mafia, kill(&villager)).await.unwrap();
    svc.submit_action(&s.id, &doctor, save(&doctor)).await.unwrap();
    let s = svc
        .submit_action(&s.id, &detective, investigate(&mafia))
        .await
        .unwrap();

    assert_eq!(s.phase, Phase::Day);
    let night = s.last_outcome.clone().expect("night outcome recorded");
    assert_eq!(night.death.as_deref(), Some(villager.as_str()));
    assert_eq!(night.saved, None);
    assert_eq!(
        night.investigation.map(|i| i.revealed_role),
        Some(Role::Mafia)
    );
    assert!(!s.is_alive(&villager));

    svc.submit_action(&s.id, &mafia, vote(&doctor)).await.unwrap();
    svc.submit_action(&s.id, &doctor, vote(&mafia)).await.unwrap();
    let s = svc
        .submit_action(&s.id, &detective, vote(&mafia))
        .await
        .unwrap();

    assert_eq!(s.phase, Phase::GameOver);
    assert!(s.game_over);
    assert_eq!(s.winner, Some(Winner::Villagers));
    let day = s.last_elimination.expect("day outcome recorded");
    assert_eq!(day.eliminated.as_deref(), Some(mafia.as_str()));
    assert_eq!(day.revealed_role, Some(Role::Mafia));
}

#[tokio::test]
async fn doctor_save_cancels_the_kill() {
    let svc = memory_service().await;
    let s = started_four(&svc).await;
    let mafia = holder(&s, Role::Mafia);
    let doctor = holder(&s, Role::Doctor);
    let detective = holder(&s, Role::Detective);

    svc.submit_action(&s.id, &mafia, kill(&detective)).await.unwrap();
    svc.submit_action(&s.id, &detective, investigate(&doctor))
        .await
        .unwrap();
    let s = svc.submit_action(&s.id, &doctor, save(&detective)).await.unwrap();

    let night = s.last_outcome.clone().unwrap();
    assert_eq!(night.death, None);
    assert_eq!(night.saved.as_deref(), Some(detective.as_str()));
    assert_eq!(s.players.len(), 4);
    assert_eq!(s.phase, Phase::Day);
}

#[tokio::test]
async fn mafia_wins_once_town_is_matched() {
    let svc = memory_service().await;
    let s = started_four(&svc).await;
    let mafia = holder(&s, Role::Mafia);
    let doctor = holder(&s, Role::Doctor);
    let detective = holder(&s, Role::Detective);
    let villager = holder(&s, Role::Villager);

    // Night 1: villager dies.
    svc.submit_action(&s.id, &mafia, kill(&villager)).await.unwrap();
    svc.submit_action(&s.id, &doctor, save(&doctor)).await.unwrap();
    svc.submit_action(&s.id, &detective, investigate(&doctor))
        .await
        .unwrap();

    // Day 1: everyone skips.
    for p in [&mafia, &doctor] {
        svc.submit_action(&s.id, p, Action::Skip).await.unwrap();
    }
    let s = svc.submit_action(&s.id, &detective, Action::Skip).await.unwrap();
    assert_eq!(s.phase, Phase::Night);
    assert_eq!(s.day_count, 2);
    assert_eq!(
        s.last_elimination.as_ref().and_then(|d| d.reason),
        Some(NoEliminationReason::SkipMajority)
    );

    // Night 2: detective dies, leaving one mafia against one townsperson.
    svc.submit_action(&s.id, &mafia, kill(&detective)).await.unwrap();
    svc.submit_action(&s.id, &doctor, save(&doctor)).await.unwrap();
    let s = svc
        .submit_action(&s.id, &detective, investigate(&mafia))
        .await
        .unwrap();

    assert_eq!(s.phase, Phase::GameOver);
    assert_eq!(s.winner, Some(Winner::Mafia));
    assert_eq!(s.players.len(), 2);
}

#[tokio::test]
async fn rejected_submissions_leave_the_snapshot_untouched() {
    let svc = memory_service().await;
    let s = started_four(&svc).await;
    let mafia = holder(&s, Role::Mafia);
    let villager = holder(&s, Role::Villager);
    let doctor = holder(&s, Role::Doctor);

    svc.submit_action(&s.id, &mafia, kill(&villager)).await.unwrap();
    let before = svc.load_session(&s.id).await.unwrap();

    let dup = svc
        .submit_action(&s.id, &mafia, kill(&doctor))
        .await
        .unwrap_err();
    assert!(matches!(
        dup,
        DomainError::Conflict(ConflictKind::DuplicateSubmission, _)
    ));

    let wrong_role = svc
        .submit_action(&s.id, &villager, kill(&doctor))
        .await
        .unwrap_err();
    assert!(matches!(
        wrong_role,
        DomainError::Validation(ValidationKind::InvalidRoleForAction, _)
    ));

    let wrong_phase = svc
        .submit_action(&s.id, &doctor, vote(&mafia))
        .await
        .unwrap_err();
    assert!(matches!(
        wrong_phase,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));

    let stranger = svc
        .submit_action(&s.id, &doctor, save("Nobody"))
        .await
        .unwrap_err();
    assert!(matches!(
        stranger,
        DomainError::Validation(ValidationKind::UnknownTarget, _)
    ));

    assert_eq!(svc.load_session(&s.id).await.unwrap(), before);
}

#[tokio::test]
async fn dead_players_cannot_act_or_be_targeted() {
    let svc = memory_service().await;
    let s = started_four(&svc).await;
    let mafia = holder(&s, Role::Mafia);
    let doctor = holder(&s, Role::Doctor);
    let detective = holder(&s, Role::Detective);
    let villager = holder(&s, Role::Villager);

    svc.submit_action(&s.id, &mafia, kill(&villager)).await.unwrap();
    svc.submit_action(&s.id, &doctor, save(&doctor)).await.unwrap();
    svc.submit_action(&s.id, &detective, investigate(&mafia))
        .await
        .unwrap();

    let err = svc
        .submit_action(&s.id, &villager, Action::Skip)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PlayerEliminated, _)
    ));

    let err = svc
        .submit_action(&s.id, &doctor, vote(&villager))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidTarget, _)
    ));

    let s = svc.load_session(&s.id).await.unwrap();
    assert_eq!(s.required_voters().len(), 3);
    assert_eq!(town_other_than(&s, &[doctor.as_str()]), detective);
}

#[tokio::test]
async fn view_reveals_only_what_the_viewer_may_know() {
    let svc = memory_service().await;
    let s = started_four(&svc).await;
    let mafia = holder(&s, Role::Mafia);
    let detective = holder(&s, Role::Detective);

    let spectator = svc.view_session(&s.id, None).await.unwrap();
    assert!(spectator.me.is_none());
    assert!(spectator.roles.is_none());

    let det_view = svc.view_session(&s.id, Some(&detective)).await.unwrap();
    let me = det_view.me.expect("detective is a player");
    assert_eq!(me.role, Some(Role::Detective));
    assert!(me.fellow_mafia.is_empty());
    assert!(det_view.roles.is_none());

    let mafia_view = svc.view_session(&s.id, Some(&mafia)).await.unwrap();
    assert_eq!(mafia_view.me.unwrap().role, Some(Role::Mafia));
}
