use mafia_backend::domain::phase_engine::start_with_rng;
use mafia_backend::domain::player_view::PlayerView;
use mafia_backend::domain::roles::{mafia_count_for, Role};
use mafia_backend::domain::state::{GameSession, Phase};
use mafia_test_support::roster::names;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::common::proptest_prelude::proptest_prelude_config;

fn lobby(n: usize) -> GameSession {
    let roster = names(n);
    let mut s = GameSession::new("PROP01", roster[0].clone(), 0);
    s.players = roster;
    s
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn every_player_gets_exactly_one_role(n in 4usize..=16, seed in any::<u64>()) {
        let mut s = lobby(n);
        let host = s.host.clone();
        start_with_rng(&mut s, &host, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(s.phase, Phase::Night);
        prop_assert_eq!(s.roles.len(), n);
        let mafia = s.roles.values().filter(|r| r.is_mafia()).count();
        prop_assert_eq!(mafia, mafia_count_for(n));
        prop_assert_eq!(s.roles.values().filter(|r| **r == Role::Doctor).count(), 1);
        prop_assert_eq!(s.roles.values().filter(|r| **r == Role::Detective).count(), 1);
    }

    #[test]
    fn views_only_reveal_roles_to_their_holders_and_mafia(
        n in 4usize..=12,
        seed in any::<u64>(),
    ) {
        let mut s = lobby(n);
        let host = s.host.clone();
        start_with_rng(&mut s, &host, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();

        for name in s.players.clone() {
            let view = PlayerView::for_viewer(&s, Some(&name));
            prop_assert!(view.roles.is_none());
            let me = view.me.expect("player sees themselves");
            prop_assert_eq!(me.role, s.role_of(&name));
            if s.role_of(&name) == Some(Role::Mafia) {
                prop_assert_eq!(me.fellow_mafia.len(), mafia_count_for(n) - 1);
            } else {
                prop_assert!(me.fellow_mafia.is_empty());
            }
        }
    }

    #[test]
    fn same_seed_same_deal(n in 4usize..=12, seed in any::<u64>()) {
        let mut a = lobby(n);
        let mut b = lobby(n);
        let host = a.host.clone();
        start_with_rng(&mut a, &host, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        start_with_rng(&mut b, &host, &mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a.roles, b.roles);
    }
}
