use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::domain::roles::Role;
use crate::domain::test_prelude::proptest_config;
use crate::domain::win::{evaluate_winner, Winner};

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Mafia),
        Just(Role::Doctor),
        Just(Role::Detective),
        Just(Role::Villager),
    ]
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Truth table over alive counts; dead players never matter.
    #[test]
    fn winner_follows_alive_counts(
        deal in prop::collection::vec((role_strategy(), any::<bool>()), 0..16)
    ) {
        let roles: BTreeMap<String, Role> = deal
            .iter()
            .enumerate()
            .map(|(i, (r, _))| (format!("p{i}"), *r))
            .collect();
        let live: Vec<String> = deal
            .iter()
            .enumerate()
            .filter(|(_, (_, alive))| *alive)
            .map(|(i, _)| format!("p{i}"))
            .collect();

        let mafia = live.iter().filter(|p| roles[*p].is_mafia()).count();
        let town = live.len() - mafia;

        let expected = if mafia == 0 {
            Some(Winner::Villagers)
        } else if mafia >= town {
            Some(Winner::Mafia)
        } else {
            None
        };
        prop_assert_eq!(evaluate_winner(&live, &roles), expected);
    }
}
