#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, Side, TurnRng};
    use crate::battle::tests::common::{count_events, create_test_session, TestCombatantBuilder};
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;

    fn moved(events: &[BattleEvent], side: Side) -> bool {
        count_events(events, |e| matches!(e, BattleEvent::MoveUsed { side: s, .. } if *s == side)) > 0
    }

    #[test]
    fn test_sleeping_player_skips_then_wakes() {
        let snorlax = TestCombatantBuilder::new(143)
            .with_moves(&["body-slam"])
            .with_status(StatusCondition::Sleep(1))
            .build();
        let golem = TestCombatantBuilder::new(76).with_moves(&["harden"]).build();
        let mut session = create_test_session(vec![snorlax], vec![golem]);

        // Golem's accuracy roll only; sleep never rolls
        let mut rng = TurnRng::new_for_test(vec![50]);
        let report = session.play_turn(0, &mut rng).unwrap();
        assert!(report.events.contains(&BattleEvent::FastAsleep {
            side: Side::Player,
            pokemon: "Snorlax".to_string(),
        }));
        assert!(!moved(&report.events, Side::Player));
        assert_eq!(session.player_active().status, Some(StatusCondition::Sleep(0)));
        assert_eq!(rng.consumed(), 1);

        // Golem accuracy, Snorlax accuracy, damage roll, body slam paralysis chance
        let report = session
            .play_turn(0, &mut TurnRng::new_for_test(vec![50, 50, 50, 100]))
            .unwrap();
        assert!(report.events.contains(&BattleEvent::WokeUp {
            side: Side::Player,
            pokemon: "Snorlax".to_string(),
        }));
        assert!(moved(&report.events, Side::Player));
        assert_eq!(session.player_active().status, None);
    }

    #[test]
    fn test_frozen_opponent_stays_frozen_on_high_roll() {
        let pikachu = TestCombatantBuilder::new(25).with_moves(&["swift"]).build();
        let lapras = TestCombatantBuilder::new(131)
            .with_moves(&["surf"])
            .with_status(StatusCondition::Freeze)
            .build();
        let mut session = create_test_session(vec![pikachu], vec![lapras]);

        // Pikachu accuracy, damage roll, thaw check fails
        let report = session
            .play_turn(0, &mut TurnRng::new_for_test(vec![50, 50, 21]))
            .unwrap();
        assert!(report.events.contains(&BattleEvent::FrozenSolid {
            side: Side::Opponent,
            pokemon: "Lapras".to_string(),
        }));
        assert!(!moved(&report.events, Side::Opponent));
        assert_eq!(session.opponent_active().status, Some(StatusCondition::Freeze));
    }

    #[test]
    fn test_frozen_opponent_thaws_and_acts() {
        let pikachu = TestCombatantBuilder::new(25).with_moves(&["swift"]).build();
        let lapras = TestCombatantBuilder::new(131)
            .with_moves(&["surf"])
            .with_status(StatusCondition::Freeze)
            .build();
        let mut session = create_test_session(vec![pikachu], vec![lapras]);

        // Pikachu accuracy, damage roll, thaw check succeeds, Lapras accuracy, damage roll
        let report = session
            .play_turn(0, &mut TurnRng::new_for_test(vec![50, 50, 20, 50, 50]))
            .unwrap();
        assert!(report.events.contains(&BattleEvent::Thawed {
            side: Side::Opponent,
            pokemon: "Lapras".to_string(),
        }));
        assert!(moved(&report.events, Side::Opponent));
        assert_eq!(session.opponent_active().status, None);
    }

    #[test]
    fn test_full_paralysis_skips_action() {
        // Paralyzed Pikachu (55) is slower than Golem (65)
        let pikachu = TestCombatantBuilder::new(25)
            .with_moves(&["swift"])
            .with_status(StatusCondition::Paralysis)
            .build();
        let golem = TestCombatantBuilder::new(76).with_moves(&["harden"]).build();
        let mut session = create_test_session(vec![pikachu], vec![golem]);

        let mut rng = TurnRng::new_for_test(vec![50, 25]);
        let report = session.play_turn(0, &mut rng).unwrap();
        assert!(report.events.contains(&BattleEvent::FullyParalyzed {
            side: Side::Player,
            pokemon: "Pikachu".to_string(),
        }));
        assert!(!moved(&report.events, Side::Player));
        assert_eq!(session.player_active().status, Some(StatusCondition::Paralysis));
        assert_eq!(rng.consumed(), 2);
    }
}
