#[cfg(test)]
mod tests {
    use crate::battle::session::BattleSession;
    use crate::battle::state::{BattleEvent, BattleOutcome, GameState, TurnRng};
    use crate::battle::tests::common::{
        count_events, create_test_session, predictable_rng, TestCombatantBuilder,
    };
    use crate::config::EngineConfig;
    use crate::dataset::Dataset;
    use crate::errors::ActionError;
    use pretty_assertions::assert_eq;
    use schema::SpeciesRecord;

    fn roster(ids: &[u16]) -> Vec<SpeciesRecord> {
        let dataset = Dataset::bundled().unwrap();
        ids.iter()
            .map(|id| dataset.get(*id).unwrap().clone())
            .collect()
    }

    fn brock_session() -> BattleSession {
        BattleSession::start(
            &roster(&[25, 6, 9]),
            &roster(&[76, 95, 141]),
            "Brock",
            &EngineConfig::default(),
        )
        .unwrap()
    }

    /// Pikachu against a one-HP Golduck: the first hit ends the battle.
    fn one_hit_session() -> BattleSession {
        let pikachu = TestCombatantBuilder::new(25).with_moves(&["thunderbolt"]).build();
        let golduck = TestCombatantBuilder::new(55).with_hp(1).build();
        create_test_session(vec![pikachu], vec![golduck])
    }

    #[test]
    fn test_start_announces_battle() {
        let session = brock_session();
        assert_eq!(session.phase(), GameState::Idle);
        assert_eq!(session.turn_number(), 0);
        assert_eq!(session.outcome(), None);
        assert_eq!(session.player_active().name(), "Pikachu");
        assert_eq!(session.opponent_active().name(), "Golem");
        assert_eq!(session.player_team().len(), 3);
        assert_eq!(session.log().latest(), Some("Gym Leader Brock wants to battle!"));
    }

    #[test]
    fn test_start_rejects_empty_roster() {
        let result = BattleSession::start(&[], &roster(&[76]), "Brock", &EngineConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_move_rejected_while_turn_is_resolving() {
        let mut session = brock_session();
        let mut rng = predictable_rng();

        session.select_move(0, &mut rng).unwrap();
        assert_eq!(session.phase(), GameState::Resolving);
        let consumed = rng.consumed();

        assert_eq!(
            session.select_move(0, &mut rng),
            Err(ActionError::TurnInProgress)
        );
        assert_eq!(rng.consumed(), consumed);
        assert_eq!(session.turn_number(), 1);

        session.finish_turn().unwrap();
        assert_eq!(session.phase(), GameState::Idle);
        assert_eq!(session.finish_turn(), Err(ActionError::NoTurnInProgress));
    }

    #[test]
    fn test_move_rejected_after_battle_concluded() {
        let mut session = one_hit_session();
        let report = session
            .select_move(0, &mut TurnRng::new_for_test(vec![1, 1, 50, 100]))
            .unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Win));
        assert_eq!(session.phase(), GameState::Concluded);

        // Finishing playback keeps the terminal phase
        session.finish_turn().unwrap();
        assert_eq!(session.phase(), GameState::Concluded);
        assert_eq!(session.outcome(), Some(BattleOutcome::Win));

        let mut rng = TurnRng::new_for_test(vec![]);
        assert_eq!(
            session.select_move(0, &mut rng),
            Err(ActionError::BattleConcluded)
        );
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_invalid_move_index_changes_nothing() {
        let mut session = one_hit_session();
        let before = session.state().clone();
        let mut rng = TurnRng::new_for_test(vec![]);

        assert_eq!(
            session.select_move(1, &mut rng),
            Err(ActionError::InvalidMoveIndex(1))
        );
        assert_eq!(session.state(), &before);
        assert_eq!(session.phase(), GameState::Idle);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_reset_restores_both_teams() {
        let mut session = one_hit_session();
        session
            .play_turn(0, &mut TurnRng::new_for_test(vec![1, 1, 50, 100]))
            .unwrap();
        assert!(session.opponent_active().is_fainted());

        session.reset();
        assert_eq!(session.phase(), GameState::Idle);
        assert_eq!(session.outcome(), None);
        assert_eq!(session.turn_number(), 0);
        assert!(!session.opponent_active().is_fainted());
        assert_eq!(
            session.opponent_active().current_hp(),
            session.opponent_active().max_hp()
        );
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_log_keeps_only_the_newest_lines() {
        let mut session = brock_session();
        for _ in 0..3 {
            if session.phase() != GameState::Idle {
                break;
            }
            session.play_turn(0, &mut predictable_rng()).unwrap();
        }
        assert_eq!(session.log().len(), 5);
    }

    #[test]
    fn test_random_battles_always_conclude_once() {
        for seed in 0..20 {
            let mut session = brock_session();
            let mut rng = TurnRng::seeded(seed);
            let mut concluded_events = 0;

            for _ in 0..1000 {
                if session.phase() == GameState::Concluded {
                    break;
                }
                let move_count = session.player_active().moves().len();
                let move_index = rng.pick_index(move_count, "test player move");
                let report = session.play_turn(move_index, &mut rng).unwrap();
                concluded_events += count_events(&report.events, |e| {
                    matches!(e, BattleEvent::BattleConcluded { .. })
                });
            }

            assert_eq!(session.phase(), GameState::Concluded, "seed {}", seed);
            assert!(session.outcome().is_some(), "seed {}", seed);
            assert_eq!(concluded_events, 1, "seed {}", seed);
            let loser_defeated = match session.outcome() {
                Some(BattleOutcome::Win) => session.opponent_team().is_defeated(),
                Some(BattleOutcome::Loss) => session.player_team().is_defeated(),
                None => false,
            };
            assert!(loser_defeated, "seed {}", seed);
        }
    }
}
