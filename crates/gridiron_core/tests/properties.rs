//! Property tests over the stochastic core: factor normalization, yardage
//! floor, and the closed outcome set must hold for any attribute spread.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gridiron_core::{
    FieldState, PlayOutcome, Player, Position, Role, RunConceptExecutor, RunConceptLibrary,
};

fn back(vision: u8, power: u8, speed: u8, strength: u8) -> Player {
    Player::new(1, "Prop Back", Position::RB, Role::Starter)
        .with_attribute("vision", vision)
        .with_attribute("power", power)
        .with_attribute("speed", speed)
        .with_attribute("strength", strength)
}

fn defender(id: u32, gap: u8, stop: u8) -> Player {
    Player::new(id, format!("Prop DL {id}"), Position::DT, Role::Starter)
        .with_attribute("gap_discipline", gap)
        .with_attribute("run_stopping", stop)
}

proptest! {
    #[test]
    fn factors_stay_in_unit_interval(
        vision in 0u8..=100,
        power in 0u8..=100,
        speed in 0u8..=100,
        gap in 0u8..=100,
        stop in 0u8..=100,
        seed in any::<u64>(),
    ) {
        let rb = back(vision, power, speed, 50);
        let dl = vec![defender(10, gap, stop), defender(11, gap, stop)];
        let library = RunConceptLibrary::new();
        let executor = RunConceptExecutor::new();
        let state = FieldState::new(1, 10, 50);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for concept in library.get_all_concepts() {
            let run = executor.execute_concept(
                concept, Some(&rb), &[], &dl, &[], &state, &mut rng,
            );
            for factor in &run.success_factors {
                prop_assert!((0.0..=1.0).contains(&factor.value), "{} = {}", factor.name, factor.value);
            }
            prop_assert!((0.0..=1.0).contains(&run.success_probability));
        }
    }

    #[test]
    fn yardage_floor_and_outcome_set_hold_everywhere(
        down in 1u8..=4,
        yards_to_go in 1u8..=20,
        field_position in 1u8..=99,
        strength in 0u8..=100,
        seed in any::<u64>(),
    ) {
        let rb = back(50, 50, 50, strength);
        let library = RunConceptLibrary::new();
        let executor = RunConceptExecutor::new();
        let state = FieldState::new(down, yards_to_go, field_position);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for concept in library.get_all_concepts() {
            let run = executor.execute_concept(
                concept, Some(&rb), &[], &[], &[], &state, &mut rng,
            );
            prop_assert!(run.yards_gained >= -5);
            prop_assert!(matches!(
                run.outcome,
                PlayOutcome::Gain
                    | PlayOutcome::Touchdown
                    | PlayOutcome::Fumble
                    | PlayOutcome::Safety
            ));
            // Priority: a run reaching the goal line is a touchdown, full stop.
            if run.yards_gained >= state.yards_to_goal() {
                prop_assert_eq!(run.outcome, PlayOutcome::Touchdown);
            } else if state.field_position as i32 + run.yards_gained <= 0 {
                prop_assert_eq!(run.outcome, PlayOutcome::Safety);
            }
        }
    }

    #[test]
    fn concept_selection_always_lands_in_catalog(
        down in 1u8..=4,
        yards_to_go in 1u8..=25,
        field_position in 0u8..=100,
        seed in any::<u64>(),
    ) {
        use gridiron_core::{Formation, RbStyle};

        let library = RunConceptLibrary::new();
        let state = FieldState::new(down, yards_to_go, field_position);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let concept = library.select_concept_for_situation(
            &state, Formation::Singleback, RbStyle::Balanced, &mut rng,
        );
        prop_assert!(library.concept_by_name(concept.name).is_some());
        // Either the concept suits the situation, or it is the fallback.
        if !concept.is_suitable_for_situation(&state) {
            prop_assert_eq!(concept.name, "Inside Zone");
        }
    }
}
