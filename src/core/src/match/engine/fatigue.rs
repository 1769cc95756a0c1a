use crate::r#match::engine::events::TeamSide;
use crate::r#match::engine::state::MatchState;
use crate::r#match::engine::tuning::FatigueTuning;

/// Per-player energy pool: on-court players burn energy each tick, the bench
/// recovers, and every attribute read is scaled through `energy_factor`.
pub struct FatigueTracker;

impl FatigueTracker {
    /// Deplete the on-court players of both teams and recover both benches.
    pub fn advance_tick(state: &mut MatchState, tuning: &FatigueTuning) {
        for side in [TeamSide::Home, TeamSide::Away] {
            let intensity = Self::intensity(state, side, tuning);
            let away_penalty = if side == TeamSide::Away {
                tuning.away_penalty
            } else {
                1.0
            };

            let depletion = tuning.depletion_per_tick * intensity * away_penalty;
            let recovery = tuning.depletion_per_tick * tuning.bench_recovery_factor;

            let lineup_ids: Vec<u32> = state.side(side).lineup.iter().map(|p| p.id).collect();
            let bench_ids: Vec<u32> = state.side(side).bench.iter().map(|p| p.id).collect();

            for id in lineup_ids {
                let energy = state.energy(id) - depletion;
                state.set_energy(id, energy);
            }

            for id in bench_ids {
                let energy = state.energy(id) + recovery;
                state.set_energy(id, energy);
            }
        }
    }

    /// Intensity from match closeness and the team's pressing load, bounded
    /// to the configured window.
    fn intensity(state: &MatchState, side: TeamSide, tuning: &FatigueTuning) -> f32 {
        let tactical_rate = state.side(side).tactics.modifiers().fatigue_rate;
        let closeness_bonus = if state.score.is_close() { 0.1 } else { -0.1 };

        (tactical_rate + closeness_bonus).clamp(tuning.intensity_floor, tuning.intensity_ceiling)
    }

    /// Linear interpolation of attribute effectiveness: 1.0 at full energy
    /// down to the exhausted floor at zero.
    pub fn energy_factor(energy: f32, tuning: &FatigueTuning) -> f32 {
        let floor = tuning.exhausted_effectiveness;
        floor + (1.0 - floor) * (energy.clamp(0.0, 100.0) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::FutsalEngine;
    use crate::r#match::engine::state::test_support;
    use crate::r#match::engine::tactics::{PressingIntensity, TacticalSetup};

    #[test]
    fn test_energy_factor_interpolation() {
        let tuning = FatigueTuning::default();

        assert_eq!(FatigueTracker::energy_factor(100.0, &tuning), 1.0);
        assert_eq!(FatigueTracker::energy_factor(0.0, &tuning), 0.5);
        assert_eq!(FatigueTracker::energy_factor(50.0, &tuning), 0.75);
    }

    #[test]
    fn test_lineup_tires_and_bench_recovers() {
        let tuning = FatigueTuning::default();
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        let mut state = FutsalEngine::with_seed(3).initialize(&home, &away).unwrap();

        let starter = state.home.lineup[1].id;
        let substitute = state.home.bench[0].id;
        state.set_energy(substitute, 60.0);

        FatigueTracker::advance_tick(&mut state, &tuning);

        assert!(state.energy(starter) < 100.0);
        assert!(state.energy(substitute) > 60.0);
    }

    #[test]
    fn test_away_team_tires_faster() {
        let tuning = FatigueTuning::default();
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        let mut state = FutsalEngine::with_seed(3).initialize(&home, &away).unwrap();

        let home_starter = state.home.lineup[0].id;
        let away_starter = state.away.lineup[0].id;

        for _ in 0..40 {
            FatigueTracker::advance_tick(&mut state, &tuning);
        }

        assert!(state.energy(away_starter) < state.energy(home_starter));
    }

    #[test]
    fn test_high_press_burns_more_energy() {
        let tuning = FatigueTuning::default();
        let pressing_tactics = TacticalSetup {
            pressing: PressingIntensity::High,
            ..TacticalSetup::default()
        };
        let home = test_support::squad_with_tactics(1, 1, 10.0, pressing_tactics);
        let away = test_support::squad(2, 100, 10.0);
        let mut state = FutsalEngine::with_seed(3).initialize(&home, &away).unwrap();

        let home_starter = state.home.lineup[0].id;
        let away_starter = state.away.lineup[0].id;

        for _ in 0..40 {
            FatigueTracker::advance_tick(&mut state, &tuning);
        }

        // The high press outweighs the away-side penalty.
        assert!(state.energy(home_starter) < state.energy(away_starter));
    }

    #[test]
    fn test_energy_is_always_bounded() {
        let tuning = FatigueTuning::default();
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        let mut state = FutsalEngine::with_seed(3).initialize(&home, &away).unwrap();

        for _ in 0..500 {
            FatigueTracker::advance_tick(&mut state, &tuning);
        }

        for energy in state.fatigue.values() {
            assert!((0.0..=100.0).contains(energy));
        }
    }
}
