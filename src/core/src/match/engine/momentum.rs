use crate::r#match::engine::events::{MatchEventType, TeamSide};
use crate::r#match::engine::state::MatchState;
use crate::r#match::engine::tuning::MomentumTuning;

/// Single match-wide scalar in 0..100: above 50 the home team is on top,
/// below 50 the away team is. Drifts toward an adjusted equilibrium every
/// tick and is nudged by events as they are dispatched.
pub struct MomentumTracker;

impl MomentumTracker {
    /// Per-tick drift. The resting point is the 50 equilibrium shifted by
    /// the score difference, the flat home advantage and the on-court
    /// fatigue differential; the step toward it is the per-minute decay
    /// split over four ticks.
    pub fn drift_tick(state: &mut MatchState, tuning: &MomentumTuning) {
        let fatigue_differential = state.average_lineup_energy(TeamSide::Home)
            - state.average_lineup_energy(TeamSide::Away);

        let target = tuning.equilibrium
            + state.score.difference() as f32 * tuning.score_difference_delta
            + tuning.home_advantage
            + fatigue_differential * tuning.fatigue_differential_scale;
        let target = target.clamp(0.0, 100.0);

        let step = tuning.decay_per_minute / 4.0;
        let distance = target - state.momentum;

        if distance.abs() <= step {
            state.momentum = target;
        } else {
            state.momentum += step * distance.signum();
        }

        state.momentum = state.momentum.clamp(0.0, 100.0);
    }

    /// Event nudge, signed by the side the event credits.
    pub fn apply_event(
        state: &mut MatchState,
        event_type: MatchEventType,
        side: TeamSide,
        tuning: &MomentumTuning,
    ) {
        let delta = match event_type {
            MatchEventType::Goal => tuning.goal_delta,
            MatchEventType::Shot => tuning.shot_delta,
            MatchEventType::Save => tuning.save_delta,
            MatchEventType::Tackle | MatchEventType::Interception => tuning.tackle_delta,
            MatchEventType::DribbleSuccess => tuning.dribble_delta,
            MatchEventType::YellowCard => tuning.yellow_delta,
            MatchEventType::RedCard => tuning.red_delta,
            _ => 0.0,
        };

        if delta == 0.0 {
            return;
        }

        let signed = match side {
            TeamSide::Home => delta,
            TeamSide::Away => -delta,
        };

        state.momentum = (state.momentum + signed).clamp(0.0, 100.0);
    }

    /// Additive possession-change adjustment from the possessor's point of
    /// view: a team riding momentum keeps the ball more often. Spread over
    /// the full 0..100 momentum range this is the momentum/200 term.
    pub fn possession_change_adjustment(state: &MatchState, possessor: TeamSide) -> f32 {
        -state.momentum_lean(possessor) * 0.25
    }

    /// Additive shot-quality term for one side, scaled to the configured
    /// swing (+-swing at the momentum extremes).
    pub fn shot_quality_term(state: &MatchState, side: TeamSide, swing: f32) -> f32 {
        state.momentum_lean(side) * swing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::FutsalEngine;
    use crate::r#match::engine::state::test_support;

    fn fresh_state() -> MatchState {
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        FutsalEngine::with_seed(11).initialize(&home, &away).unwrap()
    }

    #[test]
    fn test_drift_moves_toward_equilibrium() {
        let tuning = MomentumTuning::default();
        let mut state = fresh_state();

        state.momentum = 90.0;
        for _ in 0..40 {
            MomentumTracker::drift_tick(&mut state, &tuning);
        }

        assert!(state.momentum < 90.0);
        assert!((0.0..=100.0).contains(&state.momentum));
    }

    #[test]
    fn test_goal_nudges_are_signed_by_side() {
        let tuning = MomentumTuning::default();
        let mut state = fresh_state();

        state.momentum = 50.0;
        MomentumTracker::apply_event(&mut state, MatchEventType::Goal, TeamSide::Home, &tuning);
        assert_eq!(state.momentum, 75.0);

        MomentumTracker::apply_event(&mut state, MatchEventType::Goal, TeamSide::Away, &tuning);
        assert_eq!(state.momentum, 50.0);
    }

    #[test]
    fn test_momentum_never_escapes_bounds() {
        let tuning = MomentumTuning::default();
        let mut state = fresh_state();

        state.momentum = 95.0;
        MomentumTracker::apply_event(&mut state, MatchEventType::Goal, TeamSide::Home, &tuning);
        assert_eq!(state.momentum, 100.0);

        state.momentum = 5.0;
        MomentumTracker::apply_event(&mut state, MatchEventType::RedCard, TeamSide::Home, &tuning);
        assert!(state.momentum >= 0.0);
    }

    #[test]
    fn test_possession_adjustment_favors_leading_side() {
        let mut state = fresh_state();

        state.momentum = 80.0;
        // Home is on top: home keeps the ball more, away loses it more.
        assert!(MomentumTracker::possession_change_adjustment(&state, TeamSide::Home) < 0.0);
        assert!(MomentumTracker::possession_change_adjustment(&state, TeamSide::Away) > 0.0);
    }
}
