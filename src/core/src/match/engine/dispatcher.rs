use crate::r#match::engine::discipline::DisciplineSystem;
use crate::r#match::engine::events::{MatchEvent, MatchEventType};
use crate::r#match::engine::momentum::MomentumTracker;
use crate::r#match::engine::rating::RatingEngine;
use crate::r#match::engine::state::MatchState;
use crate::r#match::engine::tuning::EngineTuning;
use log::debug;

/// Single choke point every generated event passes through: statistics,
/// score, ratings and momentum all update here before the event is appended,
/// so the log and the counters can never drift apart.
pub struct EventDispatcher;

impl EventDispatcher {
    pub fn dispatch(state: &mut MatchState, tuning: &EngineTuning, event: MatchEvent) {
        debug!(
            "tick {} {:?} {:?} player={:?}",
            event.tick, event.side, event.event_type, event.player_id
        );

        Self::update_statistics(state, &event);

        let conceding_goalkeeper = if event.event_type == MatchEventType::Goal {
            state
                .side(event.side.opposite())
                .goalkeeper()
                .map(|keeper| keeper.id)
        } else {
            None
        };

        RatingEngine::apply_event(
            &mut state.ratings,
            &event,
            conceding_goalkeeper,
            &tuning.rating,
        );

        MomentumTracker::apply_event(state, event.event_type, event.side, &tuning.momentum);

        if event.event_type == MatchEventType::Goal {
            match event.side {
                crate::r#match::engine::events::TeamSide::Home => state.score.home += 1,
                crate::r#match::engine::events::TeamSide::Away => state.score.away += 1,
            }

            // A conceding goal ends the opponent's power play early.
            DisciplineSystem::restore_after_opponent_goal(state, event.side);
        }

        state.events.push(event);
    }

    /// Shooter rating credit for an on-target effort that was saved.
    pub fn credit_shot_on_target(state: &mut MatchState, shooter_id: u32, tuning: &EngineTuning) {
        RatingEngine::credit_shot_on_target(&mut state.ratings, shooter_id, &tuning.rating);
    }

    fn update_statistics(state: &mut MatchState, event: &MatchEvent) {
        let statistics = &mut state.side_mut(event.side).statistics;

        match event.event_type {
            MatchEventType::Shot => statistics.shots += 1,
            MatchEventType::Goal => {
                statistics.shots += 1;
                statistics.shots_on_target += 1;
            }
            MatchEventType::Save => statistics.saves += 1,
            MatchEventType::Block => statistics.blocked_shots += 1,
            MatchEventType::Tackle => statistics.tackles += 1,
            MatchEventType::Interception => statistics.interceptions += 1,
            MatchEventType::DribbleSuccess => statistics.dribbles_completed += 1,
            MatchEventType::DribbleFail => statistics.dribbles_failed += 1,
            MatchEventType::Foul => statistics.fouls += 1,
            MatchEventType::YellowCard => statistics.yellow_cards += 1,
            MatchEventType::RedCard => statistics.red_cards += 1,
            MatchEventType::Corner => statistics.corners += 1,
            MatchEventType::Substitution => statistics.substitutions += 1,
            MatchEventType::Penalty => statistics.penalties_awarded += 1,
        }

        // A save also means the opponent put a shot on target.
        if event.event_type == MatchEventType::Save {
            let attacking = &mut state.side_mut(event.side.opposite()).statistics;
            attacking.shots += 1;
            attacking.shots_on_target += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::FutsalEngine;
    use crate::r#match::engine::events::TeamSide;
    use crate::r#match::engine::state::test_support;

    fn fresh() -> (MatchState, EngineTuning) {
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        let state = FutsalEngine::with_seed(5).initialize(&home, &away).unwrap();
        (state, EngineTuning::default())
    }

    #[test]
    fn test_goal_updates_score_stats_and_momentum() {
        let (mut state, tuning) = fresh();
        let scorer = state.home.lineup[4].id;

        let event = MatchEvent::new(12, MatchEventType::Goal, TeamSide::Home).with_player(scorer);
        EventDispatcher::dispatch(&mut state, &tuning, event);

        assert_eq!(state.score.home, 1);
        assert_eq!(state.home.statistics.shots_on_target, 1);
        assert!(state.momentum > 50.0);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_save_counts_shot_for_the_other_side() {
        let (mut state, tuning) = fresh();
        let keeper = state.away.goalkeeper().unwrap().id;

        let event = MatchEvent::new(12, MatchEventType::Save, TeamSide::Away).with_player(keeper);
        EventDispatcher::dispatch(&mut state, &tuning, event);

        assert_eq!(state.away.statistics.saves, 1);
        assert_eq!(state.home.statistics.shots, 1);
        assert_eq!(state.home.statistics.shots_on_target, 1);
    }
}
