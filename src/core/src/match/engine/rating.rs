use crate::r#match::engine::events::{MatchEvent, MatchEventType};
use crate::r#match::engine::tuning::RatingTuning;

/// Running rating state for one player. Points accumulate during the match;
/// the bounded rating is computed once at finalization.
#[derive(Debug, Clone, Default)]
pub struct RatingAccumulator {
    pub points: f32,
    pub is_goalkeeper: bool,
}

impl RatingAccumulator {
    pub fn goalkeeper() -> Self {
        RatingAccumulator {
            points: 0.0,
            is_goalkeeper: true,
        }
    }

    /// Final bounded rating from accumulated points plus a small energy
    /// adjustment around the 50-energy midpoint.
    pub fn rating(&self, energy: f32, tuning: &RatingTuning) -> f32 {
        let baseline = if self.is_goalkeeper {
            tuning.goalkeeper_baseline
        } else {
            tuning.outfield_baseline
        };

        let energy_adjustment = (energy - 50.0) * tuning.energy_point_weight;

        (baseline + self.points + energy_adjustment).clamp(tuning.floor, tuning.ceiling)
    }
}

pub struct RatingEngine;

impl RatingEngine {
    /// Credit (or debit) the players referenced by an event. Called from the
    /// single event dispatch path, so every logged event is rated exactly
    /// once.
    pub fn apply_event(
        accumulators: &mut std::collections::HashMap<u32, RatingAccumulator>,
        event: &MatchEvent,
        conceding_goalkeeper: Option<u32>,
        tuning: &RatingTuning,
    ) {
        let mut credit = |player_id: Option<u32>, points: f32| {
            if let Some(id) = player_id {
                accumulators.entry(id).or_default().points += points;
            }
        };

        match event.event_type {
            MatchEventType::Goal => {
                credit(event.player_id, tuning.goal);
                credit(event.assist_player_id, tuning.assist);
                credit(conceding_goalkeeper, tuning.goal_conceded);
            }
            MatchEventType::Shot => {
                // Off-target attempt; on-target shots arrive as Save events
                // for the keeper and Goal events for the scorer.
                credit(event.player_id, tuning.shot_missed);
            }
            MatchEventType::Save => {
                credit(event.player_id, tuning.save);
            }
            MatchEventType::Block => {
                // The event carries the blocking defender, not the shooter.
                credit(event.player_id, tuning.tackle);
            }
            MatchEventType::Tackle => {
                credit(event.player_id, tuning.tackle);
            }
            MatchEventType::Interception => {
                credit(event.player_id, tuning.interception);
            }
            MatchEventType::DribbleSuccess => {
                credit(event.player_id, tuning.dribble);
            }
            MatchEventType::DribbleFail => {
                credit(event.player_id, -tuning.dribble);
            }
            MatchEventType::Foul => {
                credit(event.player_id, tuning.foul);
            }
            MatchEventType::YellowCard => {
                credit(event.player_id, tuning.yellow_card);
            }
            MatchEventType::RedCard => {
                credit(event.player_id, tuning.red_card);
            }
            MatchEventType::Corner | MatchEventType::Substitution | MatchEventType::Penalty => {}
        }
    }

    /// A shooter whose on-target effort was saved still gets on-target
    /// credit; the dispatch path calls this alongside the Save event.
    pub fn credit_shot_on_target(
        accumulators: &mut std::collections::HashMap<u32, RatingAccumulator>,
        shooter_id: u32,
        tuning: &RatingTuning,
    ) {
        accumulators.entry(shooter_id).or_default().points += tuning.shot_on_target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::events::TeamSide;
    use std::collections::HashMap;

    #[test]
    fn test_rating_bounds() {
        let tuning = RatingTuning::default();

        let mut hero = RatingAccumulator::default();
        hero.points = 12.0;
        assert_eq!(hero.rating(100.0, &tuning), tuning.ceiling);

        let mut villain = RatingAccumulator::default();
        villain.points = -9.0;
        assert_eq!(villain.rating(0.0, &tuning), tuning.floor);
    }

    #[test]
    fn test_energy_adjustment_is_small() {
        let tuning = RatingTuning::default();
        let accumulator = RatingAccumulator::default();

        let fresh = accumulator.rating(100.0, &tuning);
        let spent = accumulator.rating(0.0, &tuning);

        assert!((fresh - spent - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_goal_credits_scorer_assist_and_debits_keeper() {
        let tuning = RatingTuning::default();
        let mut accumulators: HashMap<u32, RatingAccumulator> = HashMap::new();

        let goal = MatchEvent::new(10, MatchEventType::Goal, TeamSide::Home)
            .with_player(7)
            .with_assist(9);
        RatingEngine::apply_event(&mut accumulators, &goal, Some(30), &tuning);

        assert_eq!(accumulators[&7].points, tuning.goal);
        assert_eq!(accumulators[&9].points, tuning.assist);
        assert_eq!(accumulators[&30].points, tuning.goal_conceded);
    }

    #[test]
    fn test_block_credits_the_defender() {
        let tuning = RatingTuning::default();
        let mut accumulators: HashMap<u32, RatingAccumulator> = HashMap::new();

        let block = MatchEvent::new(22, MatchEventType::Block, TeamSide::Away).with_player(12);
        RatingEngine::apply_event(&mut accumulators, &block, None, &tuning);

        assert_eq!(accumulators[&12].points, tuning.tackle);
        assert!(accumulators[&12].points > 0.0);
    }

    #[test]
    fn test_goalkeeper_baseline_differs() {
        let tuning = RatingTuning::default();

        let keeper = RatingAccumulator::goalkeeper();
        let outfield = RatingAccumulator::default();

        assert!(keeper.rating(50.0, &tuning) > outfield.rating(50.0, &tuning));
    }
}
