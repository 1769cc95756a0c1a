use crate::r#match::engine::discipline::DisciplineSystem;
use crate::r#match::engine::events::TeamSide;
use crate::r#match::engine::fatigue::FatigueTracker;
use crate::r#match::engine::fly_keeper::FlyKeeperSystem;
use crate::r#match::engine::generator::EventGenerator;
use crate::r#match::engine::momentum::MomentumTracker;
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::rating::RatingAccumulator;
use crate::r#match::engine::state::{HALF_TIME_TICK, MatchState, TeamMatchState};
use crate::r#match::engine::substitutions::SubstitutionSystem;
use crate::r#match::engine::tuning::EngineTuning;
use crate::r#match::error::EngineError;
use crate::r#match::result::MatchResult;
use crate::r#match::squad::MatchSquad;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

const STARTERS: usize = 5;

/// Tick-based futsal match simulation: 160 ticks of 15 simulated seconds.
/// The engine owns the random stream and the tuning table; all match data
/// lives in the `MatchState` it hands out, so one engine drives one match
/// while many engines run in parallel.
pub struct FutsalEngine {
    tuning: EngineTuning,
    rng: StdRng,
}

impl FutsalEngine {
    pub fn new(tuning: EngineTuning, seed: u64) -> Self {
        FutsalEngine {
            tuning,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Default tuning with a deterministic random stream. Equal seeds over
    /// equal squads replay the identical match.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(EngineTuning::default(), seed)
    }

    pub fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    /// Validate both rosters and build the kickoff state. Each team needs
    /// exactly five starters, one of them a goalkeeper.
    pub fn initialize(
        &self,
        home: &MatchSquad,
        away: &MatchSquad,
    ) -> Result<MatchState, EngineError> {
        let home_state = Self::team_state(home, TeamSide::Home)?;
        let away_state = Self::team_state(away, TeamSide::Away)?;

        let mut state = MatchState {
            tick: 0,
            score: Default::default(),
            possession: TeamSide::Home,
            momentum: 50.0,
            home: home_state,
            away: away_state,
            fatigue: Default::default(),
            counter_attack: None,
            events: Vec::new(),
            ratings: Default::default(),
            finalized: false,
        };

        for player in state
            .home
            .lineup
            .iter()
            .chain(&state.home.bench)
            .chain(&state.away.lineup)
            .chain(&state.away.bench)
        {
            state.fatigue.insert(player.id, 100.0);
            let accumulator = if player.is_goalkeeper() {
                RatingAccumulator::goalkeeper()
            } else {
                RatingAccumulator::default()
            };
            state.ratings.insert(player.id, accumulator);
        }

        debug!(
            "match initialized: {} vs {}",
            state.home.team_name, state.away.team_name
        );

        Ok(state)
    }

    fn team_state(squad: &MatchSquad, side: TeamSide) -> Result<TeamMatchState, EngineError> {
        if squad.main_squad.len() != STARTERS {
            return Err(EngineError::InvalidLineupSize {
                side,
                count: squad.main_squad.len(),
            });
        }
        if !squad.main_squad.iter().any(|p| p.position.is_goalkeeper()) {
            return Err(EngineError::MissingGoalkeeper { side });
        }

        Ok(TeamMatchState {
            team_id: squad.team_id,
            team_name: squad.team_name.clone(),
            tactics: squad.tactics,
            lineup: squad.main_squad.iter().map(MatchPlayer::from_player).collect(),
            bench: squad.substitutes.iter().map(MatchPlayer::from_player).collect(),
            accumulated_fouls: 0,
            red_cards: Vec::new(),
            suspended: Vec::new(),
            fly_keeper_active: false,
            fly_keeper_player: None,
            statistics: Default::default(),
        })
    }

    /// Advance the match by one 15-second tick.
    pub fn advance_tick(&mut self, state: &mut MatchState) -> Result<(), EngineError> {
        if state.is_complete() {
            return Err(EngineError::MatchAlreadyComplete { tick: state.tick });
        }

        state.side_mut(state.possession).statistics.possession_ticks += 1;

        FatigueTracker::advance_tick(state, &self.tuning.fatigue);
        DisciplineSystem::restore_due(state);
        SubstitutionSystem::auto_tick(state, &self.tuning);
        FlyKeeperSystem::evaluate_tick(state, &self.tuning.fly_keeper, &mut self.rng);
        EventGenerator::generate_tick(state, &self.tuning, &mut self.rng);
        MomentumTracker::drift_tick(state, &self.tuning.momentum);

        state.tick += 1;
        if state.tick == HALF_TIME_TICK {
            DisciplineSystem::half_time_reset(state);
            debug!("half-time: {}-{}", state.score.home, state.score.away);
        }

        Ok(())
    }

    /// Run the remaining ticks to the final whistle.
    pub fn play(&mut self, state: &mut MatchState) -> Result<(), EngineError> {
        while !state.is_complete() {
            self.advance_tick(state)?;
        }
        Ok(())
    }

    /// Initialize, play and finalize in one call.
    pub fn simulate(
        &mut self,
        home: &MatchSquad,
        away: &MatchSquad,
    ) -> Result<MatchResult, EngineError> {
        let mut state = self.initialize(home, away)?;
        self.play(&mut state)?;
        self.finalize(&mut state)
    }

    /// Compute final ratings and freeze the state into an immutable result.
    /// Callable exactly once, only after the final tick.
    pub fn finalize(&self, state: &mut MatchState) -> Result<MatchResult, EngineError> {
        if !state.is_complete() {
            return Err(EngineError::MatchNotComplete { tick: state.tick });
        }
        if state.finalized {
            return Err(EngineError::AlreadyFinalized);
        }

        state.finalized = true;
        let result = MatchResult::from_state(state, &self.tuning.rating);

        debug!(
            "full-time: {} {} - {} {}",
            result.home.team_name, result.score.home, result.score.away, result.away.team_name
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::player::{Player, PlayerPositionType};
    use crate::r#match::engine::state::{TOTAL_TICKS, test_support};
    use crate::r#match::engine::tactics::{Mentality, TacticalSetup};

    #[test]
    fn test_initialize_rejects_short_lineup() {
        let mut home = test_support::squad(1, 1, 10.0);
        home.main_squad.pop();
        let away = test_support::squad(2, 100, 10.0);

        let err = FutsalEngine::with_seed(1).initialize(&home, &away);
        assert_eq!(
            err.unwrap_err(),
            EngineError::InvalidLineupSize {
                side: TeamSide::Home,
                count: 4
            }
        );
    }

    #[test]
    fn test_initialize_rejects_missing_goalkeeper() {
        let mut away = test_support::squad(2, 100, 10.0);
        away.main_squad[0] =
            Player::new(200, String::from("Extra Pivot"), PlayerPositionType::Pivot);
        let home = test_support::squad(1, 1, 10.0);

        let err = FutsalEngine::with_seed(1).initialize(&home, &away);
        assert_eq!(
            err.unwrap_err(),
            EngineError::MissingGoalkeeper {
                side: TeamSide::Away
            }
        );
    }

    #[test]
    fn test_full_match_runs_to_160_ticks() {
        let home = test_support::squad(1, 1, 12.0);
        let away = test_support::squad(2, 100, 12.0);
        let mut engine = FutsalEngine::with_seed(42);

        let mut state = engine.initialize(&home, &away).unwrap();
        engine.play(&mut state).unwrap();

        assert_eq!(state.tick, TOTAL_TICKS);
        assert!(state.is_complete());

        // Possession ticks are conserved across both teams.
        let possession_total = state.home.statistics.possession_ticks as u32
            + state.away.statistics.possession_ticks as u32;
        assert_eq!(possession_total, TOTAL_TICKS as u32);

        // Bounded aggregates.
        assert!((0.0..=100.0).contains(&state.momentum));
        for energy in state.fatigue.values() {
            assert!((0.0..=100.0).contains(energy));
        }
    }

    #[test]
    fn test_cannot_advance_past_full_time() {
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        let mut engine = FutsalEngine::with_seed(8);

        let mut state = engine.initialize(&home, &away).unwrap();
        engine.play(&mut state).unwrap();

        assert_eq!(
            engine.advance_tick(&mut state).unwrap_err(),
            EngineError::MatchAlreadyComplete { tick: TOTAL_TICKS }
        );
    }

    #[test]
    fn test_finalize_requires_full_time_and_runs_once() {
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        let mut engine = FutsalEngine::with_seed(8);

        let mut state = engine.initialize(&home, &away).unwrap();
        assert_eq!(
            engine.finalize(&mut state).unwrap_err(),
            EngineError::MatchNotComplete { tick: 0 }
        );

        engine.play(&mut state).unwrap();
        engine.finalize(&mut state).unwrap();
        assert_eq!(
            engine.finalize(&mut state).unwrap_err(),
            EngineError::AlreadyFinalized
        );
    }

    #[test]
    fn test_same_seed_replays_identical_match() {
        let home = test_support::squad(1, 1, 12.0);
        let away = test_support::squad(2, 100, 12.0);

        let run = |seed: u64| {
            let mut engine = FutsalEngine::with_seed(seed);
            let mut state = engine.initialize(&home, &away).unwrap();
            engine.play(&mut state).unwrap();
            state
        };

        let first = run(777);
        let second = run(777);

        assert_eq!(first.score.home, second.score.home);
        assert_eq!(first.score.away, second.score.away);
        assert_eq!(first.events.len(), second.events.len());
        for (a, b) in first.events.iter().zip(&second.events) {
            assert_eq!(a.tick, b.tick);
            assert_eq!(a.event_type, b.event_type);
            assert_eq!(a.side, b.side);
            assert_eq!(a.player_id, b.player_id);
        }
    }

    #[test]
    fn test_half_time_resets_accumulated_fouls() {
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        let mut engine = FutsalEngine::with_seed(55);

        let mut state = engine.initialize(&home, &away).unwrap();
        while state.tick < HALF_TIME_TICK {
            engine.advance_tick(&mut state).unwrap();
        }

        assert_eq!(state.home.accumulated_fouls, 0);
        assert_eq!(state.away.accumulated_fouls, 0);
    }

    #[test]
    fn test_attacking_mentality_outshoots_defensive_over_many_matches() {
        let attacking_tactics = TacticalSetup {
            mentality: Mentality::VeryAttacking,
            ..TacticalSetup::default()
        };
        let defensive_tactics = TacticalSetup {
            mentality: Mentality::VeryDefensive,
            ..TacticalSetup::default()
        };

        let mut attacking_shots = 0u32;
        let mut defensive_shots = 0u32;
        for seed in 0..15 {
            let home = test_support::squad_with_tactics(1, 1, 12.0, attacking_tactics);
            let away = test_support::squad_with_tactics(2, 100, 12.0, defensive_tactics);
            let mut engine = FutsalEngine::with_seed(seed);
            let mut state = engine.initialize(&home, &away).unwrap();
            engine.play(&mut state).unwrap();

            attacking_shots += state.home.statistics.shots as u32;
            defensive_shots += state.away.statistics.shots as u32;
        }

        assert!(
            attacking_shots > defensive_shots,
            "attacking {attacking_shots} vs defensive {defensive_shots}"
        );
    }

    #[test]
    fn test_goal_totals_are_futsal_realistic() {
        let mut total_goals = 0u32;
        let matches = 20;
        for seed in 100..100 + matches {
            let home = test_support::squad(1, 1, 12.0);
            let away = test_support::squad(2, 100, 12.0);
            let mut engine = FutsalEngine::with_seed(seed);
            let result = engine.simulate(&home, &away).unwrap();

            total_goals += result.score.home as u32 + result.score.away as u32;
        }

        let mean = total_goals as f32 / matches as f32;
        assert!(
            (2.0..=10.0).contains(&mean),
            "mean goals per match was {mean}"
        );
    }

    #[test]
    fn test_counter_attacks_occur_across_matches() {
        let mut counter_events = 0u32;
        for seed in 0..10 {
            let home = test_support::squad(1, 1, 12.0);
            let away = test_support::squad(2, 100, 12.0);
            let mut engine = FutsalEngine::with_seed(seed);
            let mut state = engine.initialize(&home, &away).unwrap();
            engine.play(&mut state).unwrap();

            counter_events += state
                .events
                .iter()
                .filter(|e| e.is_counter_attack)
                .count() as u32;
        }

        assert!(counter_events > 0);
    }

    #[test]
    fn test_lineups_hold_five_unless_red_carded() {
        let home = test_support::squad(1, 1, 12.0);
        let away = test_support::squad(2, 100, 12.0);
        let mut engine = FutsalEngine::with_seed(64);
        let mut state = engine.initialize(&home, &away).unwrap();

        while !state.is_complete() {
            engine.advance_tick(&mut state).unwrap();

            for side in [TeamSide::Home, TeamSide::Away] {
                let team = state.side(side);
                if team.serving_red_card() {
                    assert!(team.lineup.len() < 5, "at tick {}", state.tick);
                } else {
                    assert_eq!(team.lineup.len(), 5, "at tick {}", state.tick);
                }
            }
        }
    }
}
