use crate::r#match::engine::events::{MatchEvent, TeamSide};
use crate::r#match::engine::state::{MatchState, Score};
use crate::r#match::engine::substitutions::SubstitutionSystem;
use crate::r#match::engine::tactics::{FlyGoalkeeperMode, TacticalSetup};
use crate::r#match::engine::FutsalEngine;
use crate::r#match::error::EngineError;
use crate::r#match::result::MatchResult;
use crate::r#match::squad::MatchSquad;
use std::time::Duration;

/// Wall-clock pacing of an interactive session. One tick is 15 simulated
/// seconds; at normal speed it plays out over 1.5 real seconds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SimulationSpeed {
    Normal,
    Double,
    Quadruple,
}

impl SimulationSpeed {
    pub fn tick_interval(&self) -> Duration {
        let base = Duration::from_millis(1500);
        match self {
            SimulationSpeed::Normal => base,
            SimulationSpeed::Double => base / 2,
            SimulationSpeed::Quadruple => base / 4,
        }
    }
}

/// Commands a viewer can issue between ticks. Applied atomically before the
/// next tick is generated.
#[derive(Debug, Clone)]
pub enum UserAction {
    Pause,
    Resume,
    SetSpeed(SimulationSpeed),
    ChangeTactics {
        side: TeamSide,
        tactics: TacticalSetup,
    },
    SetFlyGoalkeeper {
        side: TeamSide,
        mode: FlyGoalkeeperMode,
    },
    Substitute {
        side: TeamSide,
        player_out: u32,
        player_in: u32,
    },
}

/// Viewer-facing state after one tick: the running aggregates plus only the
/// events that happened since the previous snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MatchSnapshot {
    pub tick: u16,
    pub minute: u8,
    pub score: Score,
    pub possession: TeamSide,
    pub momentum: f32,
    pub paused: bool,
    pub home: TeamSnapshot,
    pub away: TeamSnapshot,
    pub new_events: Vec<MatchEvent>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TeamSnapshot {
    pub lineup: Vec<u32>,
    pub suspended: Vec<u32>,
    pub tactics: TacticalSetup,
    pub statistics: crate::r#match::statistics::TeamStatistics,
}

impl TeamSnapshot {
    fn of(team: &crate::r#match::engine::state::TeamMatchState) -> Self {
        TeamSnapshot {
            lineup: team.lineup.iter().map(|p| p.id).collect(),
            suspended: team.suspended.iter().map(|p| p.id).collect(),
            tactics: team.tactics,
            statistics: team.statistics.clone(),
        }
    }
}

/// Interactive wrapper around one engine-driven match. The caller owns the
/// clock: it sleeps `tick_interval()` between `advance()` calls and feeds
/// user actions in as they arrive.
pub struct MatchSession {
    engine: FutsalEngine,
    state: MatchState,
    speed: SimulationSpeed,
    paused: bool,
    event_cursor: usize,
}

impl MatchSession {
    pub fn start(
        engine: FutsalEngine,
        home: &MatchSquad,
        away: &MatchSquad,
    ) -> Result<Self, EngineError> {
        let state = engine.initialize(home, away)?;
        Ok(MatchSession {
            engine,
            state,
            speed: SimulationSpeed::Normal,
            paused: false,
            event_cursor: 0,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn apply(&mut self, action: UserAction) -> Result<(), EngineError> {
        match action {
            UserAction::Pause => {
                self.paused = true;
                Ok(())
            }
            UserAction::Resume => {
                self.paused = false;
                Ok(())
            }
            UserAction::SetSpeed(speed) => {
                self.speed = speed;
                Ok(())
            }
            UserAction::ChangeTactics { side, tactics } => {
                self.state.side_mut(side).tactics = tactics;
                Ok(())
            }
            UserAction::SetFlyGoalkeeper { side, mode } => {
                self.state.side_mut(side).tactics.fly_goalkeeper = mode;
                Ok(())
            }
            UserAction::Substitute {
                side,
                player_out,
                player_in,
            } => SubstitutionSystem::manual(
                &mut self.state,
                self.engine.tuning(),
                side,
                player_out,
                player_in,
            ),
        }
    }

    /// Advance one tick unless paused or finished; either way return the
    /// current snapshot. Events already delivered are not repeated.
    pub fn advance(&mut self) -> Result<MatchSnapshot, EngineError> {
        if !self.paused && !self.state.is_complete() {
            self.engine.advance_tick(&mut self.state)?;
        }

        let new_events = self.state.events[self.event_cursor..].to_vec();
        self.event_cursor = self.state.events.len();

        Ok(MatchSnapshot {
            tick: self.state.tick,
            minute: self.state.minute(),
            score: self.state.score,
            possession: self.state.possession,
            momentum: self.state.momentum,
            paused: self.paused,
            home: TeamSnapshot::of(&self.state.home),
            away: TeamSnapshot::of(&self.state.away),
            new_events,
        })
    }

    /// Finalize into the immutable result once the final tick has played.
    pub fn finish(mut self) -> Result<MatchResult, EngineError> {
        self.engine.finalize(&mut self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::state::{TOTAL_TICKS, test_support};
    use crate::r#match::engine::tactics::Mentality;

    fn session() -> MatchSession {
        let home = test_support::squad(1, 1, 10.0);
        let away = test_support::squad(2, 100, 10.0);
        MatchSession::start(FutsalEngine::with_seed(29), &home, &away).unwrap()
    }

    #[test]
    fn test_speed_controls_tick_interval() {
        assert_eq!(
            SimulationSpeed::Normal.tick_interval(),
            Duration::from_millis(1500)
        );
        assert_eq!(
            SimulationSpeed::Double.tick_interval(),
            Duration::from_millis(750)
        );
        assert_eq!(
            SimulationSpeed::Quadruple.tick_interval(),
            Duration::from_millis(375)
        );
    }

    #[test]
    fn test_pause_freezes_the_clock() {
        let mut session = session();

        session.apply(UserAction::Pause).unwrap();
        let snapshot = session.advance().unwrap();

        assert_eq!(snapshot.tick, 0);
        assert!(snapshot.paused);

        session.apply(UserAction::Resume).unwrap();
        let snapshot = session.advance().unwrap();
        assert_eq!(snapshot.tick, 1);
    }

    #[test]
    fn test_snapshots_deliver_each_event_once() {
        let mut session = session();

        let mut delivered = 0;
        while !session.is_complete() {
            delivered += session.advance().unwrap().new_events.len();
        }

        assert_eq!(delivered, session.state().events.len());
    }

    #[test]
    fn test_tactics_change_applies_between_ticks() {
        let mut session = session();

        let attacking = TacticalSetup {
            mentality: Mentality::VeryAttacking,
            ..TacticalSetup::default()
        };
        session
            .apply(UserAction::ChangeTactics {
                side: TeamSide::Away,
                tactics: attacking,
            })
            .unwrap();

        assert_eq!(
            session.state().away.tactics.mentality,
            Mentality::VeryAttacking
        );
    }

    #[test]
    fn test_session_runs_to_result() {
        let mut session = session();

        while !session.is_complete() {
            session.advance().unwrap();
        }
        let snapshot = session.advance().unwrap();
        assert_eq!(snapshot.tick, TOTAL_TICKS);

        let result = session.finish().unwrap();
        assert_eq!(result.player_stats.len(), 18);
    }

    #[test]
    fn test_invalid_substitution_is_rejected_cleanly() {
        let mut session = session();

        let err = session.apply(UserAction::Substitute {
            side: TeamSide::Home,
            player_out: 9999,
            player_in: 1,
        });
        assert!(matches!(err, Err(EngineError::PlayerNotEligible { .. })));

        // The session keeps running after a rejected action.
        session.advance().unwrap();
    }
}
