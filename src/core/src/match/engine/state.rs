use crate::club::player::PlayerTrait;
use crate::r#match::engine::events::{MatchEvent, TeamSide, minute_of};
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::rating::RatingAccumulator;
use crate::r#match::engine::tactics::TacticalSetup;
use crate::r#match::statistics::TeamStatistics;
use std::collections::HashMap;

/// 160 ticks of 15 simulated seconds: two 20-minute halves.
pub const TOTAL_TICKS: u16 = 160;
pub const HALF_TIME_TICK: u16 = 80;

#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn for_side(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    /// Positive when home leads.
    pub fn difference(&self) -> i16 {
        self.home as i16 - self.away as i16
    }

    pub fn is_losing(&self, side: TeamSide) -> bool {
        self.for_side(side) < self.for_side(side.opposite())
    }

    pub fn is_drawn(&self) -> bool {
        self.home == self.away
    }

    pub fn is_close(&self) -> bool {
        self.difference().abs() <= 1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RedCardRecord {
    pub player_id: u32,
    pub tick_issued: u16,
    pub can_return_at_tick: u16,
}

/// Short shot-heavy window owned by the team that just won the ball.
#[derive(Debug, Clone, Copy)]
pub struct CounterAttackWindow {
    pub side: TeamSide,
    pub ticks_left: u8,
}

/// Everything the engine tracks for one team during a match.
#[derive(Debug, Clone)]
pub struct TeamMatchState {
    pub team_id: u32,
    pub team_name: String,
    pub tactics: TacticalSetup,
    /// On-court players. Exactly five, except while a red card is being
    /// served, when it drops to four.
    pub lineup: Vec<MatchPlayer>,
    pub bench: Vec<MatchPlayer>,
    /// Per-half foul counter. Reset at half-time, never earlier.
    pub accumulated_fouls: u8,
    pub red_cards: Vec<RedCardRecord>,
    /// Players expelled for the rest of the match. Kept whole so the final
    /// record still reports them.
    pub suspended: Vec<MatchPlayer>,
    pub fly_keeper_active: bool,
    pub fly_keeper_player: Option<u32>,
    pub statistics: TeamStatistics,
}

impl TeamMatchState {
    pub fn on_court(&self, player_id: u32) -> bool {
        self.lineup.iter().any(|p| p.id == player_id)
    }

    pub fn on_bench(&self, player_id: u32) -> bool {
        self.bench.iter().any(|p| p.id == player_id)
    }

    pub fn is_suspended(&self, player_id: u32) -> bool {
        self.suspended.iter().any(|p| p.id == player_id)
    }

    pub fn goalkeeper(&self) -> Option<&MatchPlayer> {
        self.lineup.iter().find(|p| p.is_goalkeeper())
    }

    pub fn outfield(&self) -> impl Iterator<Item = &MatchPlayer> {
        self.lineup.iter().filter(|p| !p.is_goalkeeper())
    }

    pub fn has_leader_on_court(&self) -> bool {
        self.lineup
            .iter()
            .any(|p| p.has_trait(PlayerTrait::Leader))
    }

    pub fn remove_from_lineup(&mut self, player_id: u32) -> Option<MatchPlayer> {
        let index = self.lineup.iter().position(|p| p.id == player_id)?;
        Some(self.lineup.remove(index))
    }

    pub fn remove_from_bench(&mut self, player_id: u32) -> Option<MatchPlayer> {
        let index = self.bench.iter().position(|p| p.id == player_id)?;
        Some(self.bench.remove(index))
    }

    pub fn serving_red_card(&self) -> bool {
        !self.red_cards.is_empty()
    }
}

/// The single mutable aggregate for one match, owned exclusively by its
/// orchestrator between initialization and finalization.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub tick: u16,
    pub score: Score,
    pub possession: TeamSide,
    pub momentum: f32,
    pub home: TeamMatchState,
    pub away: TeamMatchState,
    /// Energy per player in 0..100, bench included.
    pub fatigue: HashMap<u32, f32>,
    pub counter_attack: Option<CounterAttackWindow>,
    pub events: Vec<MatchEvent>,
    pub ratings: HashMap<u32, RatingAccumulator>,
    pub finalized: bool,
}

impl MatchState {
    pub fn side(&self, side: TeamSide) -> &TeamMatchState {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: TeamSide) -> &mut TeamMatchState {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn minute(&self) -> u8 {
        minute_of(self.tick)
    }

    pub fn is_complete(&self) -> bool {
        self.tick >= TOTAL_TICKS
    }

    pub fn is_late_game(&self) -> bool {
        self.minute() >= 35
    }

    pub fn energy(&self, player_id: u32) -> f32 {
        self.fatigue.get(&player_id).copied().unwrap_or(100.0)
    }

    pub fn set_energy(&mut self, player_id: u32, energy: f32) {
        self.fatigue.insert(player_id, energy.clamp(0.0, 100.0));
    }

    /// Average on-court energy, used for the momentum fatigue differential.
    pub fn average_lineup_energy(&self, side: TeamSide) -> f32 {
        let team = self.side(side);
        if team.lineup.is_empty() {
            return 0.0;
        }

        let total: f32 = team.lineup.iter().map(|p| self.energy(p.id)).sum();
        total / team.lineup.len() as f32
    }

    /// Momentum from the perspective of one side, in -1.0..1.0. Positive
    /// means the side is on top.
    pub fn momentum_lean(&self, side: TeamSide) -> f32 {
        let lean = (self.momentum - 50.0) / 50.0;
        match side {
            TeamSide::Home => lean,
            TeamSide::Away => -lean,
        }
    }

    pub fn which_side(&self, player_id: u32) -> Option<TeamSide> {
        if self.home.on_court(player_id) || self.home.on_bench(player_id) {
            Some(TeamSide::Home)
        } else if self.away.on_court(player_id) || self.away.on_bench(player_id) {
            Some(TeamSide::Away)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_perspective() {
        let score = Score { home: 2, away: 1 };

        assert_eq!(score.difference(), 1);
        assert!(score.is_losing(TeamSide::Away));
        assert!(!score.is_losing(TeamSide::Home));
        assert!(score.is_close());
    }

    #[test]
    fn test_momentum_lean_is_symmetric() {
        let home_squad = test_support::squad(1, 1, 10.0);
        let away_squad = test_support::squad(2, 100, 10.0);
        let engine = crate::r#match::engine::FutsalEngine::with_seed(7);
        let mut state = engine.initialize(&home_squad, &away_squad).unwrap();

        state.momentum = 75.0;
        assert_eq!(state.momentum_lean(TeamSide::Home), 0.5);
        assert_eq!(state.momentum_lean(TeamSide::Away), -0.5);
    }
}
