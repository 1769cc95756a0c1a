use crate::club::player::{MatchAction, PlayerTrait};
use crate::r#match::engine::events::TeamSide;
use crate::r#match::engine::selection::TraitSelector;
use crate::r#match::engine::state::MatchState;
use crate::r#match::engine::tactics::FlyGoalkeeperMode;
use crate::r#match::engine::tuning::FlyKeeperTuning;
use log::debug;
use rand::RngExt;
use rand::rngs::StdRng;

/// Fly-goalkeeper state machine: a team-level gamble that turns the keeper
/// (or a nominated outfielder) into an auxiliary attacker at the cost of an
/// open goal on the counter.
pub struct FlyKeeperSystem;

impl FlyKeeperSystem {
    /// Re-evaluate activation for both teams. Runs once per tick, before
    /// event generation, so the whole tick sees a consistent flag.
    pub fn evaluate_tick(state: &mut MatchState, tuning: &FlyKeeperTuning, rng: &mut StdRng) {
        for side in [TeamSide::Home, TeamSide::Away] {
            let mode = state.side(side).tactics.fly_goalkeeper;
            let was_active = state.side(side).fly_keeper_active;

            let active = match mode {
                FlyGoalkeeperMode::Never => false,
                FlyGoalkeeperMode::Always => true,
                FlyGoalkeeperMode::EndGame => {
                    state.score.is_losing(side) && state.minute() >= tuning.end_game_minute
                }
                FlyGoalkeeperMode::Sometimes => {
                    if !Self::qualifies(state, side, tuning) {
                        false
                    } else if was_active {
                        true
                    } else {
                        rng.random::<f32>() < tuning.sometimes_activation_chance
                    }
                }
            };

            let team = state.side_mut(side);
            team.fly_keeper_active = active;

            if active {
                // Re-nominate if the recorded player was substituted or
                // sent off since the last tick.
                let nominee_on_court = team
                    .fly_keeper_player
                    .map(|id| team.on_court(id))
                    .unwrap_or(false);
                if !nominee_on_court {
                    team.fly_keeper_player = Self::nominate(team.lineup.iter().collect(), rng);
                }
            } else {
                team.fly_keeper_player = None;
            }

            if active != was_active {
                debug!(
                    "fly goalkeeper {} for {:?} at minute {}",
                    if active { "on" } else { "off" },
                    side,
                    state.minute()
                );
            }
        }
    }

    /// Situations worth the gamble for `Sometimes`: losing, drawing late,
    /// or punishing an opponent who presses high.
    fn qualifies(state: &MatchState, side: TeamSide, tuning: &FlyKeeperTuning) -> bool {
        if state.score.is_losing(side) {
            return true;
        }
        if state.score.is_drawn() && state.minute() > tuning.drawing_qualifies_after_minute {
            return true;
        }
        state.side(side.opposite()).tactics.is_high_pressing()
    }

    /// Pick the advancing player: a nominated outfielder carrying the trait
    /// beats the goalkeeper in the weighted draw, otherwise the keeper goes.
    fn nominate(
        lineup: Vec<&crate::r#match::engine::player::MatchPlayer>,
        rng: &mut StdRng,
    ) -> Option<u32> {
        let nominated: Vec<_> = lineup
            .iter()
            .copied()
            .filter(|p| p.has_trait(PlayerTrait::FlyGoalkeeper))
            .collect();

        if nominated.is_empty() {
            return lineup.iter().find(|p| p.is_goalkeeper()).map(|p| p.id);
        }

        TraitSelector::pick(rng, &nominated, MatchAction::FlyAdvance).map(|p| p.id)
    }
}
