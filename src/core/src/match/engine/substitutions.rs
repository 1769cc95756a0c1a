use crate::r#match::engine::dispatcher::EventDispatcher;
use crate::r#match::error::EngineError;
use crate::r#match::engine::events::{MatchEvent, MatchEventType, TeamSide};
use crate::r#match::engine::state::MatchState;
use crate::r#match::engine::tuning::EngineTuning;
use log::debug;

/// Futsal substitutions are flying and unlimited; the engine rotates tired
/// players automatically inside the configured minute window and accepts
/// validated manual swaps at any point.
pub struct SubstitutionSystem;

impl SubstitutionSystem {
    /// Automatic rotation pass for both teams, run once per tick. The most
    /// tired players below the energy threshold come off first, capped per
    /// tick.
    pub fn auto_tick(state: &mut MatchState, tuning: &EngineTuning) {
        let minute = state.minute();
        let rules = &tuning.substitutions;
        if minute < rules.earliest_minute || minute > rules.latest_minute {
            return;
        }

        for side in [TeamSide::Home, TeamSide::Away] {
            let mut swaps = Self::plan_swaps(state, side, tuning);
            swaps.truncate(rules.max_per_tick);

            for (out_id, in_id) in swaps {
                Self::execute(state, tuning, side, out_id, in_id);
            }
        }
    }

    /// Tired starters paired with their best available like-for-like
    /// replacement, most tired first. Each bench player is used at most once
    /// per plan.
    fn plan_swaps(state: &MatchState, side: TeamSide, tuning: &EngineTuning) -> Vec<(u32, u32)> {
        let team = state.side(side);
        let threshold = tuning.substitutions.energy_threshold;

        let mut tired: Vec<&crate::r#match::engine::player::MatchPlayer> = team
            .lineup
            .iter()
            .filter(|p| state.energy(p.id) < threshold)
            .collect();
        tired.sort_by(|a, b| {
            state
                .energy(a.id)
                .partial_cmp(&state.energy(b.id))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut used: Vec<u32> = Vec::new();
        let mut swaps = Vec::new();

        for outgoing in tired {
            let replacement = team
                .bench
                .iter()
                .filter(|p| !used.contains(&p.id))
                .filter(|p| !team.is_suspended(p.id))
                .filter(|p| p.position.covers(outgoing.position))
                .filter(|p| state.energy(p.id) > state.energy(outgoing.id))
                .max_by(|a, b| {
                    state
                        .energy(a.id)
                        .partial_cmp(&state.energy(b.id))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            if let Some(incoming) = replacement {
                used.push(incoming.id);
                swaps.push((outgoing.id, incoming.id));
            }
        }

        swaps
    }

    /// User-requested swap. Validated against the current rosters so a stale
    /// instruction cannot corrupt the lineup.
    pub fn manual(
        state: &mut MatchState,
        tuning: &EngineTuning,
        side: TeamSide,
        out_id: u32,
        in_id: u32,
    ) -> Result<(), EngineError> {
        let team = state.side(side);

        if !team.on_court(out_id) {
            return Err(EngineError::PlayerNotEligible { player_id: out_id });
        }
        if !team.on_bench(in_id) || team.is_suspended(in_id) {
            return Err(EngineError::PlayerNotEligible { player_id: in_id });
        }

        let out_is_keeper = team
            .lineup
            .iter()
            .any(|p| p.id == out_id && p.is_goalkeeper());
        let in_is_keeper = team.bench.iter().any(|p| p.id == in_id && p.is_goalkeeper());
        if out_is_keeper && !in_is_keeper {
            return Err(EngineError::MissingGoalkeeper { side });
        }

        Self::execute(state, tuning, side, out_id, in_id);
        Ok(())
    }

    fn execute(state: &mut MatchState, tuning: &EngineTuning, side: TeamSide, out_id: u32, in_id: u32) {
        let tick = state.tick;
        let team = state.side_mut(side);

        let (Some(outgoing), Some(incoming)) = (
            team.remove_from_lineup(out_id),
            team.remove_from_bench(in_id),
        ) else {
            return;
        };

        debug!(
            "substitution for {:?}: {} off, {} on",
            side, outgoing.full_name, incoming.full_name
        );

        let description = format!("{} replaces {}", incoming.full_name, outgoing.full_name);
        team.lineup.push(incoming);
        team.bench.push(outgoing);

        let event = MatchEvent::new(tick, MatchEventType::Substitution, side)
            .with_player(in_id)
            .with_description(description);
        EventDispatcher::dispatch(state, tuning, event);
    }
}
