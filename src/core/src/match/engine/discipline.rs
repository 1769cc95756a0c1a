use crate::club::player::traits::{self, MatchAction, PressureSituation};
use crate::r#match::engine::dispatcher::EventDispatcher;
use crate::r#match::engine::events::{GoalContext, MatchEvent, MatchEventType, TeamSide};
use crate::r#match::engine::fatigue::FatigueTracker;
use crate::r#match::engine::selection::TraitSelector;
use crate::r#match::engine::state::{HALF_TIME_TICK, MatchState, RedCardRecord};
use crate::r#match::engine::tuning::EngineTuning;
use log::debug;
use rand::RngExt;
use rand::rngs::StdRng;

/// Futsal discipline rules: the per-half accumulated-foul count with its
/// 10-meter penalty, dangerous-foul card escalation, and the red-card power
/// play (a team plays a man down until the timer runs out or it concedes).
pub struct DisciplineSystem;

impl DisciplineSystem {
    /// A foul was committed by `offending_side` against the team in
    /// possession. Emits the foul, escalates to cards, and awards either a
    /// 10-meter penalty (at or beyond the accumulated threshold) or a free
    /// kick to the fouled team.
    pub fn handle_foul(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        offending_side: TeamSide,
        offender_id: u32,
    ) {
        let tick = state.tick;
        let fouled_side = offending_side.opposite();

        let foul = MatchEvent::new(tick, MatchEventType::Foul, offending_side)
            .with_player(offender_id)
            .with_description(format!("Foul by {:?}", offending_side));
        EventDispatcher::dispatch(state, tuning, foul);

        state.side_mut(offending_side).accumulated_fouls += 1;

        Self::roll_card(state, tuning, rng, offending_side, offender_id);

        if state.side(offending_side).accumulated_fouls
            >= tuning.discipline.accumulated_foul_threshold
        {
            // Sixth foul of the half and every foul after it: direct
            // 10-meter penalty, counter untouched until half-time.
            Self::resolve_ten_meter_penalty(state, tuning, rng, fouled_side);
        } else {
            Self::resolve_free_kick(state, tuning, rng, fouled_side);
        }
    }

    /// Dangerous-foul check followed by the card roll. A small share of
    /// cards comes up straight red.
    fn roll_card(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        offending_side: TeamSide,
        offender_id: u32,
    ) {
        let discipline = &tuning.discipline;

        let mut dangerous_chance = discipline.dangerous_foul_chance;
        if state.is_late_game() {
            dangerous_chance += discipline.dangerous_foul_late_bonus;
        }
        if rng.random::<f32>() >= tuning.probability.clamp(dangerous_chance) {
            return;
        }

        let mut card_chance = discipline.card_chance;
        if state.is_late_game() {
            card_chance += discipline.card_late_bonus;
        }
        if state.score.is_close() {
            card_chance += discipline.card_close_game_bonus;
        }
        if rng.random::<f32>() >= tuning.probability.clamp(card_chance) {
            return;
        }

        if rng.random::<f32>() < discipline.red_card_share {
            Self::issue_red_card(state, tuning, offending_side, offender_id);
        } else {
            let yellow = MatchEvent::new(state.tick, MatchEventType::YellowCard, offending_side)
                .with_player(offender_id);
            EventDispatcher::dispatch(state, tuning, yellow);
        }
    }

    /// Expel the player: the team drops to four on court, the player is
    /// suspended for the rest of the match, and the return timer starts.
    fn issue_red_card(
        state: &mut MatchState,
        tuning: &EngineTuning,
        side: TeamSide,
        player_id: u32,
    ) {
        let tick = state.tick;
        let event =
            MatchEvent::new(tick, MatchEventType::RedCard, side).with_player(player_id);
        EventDispatcher::dispatch(state, tuning, event);

        let can_return_at = tick + tuning.discipline.red_card_return_ticks;
        let team = state.side_mut(side);

        if let Some(player) = team.remove_from_lineup(player_id) {
            team.suspended.push(player);
            team.red_cards.push(RedCardRecord {
                player_id,
                tick_issued: tick,
                can_return_at_tick: can_return_at,
            });
            debug!(
                "red card for player {player_id}, {:?} down to {} until tick {can_return_at}",
                side,
                team.lineup.len()
            );
        }
    }

    /// Timer-based restoration, checked every tick.
    pub fn restore_due(state: &mut MatchState) {
        let tick = state.tick;
        for side in [TeamSide::Home, TeamSide::Away] {
            let due = state
                .side(side)
                .red_cards
                .iter()
                .any(|record| tick >= record.can_return_at_tick);
            if due {
                Self::restore_to_five(state, side);
            }
        }
    }

    /// Goal-triggered restoration: the penalized team returns to five as
    /// soon as its opponent scores, whichever comes first.
    pub fn restore_after_opponent_goal(state: &mut MatchState, scoring_side: TeamSide) {
        let penalized = scoring_side.opposite();
        if state.side(penalized).serving_red_card() {
            Self::restore_to_five(state, penalized);
        }
    }

    /// Bring on an eligible bench player and clear the oldest red-card
    /// record. The expelled player stays suspended. With an empty bench the
    /// team stays at four and the check repeats next tick.
    fn restore_to_five(state: &mut MatchState, side: TeamSide) {
        let replacement = {
            let team = state.side(side);
            let needs_keeper = team.goalkeeper().is_none();

            team.bench
                .iter()
                .filter(|p| !team.is_suspended(p.id))
                .filter(|p| !needs_keeper || p.is_goalkeeper())
                .max_by(|a, b| {
                    state
                        .energy(a.id)
                        .partial_cmp(&state.energy(b.id))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|p| p.id)
        };

        let Some(replacement_id) = replacement else {
            debug!("{side:?} cannot restore to five, no eligible bench player");
            return;
        };

        let team = state.side_mut(side);
        if let Some(player) = team.remove_from_bench(replacement_id) {
            team.lineup.push(player);
            team.red_cards.remove(0);
            debug!("{side:?} restored to five with player {replacement_id}");
        }
    }

    /// Half-time bookkeeping: both accumulated-foul counters reset, nothing
    /// else changes.
    pub fn half_time_reset(state: &mut MatchState) {
        debug_assert_eq!(state.tick, HALF_TIME_TICK);
        state.home.accumulated_fouls = 0;
        state.away.accumulated_fouls = 0;
    }

    /// Direct 10-meter penalty: shooter against goalkeeper, own clamp
    /// bounds, distinct goal context.
    pub fn resolve_ten_meter_penalty(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attacking_side: TeamSide,
    ) {
        let situation = Self::situation(state, attacking_side);
        let taker = {
            let candidates: Vec<_> = state.side(attacking_side).lineup.iter().collect();
            match TraitSelector::pick(rng, &candidates, MatchAction::Penalty) {
                Some(player) => player.clone(),
                None => return,
            }
        };

        let award = MatchEvent::new(state.tick, MatchEventType::Penalty, attacking_side)
            .with_player(taker.id)
            .with_description(String::from("10m penalty awarded"));
        EventDispatcher::dispatch(state, tuning, award);

        let set_pieces = &tuning.set_pieces;
        let taker_score =
            taker.set_piece_score(Self::energy_factor(state, taker.id, tuning));
        let keeper = state.side(attacking_side.opposite()).goalkeeper().cloned();
        let keeper_score = keeper
            .as_ref()
            .map(|k| k.save_score(Self::energy_factor(state, k.id, tuning)))
            .unwrap_or(0.0);

        let mut chance = set_pieces.penalty_base
            + (taker_score - keeper_score) * set_pieces.penalty_skill_swing;
        chance *= traits::success_modifier(&taker.traits, MatchAction::Penalty, situation);
        chance *= traits::team_leader_modifier(
            state.side(attacking_side).has_leader_on_court(),
            situation.losing,
        );
        if let Some(keeper) = &keeper {
            chance /= traits::keeper_set_piece_modifier(&keeper.traits);
        }
        let chance = chance.clamp(set_pieces.penalty_floor, set_pieces.penalty_ceiling);

        if rng.random::<f32>() < chance {
            let goal = MatchEvent::new(state.tick, MatchEventType::Goal, attacking_side)
                .with_player(taker.id)
                .with_goal_context(GoalContext::TenMeterPenalty)
                .with_description(format!("{} converts the 10m penalty", taker.full_name));
            EventDispatcher::dispatch(state, tuning, goal);
        } else if let Some(keeper) = keeper {
            let save = MatchEvent::new(
                state.tick,
                MatchEventType::Save,
                attacking_side.opposite(),
            )
            .with_player(keeper.id)
            .with_description(format!("{} keeps out the 10m penalty", keeper.full_name));
            EventDispatcher::dispatch(state, tuning, save);
            EventDispatcher::credit_shot_on_target(state, taker.id, tuning);
        }
    }

    /// Free kicks convert far less often than penalties; they only
    /// sometimes produce a shot at all.
    pub fn resolve_free_kick(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attacking_side: TeamSide,
    ) {
        state.side_mut(attacking_side).statistics.free_kicks += 1;

        let set_pieces = &tuning.set_pieces;
        if rng.random::<f32>() >= tuning.probability.clamp(set_pieces.free_kick_shot_chance) {
            return;
        }

        Self::resolve_dead_ball_shot(
            state,
            tuning,
            rng,
            attacking_side,
            MatchAction::FreeKick,
            set_pieces.free_kick_on_target,
            GoalContext::FreeKick,
        );
    }

    /// Corner resolution, called after the corner event itself was logged.
    pub fn resolve_corner(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attacking_side: TeamSide,
    ) {
        let set_pieces = &tuning.set_pieces;
        if rng.random::<f32>() >= tuning.probability.clamp(set_pieces.corner_shot_chance) {
            return;
        }

        Self::resolve_dead_ball_shot(
            state,
            tuning,
            rng,
            attacking_side,
            MatchAction::Corner,
            set_pieces.corner_on_target,
            GoalContext::Corner,
        );
    }

    fn resolve_dead_ball_shot(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attacking_side: TeamSide,
        action: MatchAction,
        on_target_base: f32,
        context: GoalContext,
    ) {
        let situation = Self::situation(state, attacking_side);
        let taker = {
            let candidates: Vec<_> = state.side(attacking_side).lineup.iter().collect();
            match TraitSelector::pick(rng, &candidates, action) {
                Some(player) => player.clone(),
                None => return,
            }
        };

        let taker_score = taker.set_piece_score(Self::energy_factor(state, taker.id, tuning));
        let mut on_target = on_target_base * (0.7 + taker_score * 0.6);
        on_target *= traits::success_modifier(&taker.traits, action, situation);
        on_target *= traits::team_leader_modifier(
            state.side(attacking_side).has_leader_on_court(),
            situation.losing,
        );
        let on_target = tuning.probability.clamp(on_target);

        if rng.random::<f32>() >= on_target {
            let miss = MatchEvent::new(state.tick, MatchEventType::Shot, attacking_side)
                .with_player(taker.id)
                .with_description(format!("{} shoots wide from the set piece", taker.full_name));
            EventDispatcher::dispatch(state, tuning, miss);
            return;
        }

        let keeper = state.side(attacking_side.opposite()).goalkeeper().cloned();
        let save_chance = match &keeper {
            Some(k) => {
                let raw = k.save_score(Self::energy_factor(state, k.id, tuning))
                    * traits::success_modifier(&k.traits, MatchAction::Save, situation)
                    * traits::keeper_set_piece_modifier(&k.traits);
                raw.clamp(tuning.shots.save_floor, tuning.shots.save_ceiling)
            }
            None => tuning.shots.save_floor,
        };

        if rng.random::<f32>() < save_chance {
            if let Some(keeper) = keeper {
                let save = MatchEvent::new(
                    state.tick,
                    MatchEventType::Save,
                    attacking_side.opposite(),
                )
                .with_player(keeper.id);
                EventDispatcher::dispatch(state, tuning, save);
                EventDispatcher::credit_shot_on_target(state, taker.id, tuning);
            }
        } else {
            let goal = MatchEvent::new(state.tick, MatchEventType::Goal, attacking_side)
                .with_player(taker.id)
                .with_goal_context(context)
                .with_description(format!("{} scores from the set piece", taker.full_name));
            EventDispatcher::dispatch(state, tuning, goal);
        }
    }

    fn situation(state: &MatchState, side: TeamSide) -> PressureSituation {
        PressureSituation {
            late_game: state.is_late_game(),
            losing: state.score.is_losing(side),
        }
    }

    fn energy_factor(state: &MatchState, player_id: u32, tuning: &EngineTuning) -> f32 {
        FatigueTracker::energy_factor(state.energy(player_id), &tuning.fatigue)
    }
}
