use crate::club::player::traits::{self, MatchAction, PressureSituation};
use crate::r#match::engine::discipline::DisciplineSystem;
use crate::r#match::engine::dispatcher::EventDispatcher;
use crate::r#match::engine::events::{GoalContext, MatchEvent, MatchEventType, TeamSide};
use crate::r#match::engine::fatigue::FatigueTracker;
use crate::r#match::engine::momentum::MomentumTracker;
use crate::r#match::engine::player::MatchPlayer;
use crate::r#match::engine::selection::TraitSelector;
use crate::r#match::engine::state::{CounterAttackWindow, MatchState};
use crate::r#match::engine::tactics::TacticalModifiers;
use crate::r#match::engine::tuning::{EngineTuning, timing_multiplier};
use rand::RngExt;
use rand::rngs::StdRng;

/// Per-tick event generation. Base chances are composed multiplicatively
/// with tactical, momentum, timing and trait modifiers, then clamped exactly
/// once before each Bernoulli draw.
pub struct EventGenerator;

impl EventGenerator {
    pub fn generate_tick(state: &mut MatchState, tuning: &EngineTuning, rng: &mut StdRng) {
        let attacking = state.possession;
        let defending = attacking.opposite();

        let timing = timing_multiplier(tuning.events.timing_windows, state.minute());
        let attack_mods = Self::effective_modifiers(state, attacking, tuning);
        let defence_mods = Self::effective_modifiers(state, defending, tuning);

        // A live counter-attack window replaces the normal shot roll with a
        // high-probability burst chance.
        let counter_live =
            matches!(state.counter_attack, Some(window) if window.side == attacking);

        if counter_live {
            if rng.random::<f32>()
                < tuning.probability.clamp(tuning.events.counter_shot_probability)
            {
                state.counter_attack = None;
                Self::resolve_shot(state, tuning, rng, attacking, true);
            } else {
                Self::age_counter_window(state);
            }
        } else {
            let shot_chance =
                tuning.events.shot_base * attack_mods.shot_frequency * timing;
            if rng.random::<f32>() < tuning.probability.clamp(shot_chance) {
                Self::resolve_shot(state, tuning, rng, attacking, false);
            }
        }

        Self::roll_dribble(state, tuning, rng, attacking, &attack_mods, timing);
        Self::roll_corner(state, tuning, rng, attacking, &attack_mods, timing);

        let possession_won =
            Self::roll_tackle(state, tuning, rng, defending, &defence_mods, timing);
        Self::roll_foul(state, tuning, rng, defending, &defence_mods, timing);

        if !possession_won {
            Self::roll_possession_change(state, tuning, rng, &attack_mods, &defence_mods);
        }
    }

    /// Tactical multipliers with the fly-goalkeeper overlay applied.
    fn effective_modifiers(
        state: &MatchState,
        side: TeamSide,
        tuning: &EngineTuning,
    ) -> TacticalModifiers {
        let team = state.side(side);
        let mut modifiers = team.tactics.modifiers();

        if team.fly_keeper_active {
            modifiers.possession_weight *= tuning.fly_keeper.possession_weight_bonus;
            modifiers.shot_frequency *= tuning.fly_keeper.shot_frequency_bonus;
            modifiers.defensive_resistance *= tuning.fly_keeper.defensive_resistance_penalty;
        }

        modifiers
    }

    fn age_counter_window(state: &mut MatchState) {
        if let Some(window) = &mut state.counter_attack {
            window.ticks_left = window.ticks_left.saturating_sub(1);
            if window.ticks_left == 0 {
                state.counter_attack = None;
            }
        }
    }

    fn resolve_shot(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attacking: TeamSide,
        is_counter: bool,
    ) {
        let defending = attacking.opposite();
        let situation = Self::situation(state, attacking);

        let shooter = {
            let pool = Self::attacking_pool(state.side(attacking));
            match TraitSelector::pick(rng, &pool, MatchAction::Shot) {
                Some(player) => player.clone(),
                None => return,
            }
        };

        let shots = &tuning.shots;
        let mut quality =
            shooter.shot_quality(Self::energy_factor(state, shooter.id, tuning));
        quality += MomentumTracker::shot_quality_term(state, attacking, shots.momentum_quality_swing);
        if is_counter {
            quality += shots.counter_quality_bonus;
        }

        let resistance = Self::defensive_resistance(state, defending, tuning);
        quality -= resistance * shots.resistance_quality_reduction;
        let quality = quality.clamp(0.0, 1.0);

        // The defence can smother the attempt before it becomes a shot.
        // Counters catch the block out of position.
        let mut prevent_chance = resistance * shots.resistance_prevent_chance;
        if is_counter {
            prevent_chance /= shots.counter_prevent_divisor;
        }
        if rng.random::<f32>() < tuning.probability.clamp(prevent_chance) {
            let blocker = {
                let pool: Vec<&MatchPlayer> = state.side(defending).outfield().collect();
                TraitSelector::pick(rng, &pool, MatchAction::Tackle).map(|p| p.id)
            };
            let mut block = MatchEvent::new(state.tick, MatchEventType::Block, defending);
            if let Some(id) = blocker {
                block = block.with_player(id);
            }
            EventDispatcher::dispatch(state, tuning, block);
            return;
        }

        let mut on_target =
            shots.on_target_base + (quality - 0.5) * shots.on_target_quality_swing;
        on_target *= traits::success_modifier(&shooter.traits, MatchAction::Shot, situation);
        on_target *= traits::team_leader_modifier(
            state.side(attacking).has_leader_on_court(),
            situation.losing,
        );
        let on_target = tuning.probability.clamp(on_target);

        if rng.random::<f32>() >= on_target {
            let mut miss = MatchEvent::new(state.tick, MatchEventType::Shot, attacking)
                .with_player(shooter.id)
                .with_description(format!("{} fires off target", shooter.full_name));
            if is_counter {
                miss = miss.on_counter();
            }
            EventDispatcher::dispatch(state, tuning, miss);
            return;
        }

        let defending_fly_active = state.side(defending).fly_keeper_active;
        let keeper = state.side(defending).goalkeeper().cloned();
        let mut save_chance = match &keeper {
            Some(k) => {
                let base = k.save_score(Self::energy_factor(state, k.id, tuning))
                    - (quality - 0.5) * 0.3;
                base * traits::success_modifier(&k.traits, MatchAction::Save, situation)
            }
            // Keeper advanced or expelled: only a scramble keeps it out.
            None => shots.save_floor,
        };
        if is_counter && defending_fly_active {
            save_chance /= tuning.fly_keeper.counter_goal_vulnerability;
        }
        let save_chance = save_chance.clamp(shots.save_floor, shots.save_ceiling);

        if rng.random::<f32>() < save_chance {
            if let Some(keeper) = keeper {
                let save = MatchEvent::new(state.tick, MatchEventType::Save, defending)
                    .with_player(keeper.id)
                    .with_description(format!("{} denies {}", keeper.full_name, shooter.full_name));
                EventDispatcher::dispatch(state, tuning, save);
                EventDispatcher::credit_shot_on_target(state, shooter.id, tuning);
            }
            return;
        }

        let context = if is_counter && defending_fly_active {
            GoalContext::CounterAgainstFlyGoalkeeper
        } else if is_counter {
            GoalContext::CounterAttack
        } else {
            GoalContext::OpenPlay
        };

        let assist = if rng.random::<f32>() < shots.assist_chance {
            let pool: Vec<&MatchPlayer> = state
                .side(attacking)
                .lineup
                .iter()
                .filter(|p| p.id != shooter.id)
                .collect();
            TraitSelector::pick(rng, &pool, MatchAction::Assist).map(|p| p.id)
        } else {
            None
        };

        let mut goal = MatchEvent::new(state.tick, MatchEventType::Goal, attacking)
            .with_player(shooter.id)
            .with_goal_context(context)
            .with_description(format!("{} scores", shooter.full_name));
        if is_counter {
            goal = goal.on_counter();
        }
        if let Some(assist_id) = assist {
            goal = goal.with_assist(assist_id);
        }
        EventDispatcher::dispatch(state, tuning, goal);

        // Conceding team restarts from the kickoff.
        state.possession = defending;
        state.counter_attack = None;
    }

    /// Average outfield defensive score scaled by the tactical resistance
    /// multiplier, in 0..~1.3.
    fn defensive_resistance(state: &MatchState, defending: TeamSide, tuning: &EngineTuning) -> f32 {
        let team = state.side(defending);
        let scores: Vec<f32> = team
            .outfield()
            .map(|p| p.defensive_score(FatigueTracker::energy_factor(
                state.energy(p.id),
                &tuning.fatigue,
            )))
            .collect();

        if scores.is_empty() {
            return 0.0;
        }

        let average = scores.iter().sum::<f32>() / scores.len() as f32;
        average * Self::effective_modifiers(state, defending, tuning).defensive_resistance
    }

    fn roll_dribble(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attacking: TeamSide,
        attack_mods: &TacticalModifiers,
        timing: f32,
    ) {
        let chance = tuning.events.dribble_base * attack_mods.dribble_rate * timing;
        if rng.random::<f32>() >= tuning.probability.clamp(chance) {
            return;
        }

        let situation = Self::situation(state, attacking);
        let dribbler = {
            let pool: Vec<&MatchPlayer> = state.side(attacking).outfield().collect();
            match TraitSelector::pick(rng, &pool, MatchAction::Dribble) {
                Some(player) => player.clone(),
                None => return,
            }
        };
        let defender_score = Self::defensive_resistance(state, attacking.opposite(), tuning);

        let mut success = 0.35
            + dribbler.dribble_score(Self::energy_factor(state, dribbler.id, tuning)) * 0.4
            - defender_score * 0.2;
        success *= traits::success_modifier(&dribbler.traits, MatchAction::Dribble, situation);
        let success = tuning.probability.clamp(success);

        let event_type = if rng.random::<f32>() < success {
            MatchEventType::DribbleSuccess
        } else {
            MatchEventType::DribbleFail
        };
        let event =
            MatchEvent::new(state.tick, event_type, attacking).with_player(dribbler.id);
        EventDispatcher::dispatch(state, tuning, event);
    }

    fn roll_corner(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attacking: TeamSide,
        attack_mods: &TacticalModifiers,
        timing: f32,
    ) {
        let chance = tuning.events.corner_base * attack_mods.corner_rate * timing;
        if rng.random::<f32>() >= tuning.probability.clamp(chance) {
            return;
        }

        let taker = {
            let pool: Vec<&MatchPlayer> = state.side(attacking).outfield().collect();
            TraitSelector::pick(rng, &pool, MatchAction::Corner).map(|p| p.id)
        };
        let mut corner = MatchEvent::new(state.tick, MatchEventType::Corner, attacking);
        if let Some(id) = taker {
            corner = corner.with_player(id);
        }
        EventDispatcher::dispatch(state, tuning, corner);

        DisciplineSystem::resolve_corner(state, tuning, rng, attacking);
    }

    /// Defensive tackle or interception. Winning the ball flips possession
    /// and sometimes opens a counter-attack window.
    fn roll_tackle(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        defending: TeamSide,
        defence_mods: &TacticalModifiers,
        timing: f32,
    ) -> bool {
        let chance = tuning.events.tackle_base * defence_mods.tackle_rate * timing;
        if rng.random::<f32>() >= tuning.probability.clamp(chance) {
            return false;
        }

        let interception = rng.random::<f32>() < 0.4;
        let action = if interception {
            MatchAction::Interception
        } else {
            MatchAction::Tackle
        };
        let winner = {
            let pool: Vec<&MatchPlayer> = state.side(defending).outfield().collect();
            match TraitSelector::pick(rng, &pool, action) {
                Some(player) => player.id,
                None => return false,
            }
        };

        let event_type = if interception {
            MatchEventType::Interception
        } else {
            MatchEventType::Tackle
        };
        let event = MatchEvent::new(state.tick, event_type, defending).with_player(winner);
        EventDispatcher::dispatch(state, tuning, event);

        state.possession = defending;
        state.counter_attack = None;

        if rng.random::<f32>() < tuning.events.counter_attack_chance {
            state.counter_attack = Some(CounterAttackWindow {
                side: defending,
                ticks_left: tuning.events.counter_window_ticks,
            });
        }

        true
    }

    fn roll_foul(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        defending: TeamSide,
        defence_mods: &TacticalModifiers,
        timing: f32,
    ) {
        let chance = tuning.events.foul_base * defence_mods.foul_rate * timing;
        if rng.random::<f32>() >= tuning.probability.clamp(chance) {
            return;
        }

        let offender = {
            let pool: Vec<&MatchPlayer> = state.side(defending).outfield().collect();
            match TraitSelector::pick(rng, &pool, MatchAction::Tackle) {
                Some(player) => player.id,
                None => return,
            }
        };

        DisciplineSystem::handle_foul(state, tuning, rng, defending, offender);
    }

    /// End-of-tick possession roll with its own wider clamp bounds.
    fn roll_possession_change(
        state: &mut MatchState,
        tuning: &EngineTuning,
        rng: &mut StdRng,
        attack_mods: &TacticalModifiers,
        defence_mods: &TacticalModifiers,
    ) {
        let events = &tuning.events;
        let possessor = state.possession;

        let mut chance = events.possession_change_base
            * (defence_mods.possession_weight / attack_mods.possession_weight);
        chance += MomentumTracker::possession_change_adjustment(state, possessor);
        let chance = chance.clamp(events.possession_change_floor, events.possession_change_ceiling);

        if rng.random::<f32>() < chance {
            state.possession = possessor.opposite();
            // The window belongs to the possessing side; losing the ball
            // kills it.
            if matches!(state.counter_attack, Some(window) if window.side == possessor) {
                state.counter_attack = None;
            }
        }
    }

    /// Shot candidates: outfield players, plus the keeper while the team
    /// plays with the fly goalkeeper up.
    fn attacking_pool(team: &crate::r#match::engine::state::TeamMatchState) -> Vec<&MatchPlayer> {
        if team.fly_keeper_active {
            team.lineup.iter().collect()
        } else {
            team.outfield().collect()
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
