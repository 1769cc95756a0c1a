/// Immutable tuning table for one engine instance. Constructor-injected so
/// concurrently running matches can use different tuning and tests can pin
/// deterministic constants. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct EngineTuning {
    pub probability: ProbabilityTuning,
    pub events: EventTuning,
    pub shots: ShotTuning,
    pub momentum: MomentumTuning,
    pub fatigue: FatigueTuning,
    pub discipline: DisciplineTuning,
    pub set_pieces: SetPieceTuning,
    pub substitutions: SubstitutionTuning,
    pub fly_keeper: FlyKeeperTuning,
    pub rating: RatingTuning,
}

impl Default for EngineTuning {
    fn default() -> Self {
        EngineTuning {
            probability: ProbabilityTuning::default(),
            events: EventTuning::default(),
            shots: ShotTuning::default(),
            momentum: MomentumTuning::default(),
            fatigue: FatigueTuning::default(),
            discipline: DisciplineTuning::default(),
            set_pieces: SetPieceTuning::default(),
            substitutions: SubstitutionTuning::default(),
            fly_keeper: FlyKeeperTuning::default(),
            rating: RatingTuning::default(),
        }
    }
}

/// Global Bernoulli bounds. Applied exactly once, after all modifiers.
#[derive(Debug, Clone)]
pub struct ProbabilityTuning {
    pub floor: f32,
    pub ceiling: f32,
}

impl Default for ProbabilityTuning {
    fn default() -> Self {
        ProbabilityTuning {
            floor: 0.05,
            ceiling: 0.95,
        }
    }
}

impl ProbabilityTuning {
    /// Final clamp before a Bernoulli draw. Never allows deterministic
    /// outcomes in either direction.
    pub fn clamp(&self, probability: f32) -> f32 {
        probability.clamp(self.floor, self.ceiling)
    }
}

/// Per-tick base chances for the possessing team, before tactical, momentum
/// and timing multipliers.
#[derive(Debug, Clone)]
pub struct EventTuning {
    pub shot_base: f32,
    pub dribble_base: f32,
    pub tackle_base: f32,
    pub foul_base: f32,
    pub corner_base: f32,

    pub possession_change_base: f32,
    pub possession_change_floor: f32,
    pub possession_change_ceiling: f32,

    /// Timing multipliers over the match minute; later rows override earlier
    /// ones, last match wins.
    pub timing_windows: &'static [(u8, u8, f32)],

    pub counter_attack_chance: f32,
    pub counter_window_ticks: u8,
    pub counter_shot_probability: f32,
}

impl Default for EventTuning {
    fn default() -> Self {
        EventTuning {
            shot_base: 0.16,
            dribble_base: 0.12,
            tackle_base: 0.14,
            foul_base: 0.07,
            corner_base: 0.06,
            possession_change_base: 0.40,
            possession_change_floor: 0.10,
            possession_change_ceiling: 0.95,
            timing_windows: DEFAULT_TIMING_WINDOWS,
            counter_attack_chance: 0.15,
            counter_window_ticks: 2,
            counter_shot_probability: 0.70,
        }
    }
}

/// (minute_from, minute_to inclusive, multiplier), scanned top to bottom.
pub const DEFAULT_TIMING_WINDOWS: &[(u8, u8, f32)] = &[
    (0, 10, 0.8),
    (11, 30, 1.0),
    (30, 40, 1.2),
    (38, 38, 1.3),
    (39, 40, 1.5),
];

#[derive(Debug, Clone)]
pub struct ShotTuning {
    pub counter_quality_bonus: f32,
    pub momentum_quality_swing: f32,
    pub resistance_quality_reduction: f32,
    pub resistance_prevent_chance: f32,
    /// Counters are this many times harder to prevent outright.
    pub counter_prevent_divisor: f32,
    pub on_target_base: f32,
    pub on_target_quality_swing: f32,
    pub save_floor: f32,
    pub save_ceiling: f32,
    pub assist_chance: f32,
}

impl Default for ShotTuning {
    fn default() -> Self {
        ShotTuning {
            counter_quality_bonus: 0.15,
            momentum_quality_swing: 0.30,
            resistance_quality_reduction: 0.25,
            resistance_prevent_chance: 0.15,
            counter_prevent_divisor: 3.0,
            on_target_base: 0.4,
            on_target_quality_swing: 0.5,
            save_floor: 0.20,
            save_ceiling: 0.80,
            assist_chance: 0.80,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MomentumTuning {
    pub equilibrium: f32,
    pub decay_per_minute: f32,
    pub goal_delta: f32,
    pub shot_delta: f32,
    pub save_delta: f32,
    pub tackle_delta: f32,
    pub dribble_delta: f32,
    pub yellow_delta: f32,
    pub red_delta: f32,
    pub score_difference_delta: f32,
    pub home_advantage: f32,
    pub fatigue_differential_scale: f32,
}

impl Default for MomentumTuning {
    fn default() -> Self {
        MomentumTuning {
            equilibrium: 50.0,
            decay_per_minute: 0.5,
            goal_delta: 25.0,
            shot_delta: 3.0,
            save_delta: 3.0,
            tackle_delta: 5.0,
            dribble_delta: 2.0,
            yellow_delta: -5.0,
            red_delta: -20.0,
            score_difference_delta: 3.0,
            home_advantage: 2.0,
            fatigue_differential_scale: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FatigueTuning {
    /// 100 energy over 160 ticks.
    pub depletion_per_tick: f32,
    pub intensity_floor: f32,
    pub intensity_ceiling: f32,
    pub away_penalty: f32,
    pub bench_recovery_factor: f32,
    /// Effectiveness at zero energy; full energy is 1.0.
    pub exhausted_effectiveness: f32,
}

impl Default for FatigueTuning {
    fn default() -> Self {
        FatigueTuning {
            depletion_per_tick: 0.625,
            intensity_floor: 0.7,
            intensity_ceiling: 1.3,
            away_penalty: 1.05,
            bench_recovery_factor: 2.0,
            exhausted_effectiveness: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisciplineTuning {
    pub accumulated_foul_threshold: u8,
    pub dangerous_foul_chance: f32,
    pub dangerous_foul_late_bonus: f32,
    pub card_chance: f32,
    pub card_late_bonus: f32,
    pub card_close_game_bonus: f32,
    pub red_card_share: f32,
    pub red_card_return_ticks: u16,
}

impl Default for DisciplineTuning {
    fn default() -> Self {
        DisciplineTuning {
            accumulated_foul_threshold: 6,
            dangerous_foul_chance: 0.30,
            dangerous_foul_late_bonus: 0.10,
            card_chance: 0.15,
            card_late_bonus: 0.10,
            card_close_game_bonus: 0.15,
            red_card_share: 0.05,
            red_card_return_ticks: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SetPieceTuning {
    pub penalty_base: f32,
    pub penalty_floor: f32,
    pub penalty_ceiling: f32,
    pub penalty_skill_swing: f32,

    pub free_kick_shot_chance: f32,
    pub free_kick_on_target: f32,

    pub corner_shot_chance: f32,
    pub corner_on_target: f32,
}

impl Default for SetPieceTuning {
    fn default() -> Self {
        SetPieceTuning {
            penalty_base: 0.50,
            penalty_floor: 0.20,
            penalty_ceiling: 0.95,
            penalty_skill_swing: 0.30,
            free_kick_shot_chance: 0.55,
            free_kick_on_target: 0.45,
            corner_shot_chance: 0.50,
            corner_on_target: 0.40,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubstitutionTuning {
    pub energy_threshold: f32,
    pub earliest_minute: u8,
    pub latest_minute: u8,
    pub max_per_tick: usize,
}

impl Default for SubstitutionTuning {
    fn default() -> Self {
        SubstitutionTuning {
            energy_threshold: 50.0,
            earliest_minute: 2,
            latest_minute: 38,
            max_per_tick: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlyKeeperTuning {
    pub possession_weight_bonus: f32,
    pub shot_frequency_bonus: f32,
    pub defensive_resistance_penalty: f32,
    pub counter_goal_vulnerability: f32,
    pub sometimes_activation_chance: f32,
    pub end_game_minute: u8,
    pub drawing_qualifies_after_minute: u8,
}

impl Default for FlyKeeperTuning {
    fn default() -> Self {
        FlyKeeperTuning {
            possession_weight_bonus: 1.50,
            shot_frequency_bonus: 1.20,
            defensive_resistance_penalty: 0.90,
            counter_goal_vulnerability: 1.40,
            sometimes_activation_chance: 0.15,
            end_game_minute: 35,
            drawing_qualifies_after_minute: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RatingTuning {
    pub outfield_baseline: f32,
    pub goalkeeper_baseline: f32,
    pub floor: f32,
    pub ceiling: f32,
    pub energy_point_weight: f32,

    pub goal: f32,
    pub assist: f32,
    pub shot_on_target: f32,
    pub shot_missed: f32,
    pub save: f32,
    pub goal_conceded: f32,
    pub tackle: f32,
    pub interception: f32,
    pub dribble: f32,
    pub foul: f32,
    pub yellow_card: f32,
    pub red_card: f32,
}

impl Default for RatingTuning {
    fn default() -> Self {
        RatingTuning {
            outfield_baseline: 6.5,
            goalkeeper_baseline: 6.6,
            floor: 6.0,
            ceiling: 10.0,
            energy_point_weight: 0.005,
            goal: 1.0,
            assist: 0.7,
            shot_on_target: 0.15,
            shot_missed: -0.1,
            save: 0.15,
            goal_conceded: -0.2,
            tackle: 0.1,
            interception: 0.1,
            dribble: 0.05,
            foul: -0.1,
            yellow_card: -0.2,
            red_card: -1.0,
        }
    }
}

/// Timing multiplier for a match minute: scan the window table in order,
/// last matching row wins.
pub fn timing_multiplier(windows: &[(u8, u8, f32)], minute: u8) -> f32 {
    let mut multiplier = 1.0;

    for (from, to, value) in windows {
        if minute >= *from && minute <= *to {
            multiplier = *value;
        }
    }

    multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_windows_last_match_wins() {
        let windows = DEFAULT_TIMING_WINDOWS;

        assert_eq!(timing_multiplier(windows, 5), 0.8);
        assert_eq!(timing_multiplier(windows, 20), 1.0);
        assert_eq!(timing_multiplier(windows, 33), 1.2);
        assert_eq!(timing_multiplier(windows, 38), 1.3);
        assert_eq!(timing_multiplier(windows, 39), 1.5);
    }

    #[test]
    fn test_probability_clamp_forbids_certainty() {
        let bounds = ProbabilityTuning::default();

        assert_eq!(bounds.clamp(0.0), 0.05);
        assert_eq!(bounds.clamp(1.0), 0.95);
        assert_eq!(bounds.clamp(0.4), 0.4);
    }
}
