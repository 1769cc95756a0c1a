use serde::Serialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum Formation {
    /// 1-2-1, the balanced default.
    Diamond,
    /// 2-2, compact double pairs.
    Square,
    /// 3-1, defensive block with a lone pivot.
    Wall,
    /// 4-0, rotating line with no fixed pivot.
    Carousel,
}

impl Formation {
    pub fn display_name(&self) -> &'static str {
        match self {
            Formation::Diamond => "1-2-1",
            Formation::Square => "2-2",
            Formation::Wall => "3-1",
            Formation::Carousel => "4-0",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum Mentality {
    VeryDefensive,
    Defensive,
    Balanced,
    Attacking,
    VeryAttacking,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum PressingIntensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum TeamWidth {
    Narrow,
    Normal,
    Wide,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum FlyGoalkeeperMode {
    Never,
    Sometimes,
    EndGame,
    Always,
}

/// One team's tactical instruction set for a match. Changeable between ticks
/// via user action.
#[derive(Debug, Copy, Clone, Serialize)]
pub struct TacticalSetup {
    pub formation: Formation,
    pub mentality: Mentality,
    pub pressing: PressingIntensity,
    pub width: TeamWidth,
    pub fly_goalkeeper: FlyGoalkeeperMode,
}

impl Default for TacticalSetup {
    fn default() -> Self {
        TacticalSetup {
            formation: Formation::Diamond,
            mentality: Mentality::Balanced,
            pressing: PressingIntensity::Medium,
            width: TeamWidth::Normal,
            fly_goalkeeper: FlyGoalkeeperMode::Never,
        }
    }
}

/// Multipliers every other engine component consumes. All neutral at 1.0.
#[derive(Debug, Copy, Clone)]
pub struct TacticalModifiers {
    pub shot_frequency: f32,
    pub possession_weight: f32,
    pub defensive_resistance: f32,
    pub dribble_rate: f32,
    pub tackle_rate: f32,
    pub foul_rate: f32,
    pub corner_rate: f32,
    pub fatigue_rate: f32,
    pub counter_vulnerability: f32,
}

impl Default for TacticalModifiers {
    fn default() -> Self {
        TacticalModifiers {
            shot_frequency: 1.0,
            possession_weight: 1.0,
            defensive_resistance: 1.0,
            dribble_rate: 1.0,
            tackle_rate: 1.0,
            foul_rate: 1.0,
            corner_rate: 1.0,
            fatigue_rate: 1.0,
            counter_vulnerability: 1.0,
        }
    }
}

impl TacticalSetup {
    /// Map the instruction set into the multipliers consumed by the event
    /// generator, fatigue tracker and discipline system. Composition is
    /// multiplicative across the individual instructions.
    pub fn modifiers(&self) -> TacticalModifiers {
        let mut modifiers = TacticalModifiers::default();

        match self.mentality {
            Mentality::VeryDefensive => {
                modifiers.shot_frequency *= 0.70;
                modifiers.defensive_resistance *= 1.25;
                modifiers.possession_weight *= 0.85;
                modifiers.dribble_rate *= 0.85;
                modifiers.counter_vulnerability *= 0.80;
            }
            Mentality::Defensive => {
                modifiers.shot_frequency *= 0.85;
                modifiers.defensive_resistance *= 1.12;
                modifiers.possession_weight *= 0.92;
                modifiers.dribble_rate *= 0.92;
                modifiers.counter_vulnerability *= 0.90;
            }
            Mentality::Balanced => {}
            Mentality::Attacking => {
                modifiers.shot_frequency *= 1.18;
                modifiers.defensive_resistance *= 0.92;
                modifiers.possession_weight *= 1.08;
                modifiers.dribble_rate *= 1.08;
                modifiers.counter_vulnerability *= 1.12;
            }
            Mentality::VeryAttacking => {
                modifiers.shot_frequency *= 1.35;
                modifiers.defensive_resistance *= 0.82;
                modifiers.possession_weight *= 1.15;
                modifiers.dribble_rate *= 1.15;
                modifiers.counter_vulnerability *= 1.25;
            }
        }

        match self.pressing {
            PressingIntensity::Low => {
                modifiers.tackle_rate *= 0.85;
                modifiers.foul_rate *= 0.85;
                modifiers.fatigue_rate *= 0.90;
            }
            PressingIntensity::Medium => {}
            PressingIntensity::High => {
                modifiers.tackle_rate *= 1.20;
                modifiers.foul_rate *= 1.20;
                modifiers.fatigue_rate *= 1.15;
                modifiers.possession_weight *= 1.05;
            }
        }

        match self.width {
            TeamWidth::Narrow => {
                modifiers.defensive_resistance *= 1.05;
                modifiers.corner_rate *= 0.85;
            }
            TeamWidth::Normal => {}
            TeamWidth::Wide => {
                modifiers.corner_rate *= 1.20;
                modifiers.shot_frequency *= 1.05;
                modifiers.defensive_resistance *= 0.95;
            }
        }

        match self.formation {
            Formation::Diamond => {}
            Formation::Square => {
                modifiers.defensive_resistance *= 1.05;
                modifiers.shot_frequency *= 0.95;
            }
            Formation::Wall => {
                modifiers.defensive_resistance *= 1.12;
                modifiers.shot_frequency *= 0.88;
                modifiers.counter_vulnerability *= 0.90;
            }
            Formation::Carousel => {
                modifiers.possession_weight *= 1.10;
                modifiers.dribble_rate *= 1.10;
                modifiers.fatigue_rate *= 1.10;
                modifiers.counter_vulnerability *= 1.10;
            }
        }

        modifiers
    }

    pub fn is_high_pressing(&self) -> bool {
        self.pressing == PressingIntensity::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attacking_mentality_raises_shot_frequency() {
        let attacking = TacticalSetup {
            mentality: Mentality::VeryAttacking,
            ..TacticalSetup::default()
        };
        let defensive = TacticalSetup {
            mentality: Mentality::VeryDefensive,
            ..TacticalSetup::default()
        };

        assert!(attacking.modifiers().shot_frequency > defensive.modifiers().shot_frequency);
        assert!(attacking.modifiers().dribble_rate > defensive.modifiers().dribble_rate);
        assert!(
            attacking.modifiers().defensive_resistance
                < defensive.modifiers().defensive_resistance
        );
    }

    #[test]
    fn test_high_press_costs_energy() {
        let pressing = TacticalSetup {
            pressing: PressingIntensity::High,
            ..TacticalSetup::default()
        };

        assert!(pressing.modifiers().fatigue_rate > 1.0);
        assert!(pressing.modifiers().tackle_rate > 1.0);
    }

    #[test]
    fn test_default_setup_is_neutral() {
        let modifiers = TacticalSetup::default().modifiers();

        assert_eq!(modifiers.shot_frequency, 1.0);
        assert_eq!(modifiers.possession_weight, 1.0);
        assert_eq!(modifiers.defensive_resistance, 1.0);
    }
}
