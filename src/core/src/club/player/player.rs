use crate::club::player::skills::PlayerSkills;
use crate::club::player::traits::PlayerTrait;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize)]
pub enum PlayerPositionType {
    Goalkeeper,
    Defender,
    Winger,
    Pivot,
}

impl PlayerPositionType {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, PlayerPositionType::Goalkeeper)
    }

    /// Outfield positions a substitute can cover for a tired player.
    /// Goalkeepers are only ever covered by goalkeepers.
    pub fn covers(&self, other: PlayerPositionType) -> bool {
        match self {
            PlayerPositionType::Goalkeeper => other == PlayerPositionType::Goalkeeper,
            PlayerPositionType::Defender => {
                matches!(
                    other,
                    PlayerPositionType::Defender | PlayerPositionType::Winger
                )
            }
            PlayerPositionType::Winger => !other.is_goalkeeper(),
            PlayerPositionType::Pivot => {
                matches!(other, PlayerPositionType::Pivot | PlayerPositionType::Winger)
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerPositionType::Goalkeeper => "GK",
            PlayerPositionType::Defender => "DF",
            PlayerPositionType::Winger => "WG",
            PlayerPositionType::Pivot => "PV",
        }
    }
}

/// Roster player as supplied by the persistence layer.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    pub full_name: String,
    pub position: PlayerPositionType,
    pub skills: PlayerSkills,
    pub traits: Vec<PlayerTrait>,

    /// Match fitness in 0..100.
    pub fitness: f32,
    /// Recent form in 0..100, 50 neutral.
    pub form: f32,
    /// Morale in 0..100, 50 neutral.
    pub morale: f32,
}

impl Player {
    pub fn new(id: u32, full_name: String, position: PlayerPositionType) -> Self {
        Player {
            id,
            full_name,
            position,
            skills: PlayerSkills::uniform(10.0),
            traits: Vec::new(),
            fitness: 100.0,
            form: 50.0,
            morale: 50.0,
        }
    }

    pub fn with_skills(mut self, skills: PlayerSkills) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_traits(mut self, traits: Vec<PlayerTrait>) -> Self {
        self.traits = traits;
        self
    }

    /// Single quality scalar in 0..1 derived from skills, fitness, form and
    /// morale. Position decides which skill groups dominate.
    pub fn quality(&self) -> f32 {
        let skill_base = match self.position {
            PlayerPositionType::Goalkeeper => {
                self.skills.goalkeeping.average() * 0.7 + self.skills.mental.average() * 0.3
            }
            PlayerPositionType::Defender => {
                self.skills.technical.average() * 0.4
                    + self.skills.mental.average() * 0.35
                    + self.skills.physical.average() * 0.25
            }
            PlayerPositionType::Winger | PlayerPositionType::Pivot => {
                self.skills.technical.average() * 0.5
                    + self.skills.mental.average() * 0.25
                    + self.skills.physical.average() * 0.25
            }
        };

        let fitness_factor = (self.fitness / 100.0).clamp(0.5, 1.0);
        let form_factor = 0.9 + (self.form / 100.0) * 0.2;
        let morale_factor = 0.95 + (self.morale / 100.0) * 0.1;

        ((skill_base / 20.0) * fitness_factor * form_factor * morale_factor).clamp(0.0, 1.0)
    }

    pub fn has_trait(&self, player_trait: PlayerTrait) -> bool {
        self.traits.contains(&player_trait)
    }
}
