use crate::club::player::{MatchAction, Player, PlayerPositionType, PlayerSkills, PlayerTrait};
use crate::club::player::traits;

/// In-match view of a roster player. Energy is tracked separately in
/// `MatchState::fatigue`; skill helpers take the interpolated effectiveness
/// factor so no probability ever reads a raw attribute.
#[derive(Debug, Clone)]
pub struct MatchPlayer {
    pub id: u32,
    pub full_name: String,
    pub position: PlayerPositionType,
    pub skills: PlayerSkills,
    pub traits: Vec<PlayerTrait>,
    /// Quality scalar from the roster model (skills x fitness x form x morale).
    pub base_quality: f32,
}

impl MatchPlayer {
    pub fn from_player(player: &Player) -> Self {
        MatchPlayer {
            id: player.id,
            full_name: player.full_name.clone(),
            position: player.position,
            skills: player.skills,
            traits: player.traits.clone(),
            base_quality: player.quality(),
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position.is_goalkeeper()
    }

    pub fn has_trait(&self, player_trait: PlayerTrait) -> bool {
        self.traits.contains(&player_trait)
    }

    pub fn selection_weight(&self, action: MatchAction) -> f32 {
        traits::selection_weight(&self.traits, action)
    }

    /// Shooting quality in 0..1 from energy-adjusted attributes.
    pub fn shot_quality(&self, energy_factor: f32) -> f32 {
        let score = self.skills.technical.shooting * 0.40
            + self.skills.mental.positioning * 0.25
            + self.skills.mental.composure * 0.20
            + self.skills.physical.strength * 0.15;

        (score / 20.0 * energy_factor).clamp(0.0, 1.0)
    }

    /// Defensive contribution in 0..1, used for opponent shot resistance.
    pub fn defensive_score(&self, energy_factor: f32) -> f32 {
        let score = self.skills.technical.tackling * 0.35
            + self.skills.mental.positioning * 0.30
            + self.skills.physical.pace * 0.20
            + self.skills.physical.stamina * 0.15;

        (score / 20.0 * energy_factor).clamp(0.0, 1.0)
    }

    /// Goalkeeper shot-stopping score in 0..1.
    pub fn save_score(&self, energy_factor: f32) -> f32 {
        let score = self.skills.goalkeeping.reflexes * 0.35
            + self.skills.goalkeeping.handling * 0.25
            + self.skills.mental.positioning * 0.25
            + self.skills.mental.composure * 0.15;

        (score / 20.0 * energy_factor).clamp(0.0, 1.0)
    }

    /// 1v1 dribbling score in 0..1.
    pub fn dribble_score(&self, energy_factor: f32) -> f32 {
        let score = self.skills.technical.dribbling * 0.45
            + self.skills.technical.technique * 0.25
            + self.skills.physical.pace * 0.30;

        (score / 20.0 * energy_factor).clamp(0.0, 1.0)
    }

    /// Dead-ball striking score in 0..1, used for penalties and free kicks.
    pub fn set_piece_score(&self, energy_factor: f32) -> f32 {
        let score = self.skills.technical.set_pieces * 0.45
            + self.skills.technical.shooting * 0.30
            + self.skills.mental.composure * 0.25;

        (score / 20.0 * energy_factor).clamp(0.0, 1.0)
    }
}
