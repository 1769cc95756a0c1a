use crate::club::player::Player;
use crate::r#match::engine::tactics::TacticalSetup;

/// One team's submission for a match: five starters, the bench, and the
/// tactical instruction set they start under. Validated by the engine at
/// initialization, not here.
#[derive(Debug, Clone)]
pub struct MatchSquad {
    pub team_id: u32,
    pub team_name: String,
    pub tactics: TacticalSetup,
    pub main_squad: Vec<Player>,
    pub substitutes: Vec<Player>,
}

impl MatchSquad {
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.main_squad.iter().chain(self.substitutes.iter())
    }
}
