pub mod club;
pub mod r#match;
pub mod simulator;

pub use club::player::{Player, PlayerPositionType, PlayerSkills, PlayerTrait};
pub use r#match::{
    EngineTuning, FutsalEngine, MatchResult, MatchSession, MatchSquad, TacticalSetup,
};
pub use simulator::{BatchSimulator, Fixture};
