pub mod discipline;
pub mod dispatcher;
pub mod engine;
pub mod events;
pub mod fatigue;
pub mod fly_keeper;
pub mod generator;
pub mod momentum;
pub mod player;
pub mod rating;
pub mod selection;
pub mod state;
pub mod substitutions;
pub mod tactics;
pub mod tuning;

pub use engine::FutsalEngine;
pub use events::{GoalContext, MatchEvent, MatchEventType, TeamSide};
pub use player::MatchPlayer;
pub use state::{MatchState, Score, TOTAL_TICKS};
pub use tactics::{
    FlyGoalkeeperMode, Formation, Mentality, PressingIntensity, TacticalSetup, TeamWidth,
};
pub use tuning::EngineTuning;
