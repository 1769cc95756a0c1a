pub mod engine;
pub mod error;
pub mod result;
pub mod session;
pub mod squad;
pub mod statistics;

pub use engine::{
    EngineTuning, FlyGoalkeeperMode, Formation, FutsalEngine, GoalContext, MatchEvent,
    MatchEventType, MatchState, Mentality, PressingIntensity, Score, TacticalSetup, TeamSide,
    TeamWidth,
};
pub use error::{EngineError, EngineErrorKind};
pub use result::{MatchResult, PlayerMatchEndStats, TeamResult};
pub use session::{MatchSession, MatchSnapshot, SimulationSpeed, TeamSnapshot, UserAction};
pub use squad::MatchSquad;
pub use statistics::TeamStatistics;
