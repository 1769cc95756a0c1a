use crate::r#match::engine::events::TeamSide;
use thiserror::Error;

/// Failure taxonomy of the engine. Invalid-state variants are programming or
/// integration bugs and are never retried; data-integrity variants are fatal
/// to the affected match. Probability math never errors - out-of-range
/// inputs are clamped instead.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum EngineError {
    #[error("match is already complete at tick {tick}, cannot advance")]
    MatchAlreadyComplete { tick: u16 },

    #[error("match is not complete at tick {tick}, cannot finalize")]
    MatchNotComplete { tick: u16 },

    #[error("match result was already finalized")]
    AlreadyFinalized,

    #[error("player {player_id} is not eligible for this action")]
    PlayerNotEligible { player_id: u32 },

    #[error("{side:?} roster has no goalkeeper")]
    MissingGoalkeeper { side: TeamSide },

    #[error("{side:?} roster has {count} starters, need exactly 5")]
    InvalidLineupSize { side: TeamSide, count: usize },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EngineErrorKind {
    InvalidState,
    DataIntegrity,
}

impl EngineError {
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            EngineError::MatchAlreadyComplete { .. }
            | EngineError::MatchNotComplete { .. }
            | EngineError::AlreadyFinalized
            | EngineError::PlayerNotEligible { .. } => EngineErrorKind::InvalidState,
            EngineError::MissingGoalkeeper { .. } | EngineError::InvalidLineupSize { .. } => {
                EngineErrorKind::DataIntegrity
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            EngineError::MatchAlreadyComplete { tick: 160 }.kind(),
            EngineErrorKind::InvalidState
        );
        assert_eq!(
            EngineError::MissingGoalkeeper {
                side: TeamSide::Home
            }
            .kind(),
            EngineErrorKind::DataIntegrity
        );
    }
}
