use crate::r#match::engine::{EngineTuning, FutsalEngine};
use crate::r#match::error::EngineError;
use crate::r#match::result::MatchResult;
use crate::r#match::squad::MatchSquad;
use log::info;
use rayon::prelude::*;

/// One scheduled match. The seed makes the fixture replayable.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub home: MatchSquad,
    pub away: MatchSquad,
    pub seed: u64,
}

/// Runs a slate of fixtures in parallel, one engine per match. Matches never
/// share mutable state, so a round of a league resolves across all cores.
pub struct BatchSimulator {
    tuning: EngineTuning,
}

impl Default for BatchSimulator {
    fn default() -> Self {
        BatchSimulator {
            tuning: EngineTuning::default(),
        }
    }
}

impl BatchSimulator {
    pub fn new(tuning: EngineTuning) -> Self {
        BatchSimulator { tuning }
    }

    pub fn simulate(&self, fixtures: &[Fixture]) -> Vec<Result<MatchResult, EngineError>> {
        info!("simulating {} fixtures", fixtures.len());

        fixtures
            .par_iter()
            .map(|fixture| {
                let mut engine = FutsalEngine::new(self.tuning.clone(), fixture.seed);
                engine.simulate(&fixture.home, &fixture.away)
            })
            .collect()
    }
}
