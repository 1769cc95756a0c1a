mod squad;

pub use squad::MatchSquad;
