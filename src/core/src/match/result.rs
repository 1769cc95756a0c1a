use crate::r#match::engine::events::{MatchEvent, MatchEventType, TeamSide};
use crate::r#match::engine::state::{MatchState, Score, TOTAL_TICKS};
use crate::r#match::engine::tuning::RatingTuning;
use crate::r#match::statistics::TeamStatistics;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;

/// Immutable outcome of a finalized match: final score, per-team statistics,
/// the complete event log and the per-player end-of-match numbers.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub score: Score,
    pub home: TeamResult,
    pub away: TeamResult,
    pub events: Vec<MatchEvent>,
    /// Sorted by rating, best performer first.
    pub player_stats: Vec<PlayerMatchEndStats>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamResult {
    pub team_id: u32,
    pub team_name: String,
    pub statistics: TeamStatistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMatchEndStats {
    pub player_id: u32,
    pub full_name: String,
    pub side: TeamSide,
    pub rating: f32,
    pub energy_remaining: f32,
    pub goals: u8,
    pub assists: u8,
}

impl MatchResult {
    pub fn from_state(state: &MatchState, tuning: &RatingTuning) -> Self {
        let player_stats = [TeamSide::Home, TeamSide::Away]
            .into_iter()
            .flat_map(|side| {
                let team = state.side(side);
                // Expelled players still belong in the final record.
                team.lineup
                    .iter()
                    .chain(&team.bench)
                    .chain(&team.suspended)
                    .map(move |player| (side, player))
            })
            .map(|(side, player)| {
                let rating = state
                    .ratings
                    .get(&player.id)
                    .map(|accumulator| accumulator.rating(state.energy(player.id), tuning))
                    .unwrap_or(tuning.outfield_baseline);

                PlayerMatchEndStats {
                    player_id: player.id,
                    full_name: player.full_name.clone(),
                    side,
                    rating,
                    energy_remaining: state.energy(player.id),
                    goals: Self::count_goals(&state.events, player.id, false),
                    assists: Self::count_goals(&state.events, player.id, true),
                }
            })
            .sorted_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .collect();

        MatchResult {
            score: state.score,
            home: TeamResult {
                team_id: state.home.team_id,
                team_name: state.home.team_name.clone(),
                statistics: state.home.statistics.clone(),
            },
            away: TeamResult {
                team_id: state.away.team_id,
                team_name: state.away.team_name.clone(),
                statistics: state.away.statistics.clone(),
            },
            events: state.events.clone(),
            player_stats,
            finished_at: Utc::now(),
        }
    }

    fn count_goals(events: &[MatchEvent], player_id: u32, as_assist: bool) -> u8 {
        events
            .iter()
            .filter(|e| e.event_type == MatchEventType::Goal)
            .filter(|e| {
                if as_assist {
                    e.assist_player_id == Some(player_id)
                } else {
                    e.player_id == Some(player_id)
                }
            })
            .count() as u8
    }

    pub fn home_possession_percent(&self) -> f32 {
        self.home.statistics.possession_percent(TOTAL_TICKS)
    }

    pub fn away_possession_percent(&self) -> f32 {
        self.away.statistics.possession_percent(TOTAL_TICKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::engine::FutsalEngine;
    use crate::r#match::engine::state::test_support;

    fn finished_result() -> MatchResult {
        let home = test_support::squad(1, 1, 12.0);
        let away = test_support::squad(2, 100, 12.0);
        let mut engine = FutsalEngine::with_seed(19);
        engine.simulate(&home, &away).unwrap()
    }

    #[test]
    fn test_result_covers_all_players() {
        let result = finished_result();

        // 5 starters + 4 bench per team.
        assert_eq!(result.player_stats.len(), 18);
        for stats in &result.player_stats {
            assert!((6.0..=10.0).contains(&stats.rating));
            assert!((0.0..=100.0).contains(&stats.energy_remaining));
        }
    }

    #[test]
    fn test_player_stats_sorted_by_rating() {
        let result = finished_result();

        for pair in result.player_stats.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
        }
    }

    #[test]
    fn test_expelled_player_stays_in_final_record() {
        let home = test_support::squad(1, 1, 12.0);
        let away = test_support::squad(2, 100, 12.0);
        let mut engine = FutsalEngine::with_seed(37);
        let mut state = engine.initialize(&home, &away).unwrap();

        // Expel a starter the way a red card does: off the court, out of the
        // rotation, kept only in the suspended list.
        let expelled_id = state.away.lineup[2].id;
        let expelled = state.away.remove_from_lineup(expelled_id).unwrap();
        state.away.suspended.push(expelled);

        engine.play(&mut state).unwrap();
        let result = engine.finalize(&mut state).unwrap();

        assert_eq!(result.player_stats.len(), 18);
        let line = result
            .player_stats
            .iter()
            .find(|stats| stats.player_id == expelled_id)
            .expect("expelled player missing from final record");
        assert!((6.0..=10.0).contains(&line.rating));
    }

    #[test]
    fn test_goal_tally_matches_score() {
        let result = finished_result();

        let tallied: u32 = result
            .player_stats
            .iter()
            .map(|stats| stats.goals as u32)
            .sum();
        assert_eq!(tallied, result.score.home as u32 + result.score.away as u32);
    }

    #[test]
    fn test_possession_sums_to_hundred() {
        let result = finished_result();

        let total = result.home_possession_percent() + result.away_possession_percent();
        assert!((total - 100.0).abs() < 0.01);
    }
}
