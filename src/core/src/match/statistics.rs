use serde::Serialize;

/// Running per-team counters, updated as events are generated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamStatistics {
    pub shots: u16,
    pub shots_on_target: u16,
    pub blocked_shots: u16,
    pub tackles: u16,
    pub interceptions: u16,
    pub dribbles_completed: u16,
    pub dribbles_failed: u16,
    pub fouls: u16,
    pub corners: u16,
    pub free_kicks: u16,
    pub penalties_awarded: u16,
    pub saves: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub substitutions: u16,
    pub possession_ticks: u16,
}

impl TeamStatistics {
    pub fn possession_percent(&self, total_ticks: u16) -> f32 {
        if total_ticks == 0 {
            0.0
        } else {
            self.possession_ticks as f32 * 100.0 / total_ticks as f32
        }
    }

    pub fn shot_accuracy(&self) -> f32 {
        if self.shots == 0 {
            0.0
        } else {
            self.shots_on_target as f32 / self.shots as f32
        }
    }
}
