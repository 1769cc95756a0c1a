use crate::club::player::MatchAction;
use crate::r#match::engine::player::MatchPlayer;
use rand::RngExt;
use rand::rngs::StdRng;

/// Weighted-random player selection: traits decide who gets the chance,
/// never whether the chance succeeds.
pub struct TraitSelector;

impl TraitSelector {
    /// Cumulative-weight draw over the eligible pool. Every player starts at
    /// weight 1.0, multiplied by the trait weights relevant to the action.
    pub fn pick<'p>(
        rng: &mut StdRng,
        candidates: &[&'p MatchPlayer],
        action: MatchAction,
    ) -> Option<&'p MatchPlayer> {
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<f32> = candidates
            .iter()
            .map(|player| player.selection_weight(action))
            .collect();
        let total: f32 = weights.iter().sum();

        let mut draw = rng.random::<f32>() * total;
        for (player, weight) in candidates.iter().zip(&weights) {
            draw -= weight;
            if draw <= 0.0 {
                return Some(player);
            }
        }

        // Floating point remainder lands on the last candidate.
        candidates.last().copied()
    }
}
