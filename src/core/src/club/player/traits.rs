/// Closed set of player traits. Traits bias which player is selected for an
/// action; only the mental and goalkeeper exceptions below touch success
/// probability.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PlayerTrait {
    Finisher,
    Playmaker,
    Dribbler,
    BallWinner,
    Sprinter,
    SetPieceSpecialist,
    TargetPivot,
    FlyGoalkeeper,

    // Mental exceptions - modify success probability directly
    Nerveless,
    Choker,
    Classy,
    Leader,

    // Goalkeeper exceptions
    ShotStopper,
    PenaltyKiller,
}

/// Action kinds the selection layer distinguishes between.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchAction {
    Shot,
    Dribble,
    Tackle,
    Interception,
    Assist,
    Corner,
    FreeKick,
    Penalty,
    Save,
    FlyAdvance,
}

impl MatchAction {
    pub fn is_set_piece(&self) -> bool {
        matches!(
            self,
            MatchAction::Corner | MatchAction::FreeKick | MatchAction::Penalty
        )
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, MatchAction::Assist)
    }
}

/// Selection weights per (trait, action). Weights multiply a 1.0 base and
/// stay within 1.3..2.0. Anything not listed here is irrelevant to selection.
pub const TRAIT_SELECTION_WEIGHTS: &[(PlayerTrait, MatchAction, f32)] = &[
    (PlayerTrait::Finisher, MatchAction::Shot, 1.6),
    (PlayerTrait::Finisher, MatchAction::Penalty, 1.3),
    (PlayerTrait::TargetPivot, MatchAction::Shot, 1.3),
    (PlayerTrait::Sprinter, MatchAction::Dribble, 1.4),
    (PlayerTrait::Dribbler, MatchAction::Dribble, 1.5),
    (PlayerTrait::BallWinner, MatchAction::Tackle, 1.5),
    (PlayerTrait::BallWinner, MatchAction::Interception, 1.4),
    (PlayerTrait::Playmaker, MatchAction::Assist, 1.5),
    (PlayerTrait::Playmaker, MatchAction::Corner, 1.3),
    (PlayerTrait::SetPieceSpecialist, MatchAction::Corner, 1.7),
    (PlayerTrait::SetPieceSpecialist, MatchAction::FreeKick, 1.7),
    (PlayerTrait::SetPieceSpecialist, MatchAction::Penalty, 1.5),
    (PlayerTrait::FlyGoalkeeper, MatchAction::FlyAdvance, 2.0),
];

/// Selection weight of one player for an action: 1.0 multiplied by every
/// relevant trait weight. Never affects success, only who gets the chance.
pub fn selection_weight(traits: &[PlayerTrait], action: MatchAction) -> f32 {
    let mut weight = 1.0;

    for (player_trait, relevant_action, trait_weight) in TRAIT_SELECTION_WEIGHTS {
        if *relevant_action == action && traits.contains(player_trait) {
            weight *= trait_weight;
        }
    }

    weight
}

/// Match situation snapshot for the mental-trait exceptions.
#[derive(Debug, Copy, Clone, Default)]
pub struct PressureSituation {
    pub late_game: bool,
    pub losing: bool,
}

/// Success-probability multiplier for the mental/goalkeeper exception traits.
/// Composes multiplicatively onto the base probability; the caller clamps
/// the final result.
pub fn success_modifier(
    traits: &[PlayerTrait],
    action: MatchAction,
    situation: PressureSituation,
) -> f32 {
    let mut modifier = 1.0;

    if traits.contains(&PlayerTrait::Nerveless) {
        if action.is_set_piece() {
            modifier *= 1.20;
        } else if situation.late_game {
            modifier *= 1.15;
        }
    }

    if traits.contains(&PlayerTrait::Choker) {
        if action.is_set_piece() {
            modifier *= 0.80;
        } else if situation.late_game {
            modifier *= 0.85;
        }
    }

    if traits.contains(&PlayerTrait::Classy) {
        modifier *= if action.is_pass() { 1.08 } else { 1.04 };
    }

    if traits.contains(&PlayerTrait::ShotStopper) && action == MatchAction::Save {
        modifier *= 1.06;
    }

    if traits.contains(&PlayerTrait::PenaltyKiller)
        && action == MatchAction::Save
        && situation.late_game
    {
        modifier *= 1.05;
    }

    modifier
}

/// Goalkeeper-side modifier when facing a penalty or free kick.
pub fn keeper_set_piece_modifier(traits: &[PlayerTrait]) -> f32 {
    if traits.contains(&PlayerTrait::PenaltyKiller) {
        1.10
    } else {
        1.0
    }
}

/// Team-wide morale bonus from having a leader on court.
pub fn team_leader_modifier(has_leader: bool, losing: bool) -> f32 {
    if !has_leader {
        1.0
    } else if losing {
        1.15
    } else {
        1.08
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finisher_weights_shot_selection() {
        let traits = [PlayerTrait::Finisher];

        assert_eq!(selection_weight(&traits, MatchAction::Shot), 1.6);
        assert_eq!(selection_weight(&traits, MatchAction::Tackle), 1.0);
    }

    #[test]
    fn test_selection_weights_stack() {
        let traits = [PlayerTrait::Finisher, PlayerTrait::TargetPivot];

        let weight = selection_weight(&traits, MatchAction::Shot);
        assert!((weight - 1.6 * 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_selection_weights_within_documented_range() {
        for (_, _, weight) in TRAIT_SELECTION_WEIGHTS {
            assert!(*weight >= 1.3 && *weight <= 2.0);
        }
    }

    #[test]
    fn test_nerveless_set_piece_bonus() {
        let traits = [PlayerTrait::Nerveless];
        let situation = PressureSituation {
            late_game: true,
            losing: false,
        };

        let on_penalty = success_modifier(&traits, MatchAction::Penalty, situation);
        let on_shot = success_modifier(&traits, MatchAction::Shot, situation);

        assert!((on_penalty - 1.20).abs() < 1e-6);
        assert!((on_shot - 1.15).abs() < 1e-6);
    }

    #[test]
    fn test_choker_mirrors_nerveless() {
        let situation = PressureSituation {
            late_game: true,
            losing: true,
        };

        let nerveless = success_modifier(&[PlayerTrait::Nerveless], MatchAction::Shot, situation);
        let choker = success_modifier(&[PlayerTrait::Choker], MatchAction::Shot, situation);

        assert!(nerveless > 1.0);
        assert!(choker < 1.0);
    }

    #[test]
    fn test_classy_pass_vs_other() {
        let traits = [PlayerTrait::Classy];
        let situation = PressureSituation::default();

        assert!(
            success_modifier(&traits, MatchAction::Assist, situation)
                > success_modifier(&traits, MatchAction::Shot, situation)
        );
    }

    #[test]
    fn test_leader_bonus_grows_when_losing() {
        assert_eq!(team_leader_modifier(false, true), 1.0);
        assert!(team_leader_modifier(true, true) > team_leader_modifier(true, false));
    }
}
