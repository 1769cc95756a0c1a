use serde::Serialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opposite(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum MatchEventType {
    Shot,
    Goal,
    Save,
    Block,
    Tackle,
    Interception,
    DribbleSuccess,
    DribbleFail,
    Foul,
    YellowCard,
    RedCard,
    Corner,
    Substitution,
    Penalty,
}

/// Analytics tag attached to goals.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum GoalContext {
    OpenPlay,
    CounterAttack,
    /// Counter converted against a team whose fly goalkeeper was active.
    CounterAgainstFlyGoalkeeper,
    TenMeterPenalty,
    FreeKick,
    Corner,
}

/// One immutable entry of the append-only play-by-play log.
#[derive(Debug, Clone, Serialize)]
pub struct MatchEvent {
    pub tick: u16,
    pub minute: u8,
    pub event_type: MatchEventType,
    pub side: TeamSide,
    pub player_id: Option<u32>,
    pub assist_player_id: Option<u32>,
    pub is_counter_attack: bool,
    pub goal_context: Option<GoalContext>,
    pub description: String,
}

impl MatchEvent {
    pub fn new(tick: u16, event_type: MatchEventType, side: TeamSide) -> Self {
        MatchEvent {
            tick,
            minute: minute_of(tick),
            event_type,
            side,
            player_id: None,
            assist_player_id: None,
            is_counter_attack: false,
            goal_context: None,
            description: String::new(),
        }
    }

    pub fn with_player(mut self, player_id: u32) -> Self {
        self.player_id = Some(player_id);
        self
    }

    pub fn with_assist(mut self, assist_player_id: u32) -> Self {
        self.assist_player_id = Some(assist_player_id);
        self
    }

    pub fn on_counter(mut self) -> Self {
        self.is_counter_attack = true;
        self
    }

    pub fn with_goal_context(mut self, context: GoalContext) -> Self {
        self.goal_context = Some(context);
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }
}

/// Each tick is 15 simulated seconds; four ticks per minute.
pub fn minute_of(tick: u16) -> u8 {
    (tick / 4) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_of_tick() {
        assert_eq!(minute_of(0), 0);
        assert_eq!(minute_of(3), 0);
        assert_eq!(minute_of(4), 1);
        assert_eq!(minute_of(80), 20);
        assert_eq!(minute_of(159), 39);
    }

    #[test]
    fn test_event_builder_chain() {
        let event = MatchEvent::new(120, MatchEventType::Goal, TeamSide::Away)
            .with_player(7)
            .with_assist(9)
            .on_counter()
            .with_goal_context(GoalContext::CounterAttack);

        assert_eq!(event.minute, 30);
        assert_eq!(event.player_id, Some(7));
        assert_eq!(event.assist_player_id, Some(9));
        assert!(event.is_counter_attack);
        assert_eq!(event.goal_context, Some(GoalContext::CounterAttack));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(TeamSide::Home.opposite(), TeamSide::Away);
        assert_eq!(TeamSide::Away.opposite(), TeamSide::Home);
    }
}
