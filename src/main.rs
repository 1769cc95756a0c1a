use env_logger::Env;
use futsal_core::club::player::{Player, PlayerPositionType, PlayerSkills, PlayerTrait};
use futsal_core::r#match::engine::tactics::{Mentality, PressingIntensity, TacticalSetup};
use futsal_core::{BatchSimulator, Fixture, MatchSquad};
use log::info;
use std::env;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let rounds: u64 = env::var("ROUNDS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(4);

    let fixtures: Vec<Fixture> = (0..rounds)
        .map(|round| Fixture {
            home: demo_squad(1, "Falcao FC", attacking_tactics()),
            away: demo_squad(2, "Ricardinho CF", TacticalSetup::default()),
            seed: round,
        })
        .collect();

    let results = BatchSimulator::default().simulate(&fixtures);

    for (round, result) in results.iter().enumerate() {
        match result {
            Ok(result) => {
                info!(
                    "round {}: {} {} - {} {} (possession {:.0}% / {:.0}%)",
                    round + 1,
                    result.home.team_name,
                    result.score.home,
                    result.score.away,
                    result.away.team_name,
                    result.home_possession_percent(),
                    result.away_possession_percent(),
                );

                if let Some(best) = result.player_stats.first() {
                    info!(
                        "  player of the match: {} ({:.1})",
                        best.full_name, best.rating
                    );
                }
            }
            Err(error) => info!("round {}: simulation failed: {error}", round + 1),
        }
    }

    Ok(())
}

fn attacking_tactics() -> TacticalSetup {
    TacticalSetup {
        mentality: Mentality::Attacking,
        pressing: PressingIntensity::High,
        ..TacticalSetup::default()
    }
}

fn demo_squad(team_id: u32, team_name: &str, tactics: TacticalSetup) -> MatchSquad {
    let base_id = team_id * 100;
    let starters = [
        ("GK", PlayerPositionType::Goalkeeper, vec![PlayerTrait::ShotStopper]),
        ("DF A", PlayerPositionType::Defender, vec![PlayerTrait::BallWinner]),
        ("DF B", PlayerPositionType::Defender, vec![PlayerTrait::Leader]),
        ("WG", PlayerPositionType::Winger, vec![PlayerTrait::Dribbler]),
        ("PV", PlayerPositionType::Pivot, vec![PlayerTrait::Finisher]),
    ];
    let bench = [
        ("GK 2", PlayerPositionType::Goalkeeper, vec![]),
        ("DF C", PlayerPositionType::Defender, vec![]),
        ("WG 2", PlayerPositionType::Winger, vec![PlayerTrait::Sprinter]),
        ("PV 2", PlayerPositionType::Pivot, vec![PlayerTrait::TargetPivot]),
    ];

    let build = |offset: u32, (name, position, traits): (&str, PlayerPositionType, Vec<PlayerTrait>)| {
        Player::new(
            base_id + offset,
            format!("{team_name} {name}"),
            position,
        )
        .with_skills(PlayerSkills::uniform(13.0))
        .with_traits(traits)
    };

    MatchSquad {
        team_id,
        team_name: String::from(team_name),
        tactics,
        main_squad: starters
            .into_iter()
            .enumerate()
            .map(|(i, entry)| build(i as u32, entry))
            .collect(),
        substitutes: bench
            .into_iter()
            .enumerate()
            .map(|(i, entry)| build(10 + i as u32, entry))
            .collect(),
    }
}
