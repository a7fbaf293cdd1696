mod cli;

use cli::{Args, Command};
use daily_gym::battle::runner::{BattleInfo, BattleRunner, CombatantInfo};
use daily_gym::battle::session::BattleSession;
use daily_gym::battle::state::{GameState, TurnRng};
use daily_gym::challenge::{
    generate_daily_challenge, time_until_next_challenge, DailyChallenge, DateProvider,
    SystemClock, VirtualDayClock,
};
use daily_gym::config::{EngineConfig, PacingConfig};
use daily_gym::dataset::Dataset;
use daily_gym::errors::ActionError;
use rand::Rng;
use std::error::Error;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> CliResult<()> {
    let config = EngineConfig::load(&args.config)?;
    let loaded;
    let dataset = match &config.dataset_path {
        Some(path) => {
            loaded = Dataset::load(path)?;
            &loaded
        }
        None => Dataset::bundled()?,
    };
    let clock = VirtualDayClock::new(SystemClock, args.day_offset);

    match args.command {
        Command::Challenge { date } => {
            let date = date.unwrap_or_else(|| clock.today_kst());
            let challenge = generate_daily_challenge(date, dataset, &config)?;
            print_challenge(&challenge);
            println!(
                "Next challenge in {}",
                time_until_next_challenge(clock.now())
            );
        }
        Command::Battle {
            picks,
            auto,
            instant,
        } => {
            let challenge = generate_daily_challenge(clock.today_kst(), dataset, &config)?;
            print_challenge(&challenge);

            let mut input = BufReader::new(tokio::io::stdin()).lines();
            let picks = if picks.is_empty() && !auto {
                prompt_picks(&mut input).await?
            } else if picks.is_empty() {
                vec![1, 2, 3]
            } else {
                picks
            };

            let mut selection = challenge.selection();
            for pick in picks {
                let Some(record) = pick.checked_sub(1).and_then(|i| challenge.rentals.get(i)) else {
                    return Err(format!("No rental number {}", pick).into());
                };
                selection.toggle(record.id)?;
            }
            let team = selection.confirm()?;

            let session =
                BattleSession::start(&team, &challenge.leader_roster, challenge.leader.name, &config)?;
            let pacing = if instant {
                PacingConfig::instant()
            } else {
                config.pacing
            };
            let runner = BattleRunner::new(session, pacing);
            play(&runner, auto, &mut input).await?;
        }
    }
    Ok(())
}

fn print_challenge(challenge: &DailyChallenge) {
    println!(
        "{} challenge: Gym Leader {} ({}), {} specialist",
        challenge.date, challenge.leader.name, challenge.leader.name_ko, challenge.leader.specialty
    );
    let roster: Vec<&str> = challenge
        .leader_roster
        .iter()
        .map(|record| record.name.as_str())
        .collect();
    println!("  Leader team: {}", roster.join(", "));
    println!("  Rentals:");
    for (i, record) in challenge.rentals.iter().enumerate() {
        let types: Vec<String> = record.types.iter().map(|t| t.to_string()).collect();
        println!("    {}. {} [{}]", i + 1, record.name, types.join("/"));
    }
}

async fn read_line(input: &mut Lines<BufReader<Stdin>>) -> CliResult<String> {
    match input.next_line().await? {
        Some(line) => Ok(line),
        None => Err("stdin closed".into()),
    }
}

async fn prompt_picks(input: &mut Lines<BufReader<Stdin>>) -> CliResult<Vec<usize>> {
    loop {
        println!("Pick three rentals (e.g. 1,4,5):");
        let line = read_line(input).await?;
        let picks: Result<Vec<usize>, _> =
            line.split(',').map(|part| part.trim().parse::<usize>()).collect();
        match picks {
            Ok(picks) if picks.len() == 3 => return Ok(picks),
            _ => println!("Enter exactly three numbers separated by commas."),
        }
    }
}

fn describe(combatant: &CombatantInfo) -> String {
    let status = combatant
        .status
        .as_ref()
        .map(|s| format!(" [{}]", s.abbreviation()))
        .unwrap_or_default();
    format!(
        "{} {}/{}{}",
        combatant.name, combatant.current_hp, combatant.max_hp, status
    )
}

fn print_field(info: &BattleInfo) {
    if let (Some(mine), Some(theirs)) = (
        info.player.members.get(info.player.active_index),
        info.opponent.members.get(info.opponent.active_index),
    ) {
        println!();
        println!("  Foe: {}", describe(theirs));
        println!("  You: {}", describe(mine));
    }
}

async fn play(
    runner: &BattleRunner,
    auto: bool,
    input: &mut Lines<BufReader<Stdin>>,
) -> CliResult<()> {
    let mut rng = TurnRng::new_random();
    for line in runner.info().await.log.iter().rev() {
        println!("{}", line);
    }

    loop {
        let info = runner.info().await;
        if info.game_state == GameState::Concluded {
            break;
        }
        print_field(&info);

        let moves = info
            .player
            .members
            .get(info.player.active_index)
            .map(|active| active.moves.clone())
            .unwrap_or_default();
        let move_index = if auto {
            rand::rng().random_range(0..moves.len().max(1))
        } else {
            for (i, name) in moves.iter().enumerate() {
                println!("  {}. {}", i + 1, name);
            }
            let line = read_line(input).await?;
            match line.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n - 1,
                _ => {
                    println!("Enter a move number.");
                    continue;
                }
            }
        };

        match runner
            .play_move(move_index, &mut rng, |event| {
                if let Some(line) = event.format() {
                    println!("{}", line);
                }
            })
            .await
        {
            Ok(_) => {}
            Err(ActionError::InvalidMoveIndex(_)) => println!("Enter a move number."),
            Err(e) => {
                warn!("{}", e);
                return Err(e.into());
            }
        }
    }

    if let Some(outcome) = runner.outcome().await {
        println!("Result: {}", outcome);
    }
    Ok(())
}
