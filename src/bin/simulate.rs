use std::error::Error;
use std::process;

use clap::Parser;
use log::{info, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use skipbo::{
    Bot, DrawDiscardBot, Game, GameBuilder, PlannerBot, PlannerConfig, PlayerColor, PlayerConfig,
    PlayerKind, RandomBot, render_state,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play automated Skip-Bo games and report wins per seat."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// Base RNG seed; deck and bot seeds are derived from it per game
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Reserve pile depth per player (5-49)
    #[arg(long = "reserve-depth", default_value_t = skipbo::state::DEFAULT_RESERVE_DEPTH)]
    reserve_depth: usize,

    /// Safety cap on turns per game; games exceeding it are counted as aborted
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: u32,

    /// Expansion budget for each planner search phase
    #[arg(long = "max-expansions")]
    max_expansions: Option<usize>,

    /// Print the table after every turn
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Bot specs for the two seats: planner, draw-discard, random[:seed]
    #[arg(num_args = 0..=2)]
    bots: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let specs = match args.bots.len() {
        0 => vec![String::from("planner"), String::from("planner")],
        2 => args.bots.clone(),
        n => return Err(format!("expected two bot specs, received {n}").into()),
    };
    let mut planner_config = PlannerConfig::default();
    if let Some(max_expansions) = args.max_expansions {
        planner_config = planner_config.with_max_expansions(max_expansions);
    }

    let mut wins = [0usize; 2];
    let mut aborted = 0usize;
    for game_idx in 0..args.games {
        let game_seed = mix_seed(args.seed, game_idx as u64);
        let mut game = GameBuilder::new()
            .with_player_one(PlayerConfig::new(
                seat_name(&specs[0], 1),
                PlayerColor::Cyan,
                PlayerKind::Automated,
            ))
            .with_player_two(PlayerConfig::new(
                seat_name(&specs[1], 2),
                PlayerColor::Black,
                PlayerKind::Automated,
            ))
            .with_reserve_depth(args.reserve_depth)
            .with_seed(game_seed)
            .build()?;
        let mut bots = [
            create_bot(&specs[0], game_seed, 0, planner_config)?,
            create_bot(&specs[1], game_seed, 1, planner_config)?,
        ];

        match play_game(&mut game, &mut bots, args.max_turns, args.verbose)? {
            Some(winner) => {
                wins[winner] += 1;
                info!(
                    "game {game_idx}: {} wins after {} turns",
                    specs[winner],
                    game.turn()
                );
            }
            None => {
                aborted += 1;
                warn!("game {game_idx}: aborted at the {} turn cap", args.max_turns);
            }
        }
    }

    println!("Games played: {}", args.games);
    for (seat, spec) in specs.iter().enumerate() {
        let rate = if args.games == 0 {
            0.0
        } else {
            wins[seat] as f64 / args.games as f64 * 100.0
        };
        println!("  seat {} {spec:<14} wins {:>5} ({rate:.1}%)", seat + 1, wins[seat]);
    }
    if aborted > 0 {
        println!("  aborted: {aborted}");
    }
    Ok(())
}

fn play_game(
    game: &mut Game,
    bots: &mut [Box<dyn Bot>; 2],
    max_turns: u32,
    verbose: bool,
) -> Result<Option<usize>, Box<dyn Error>> {
    while !game.has_winner() {
        if game.turn() >= max_turns {
            return Ok(None);
        }
        let seat = game.current_player();
        *game = bots[seat].take_turn(game)?;
        for event in game.drain_events() {
            trace!("{event:?}");
        }
        if verbose {
            println!("{}", render_state(&game.state_view()));
        }
    }
    Ok(game.winner())
}

fn create_bot(
    spec: &str,
    game_seed: u64,
    seat: usize,
    planner_config: PlannerConfig,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let spec_lower = spec.to_ascii_lowercase();
    if spec_lower == "planner" {
        Ok(Box::new(PlannerBot::new(planner_config)))
    } else if spec_lower == "draw-discard" {
        Ok(Box::new(DrawDiscardBot::new()))
    } else if spec_lower.starts_with("random") {
        let custom_seed = spec
            .split_once(':')
            .and_then(|(_, value)| value.parse::<u64>().ok())
            .unwrap_or(game_seed ^ ((seat as u64 + 1) * 0x9E37_79B9));
        Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
    } else {
        Err(format!("unrecognized bot spec: {spec}").into())
    }
}

/// Player names must differ and fit in twelve characters.
fn seat_name(spec: &str, seat: usize) -> String {
    let label: String = spec
        .split(':')
        .next()
        .unwrap_or(spec)
        .chars()
        .take(9)
        .collect();
    format!("{label} {seat}")
}

fn mix_seed(base: u64, game_idx: u64) -> u64 {
    base ^ game_idx.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
}
