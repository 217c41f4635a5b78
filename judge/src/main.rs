use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use judge::{play_game, AgentRegistry, Config, GameResult, PlayerConfig, Recorder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uttt::Player;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to config JSON files of bots to register as agents
    #[arg(short, long, global = true)]
    agent_config: Vec<PathBuf>,

    /// RNG seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info", global = true)]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Play a single game, printing the board after every move
    Play {
        /// Agent playing X. Asked for on the console if missing.
        #[arg(long)]
        x: Option<String>,

        /// Agent playing O. Asked for on the console if missing.
        #[arg(long)]
        o: Option<String>,

        /// Forfeit the game after this many illegal moves in a row
        #[arg(long)]
        max_illegal_attempts: Option<usize>,
    },
    /// Let every pair of agents play a match
    Tournament {
        /// Names of the agents taking part
        #[clap(num_args(2..), value_delimiter = ' ')]
        agents: Vec<String>,

        /// How many games to play per match
        #[arg(short, long, default_value_t = 100)]
        num_games: usize,

        /// Stop a match as soon as one player makes an illegal move
        #[arg(short, long, default_value_t = false)]
        stop_on_illegal_move: bool,

        /// Record the games' moves as JSON files into this directory
        #[arg(short, long)]
        record_games_to_directory: Option<PathBuf>,

        /// Forfeit a game after this many illegal moves in a row
        #[arg(long, default_value_t = 1)]
        max_illegal_attempts: usize,
    },
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    ties: usize,
}

fn play_single_game(
    registry: &AgentRegistry,
    rng: &mut StdRng,
    names: [Option<String>; 2],
    max_illegal_attempts: Option<usize>,
) -> anyhow::Result<()> {
    let [x_name, o_name] = names;
    let x_name = match x_name {
        Some(name) => name,
        None => registry.choose_interactively(
            Player::X,
            std::io::stdin().lock(),
            std::io::stdout(),
        )?,
    };
    let o_name = match o_name {
        Some(name) => name,
        None => registry.choose_interactively(
            Player::O,
            std::io::stdin().lock(),
            std::io::stdout(),
        )?,
    };

    let mut x = registry.create(&x_name, rng)?;
    let mut o = registry.create(&o_name, rng)?;
    let config = Config {
        max_illegal_attempts,
        show_board: true,
    };

    match play_game(x.as_mut(), o.as_mut(), &config, &mut None)? {
        GameResult::Tie => println!("Scratch Game"),
        GameResult::WonBy(player) => println!("{} wins!", player),
        GameResult::IllegalMoveByPlayer { player, err } => {
            println!("{} loses by illegal move: {}", player, err);
        }
    }
    x.bye()?;
    o.bye()?;
    Ok(())
}

fn play_matchup(
    names: [&str; 2],
    registry: &AgentRegistry,
    num_games: usize,
    rng: &mut StdRng,
    stop_on_illegal_move: bool,
    max_illegal_attempts: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let mut agents = [registry.create(names[0], rng)?, registry.create(names[1], rng)?];
    let config = Config {
        max_illegal_attempts: Some(max_illegal_attempts),
        show_board: false,
    };
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        // Randomly pick who plays X and thereby moves first
        let x_idx = if rng.gen::<bool>() { 1 } else { 0 };
        let [first, second] = &mut agents;
        let (x, o) = if x_idx == 0 {
            (first, second)
        } else {
            (second, first)
        };
        let player_idx = |player: Player| match player {
            Player::X => x_idx,
            Player::O => 1 - x_idx,
        };

        match play_game(x.as_mut(), o.as_mut(), &config, recorder)? {
            GameResult::WonBy(player) => {
                debug!(winner = names[player_idx(player)], %player, game_idx);
                match_score.wins[player_idx(player)] += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            GameResult::IllegalMoveByPlayer { player, err } => {
                let idx = player_idx(player);
                info!(player = names[idx], game_idx, "Illegal move by player: {}", err);
                if stop_on_illegal_move {
                    break;
                } else {
                    match_score.wins[1 - idx] += 1;
                    match_score.illegal_moves[idx] += 1;
                }
            }
        }
    }

    for agent in agents.iter_mut() {
        agent.bye()?;
    }

    let paren_1 = if match_score.illegal_moves[1] > 0 {
        format!(
            " ({} through illegal moves by player 2)",
            match_score.illegal_moves[1]
        )
    } else {
        String::new()
    };
    let paren_2 = if match_score.illegal_moves[0] > 0 {
        format!(
            " ({} through illegal moves by player 1)",
            match_score.illegal_moves[0]
        )
    } else {
        String::new()
    };
    eprintln!(
        "End result:\n- {} wins by {}{}\n- {} wins by {}{}\n- {} ties",
        match_score.wins[0],
        names[0],
        paren_1,
        match_score.wins[1],
        names[1],
        paren_2,
        match_score.ties
    );

    Ok(match_score)
}

// A single cell of the results matrix, N/A when no game was completed
fn score_cell(score: &MatchScore) -> String {
    let num_games = score.wins[0] + score.wins[1] + score.ties;
    if num_games == 0 {
        return format!(" {:19} |", "N/A");
    }
    let win_1_percentage = score.wins[0] as f32 / num_games as f32 * 100.0;
    let win_2_percentage = score.wins[1] as f32 / num_games as f32 * 100.0;
    let tie_percentage = score.ties as f32 / num_games as f32 * 100.0;
    format!(
        "{:5.1}% {:5.1}% {:5.1}% |",
        win_1_percentage, win_2_percentage, tie_percentage
    )
}

// prints an upper triangular matrix of the results of the tournament
fn print_tournament_results(
    names: &[String],
    match_results: &HashMap<(usize, usize), Option<MatchScore>>,
) {
    println!("\nTournament results (p1 win %, p2 win %, tie %):\n");
    print!(" {:19} |", "p1 ↓           p2 →");
    for j in (0..names.len()).rev() {
        print!(" {:19} |", names[j]);
    }
    println!();
    for i in 0..names.len() {
        for _ in 0..names.len() - i + 1 {
            print!("---------------------|");
        }
        println!();
        print!(" {:19} |", names[i]);
        for j in (0..names.len()).rev() {
            if i >= j {
                print!("    ");
            } else if let Some(Some(score)) = match_results.get(&(i, j)) {
                print!("{}", score_cell(score));
            } else {
                print!(" {:19} |", "N/A");
            }
        }
        println!();
    }
    println!("---------------------|");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut registry = AgentRegistry::with_builtins();
    for path in &args.agent_config {
        registry.register_process(PlayerConfig::load(path)?);
    }

    match args.command {
        Command::Play {
            x,
            o,
            max_illegal_attempts,
        } => play_single_game(&registry, &mut rng, [x, o], max_illegal_attempts),
        Command::Tournament {
            agents,
            num_games,
            stop_on_illegal_move,
            record_games_to_directory,
            max_illegal_attempts,
        } => {
            if let Some(unknown) = agents.iter().find(|name| !registry.contains(name)) {
                anyhow::bail!(
                    "Unknown agent '{}', registered agents are: {}",
                    unknown,
                    registry.names().join(", ")
                );
            }

            let mut recorder = if let Some(dir_path) = record_games_to_directory {
                Some(Recorder::new(dir_path)?)
            } else {
                None
            };

            let matchups: Vec<(usize, usize)> = (0..agents.len()).tuple_combinations().collect();

            let mut match_results: HashMap<(usize, usize), Option<MatchScore>> = HashMap::new();
            for (i1, i2) in matchups {
                let match_score = play_matchup(
                    [agents[i1].as_str(), agents[i2].as_str()],
                    &registry,
                    num_games,
                    &mut rng,
                    stop_on_illegal_move,
                    max_illegal_attempts,
                    &mut recorder,
                )?;

                match_results.insert((i1, i2), Some(match_score));
            }

            if agents.len() > 2 {
                print_tournament_results(&agents, &match_results);
            }
            Ok(())
        }
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout is used for the board and the results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
