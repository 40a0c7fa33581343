use std::io::BufRead;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sweeper_core::{
    AgentConfig, Autoplayer, BoardView, CellCount, Coord, Game, GameConfig, GameState,
    QLearningAgent, StepOutcome,
};

mod input;
mod render;

use input::{Command, HELP, parse_command};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Side length of the square grid
    #[arg(long, default_value_t = 10)]
    size: Coord,

    /// Number of bombs to place
    #[arg(long, default_value_t = 10)]
    bombs: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Let the Q-learning agent play instead of reading moves from stdin
    #[arg(long)]
    autoplay: bool,

    /// Pause between agent moves, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Give up autoplay after this many moves
    #[arg(long, default_value_t = 10_000)]
    max_steps: u32,

    /// Print the final board as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use log::LevelFilter as Log;
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        Log::Off => LevelFilter::OFF,
        Log::Error => LevelFilter::ERROR,
        Log::Warn => LevelFilter::WARN,
        Log::Info => LevelFilter::INFO,
        Log::Debug => LevelFilter::DEBUG,
        Log::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let config = GameConfig::new(args.size, args.bombs).context("Invalid game settings")?;
    let mut game = Game::with_seed(config, seed).context("Could not build the grid")?;

    if args.autoplay {
        autoplay(&mut game, seed, &args)?;
    } else {
        play(&mut game)?;
    }

    match game.state() {
        GameState::Won => println!("You won!"),
        GameState::Lost => println!("Game Over!"),
        GameState::InProgress => println!("Game left unfinished."),
    }

    if args.json {
        let view = BoardView::from_game(&game);
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    Ok(())
}

/// Reads moves from stdin until the game ends or the player quits.
fn play(game: &mut Game) -> anyhow::Result<()> {
    println!("{}", render::render(&BoardView::from_game(game)));
    println!("{HELP}");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let event = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Click(event)) => event,
            Err(err) => {
                println!("{err}\n{HELP}");
                continue;
            }
        };

        match game.handle_click(event) {
            Ok(outcome) if outcome.has_update() => {
                println!("{}", render::render(&BoardView::from_game(game)));
            }
            Ok(_) => log::debug!("No change from {:?}", event),
            Err(err) => println!("{err}"),
        }

        if game.is_finished() {
            break;
        }
    }
    Ok(())
}

fn autoplay(game: &mut Game, seed: u64, args: &Args) -> anyhow::Result<()> {
    let agent = QLearningAgent::new(game.config().size(), AgentConfig::default(), seed);
    let mut player = Autoplayer::new(agent);
    let delay = Duration::from_millis(args.delay_ms);

    for step in 0..args.max_steps {
        let outcome = player.step(game).context("Agent made an invalid move")?;
        if let StepOutcome::Finished(_) = outcome {
            break;
        }

        log::info!("step {}: {:?}", step, outcome);
        println!("{}\n", render::render(&BoardView::from_game(game)));
        if !game.is_finished() {
            thread::sleep(delay);
        }
    }
    Ok(())
}
