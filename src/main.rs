use clap::Parser;
use env_logger::Env;
use log::{error, info};
use serde_json::{json, Error as JSONError};
use thiserror::Error;

use maze_search::config::SearchConfig;
use maze_search::error::SearchError;
use maze_search::heuristic::{Distance, Estimate};
use maze_search::maze::{Grid, LoadError, Maze};
use maze_search::path::validate;
use maze_search::search::{Search, Strategy};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Maze file: '%' walls, 'P' start, '.' objectives.
    maze: String,

    /// Search strategy to use.
    #[arg(short, long, value_enum,
          default_value_t = Strategy::InformedShrinkingGoal)]
    strategy: Strategy,

    /// Distance used by the informed strategies. Overrides the config file.
    #[arg(long, value_enum)]
    distance: Option<Distance>,

    /// How distances to the objectives are combined. Overrides the config file.
    #[arg(long, value_enum)]
    estimate: Option<Estimate>,

    /// JSON file with search settings.
    #[arg(long)]
    config_file: Option<String>,

    /// Print the maze with the path drawn on it.
    #[arg(long)]
    show: bool,

    /// Print the solution as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Check the returned path against the maze.
    #[arg(long)]
    verify: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed reading the config file ({0})")]
    ReadError(#[from] std::io::Error),
    #[error("Failed parsing the config file ({0})")]
    ParseError(#[from] JSONError),
    #[error("Failed loading the maze ({0})")]
    LoadError(#[from] LoadError),
    #[error("Search failed ({0})")]
    SearchError(#[from] SearchError),
}

fn load_config(cli: &Cli) -> Result<SearchConfig, CliError> {
    let mut config = match &cli.config_file {
        Some(filename) => {
            info!("Loading search config from {filename}");
            SearchConfig::from_json(&std::fs::read_to_string(filename)?)?
        },
        None => SearchConfig::default(),
    };
    if let Some(distance) = cli.distance {
        config.distance = distance;
    }
    if let Some(estimate) = cli.estimate {
        config.estimate = estimate;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let maze = Maze::from_file(&cli.maze)?;
    info!("Loaded {rows}x{cols} maze with {count} objective(s)",
          rows = maze.rows(), cols = maze.cols(),
          count = maze.objectives().len());

    let solution = Search::new(&maze, config).run(cli.strategy)?;
    if cli.verify {
        validate(&maze, &solution.path)?;
        info!("Path verified.");
    }

    if cli.json {
        let output = json!({
            "strategy": cli.strategy,
            "path": solution.path,
            "stats": solution.stats,
        });
        println!("{output}");
    } else if solution.found() {
        println!("Path length: {}", solution.path.len());
        println!("Legs: {}", solution.stats.legs);
        println!("States explored: {}", solution.stats.expanded);
    } else {
        println!("No path found.");
        println!("States explored: {}", solution.stats.expanded);
    }
    if cli.show {
        println!("{}", maze.render(&solution.path));
    }
    Ok(())
}

fn main() {
    // Load .env file
    dotenvy::dotenv().ok();
    // Init logger with default value of info
    // This can be overriden with RUST_LOG env var
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        error!("Error while searching the maze with underlying error:");
        error!("  {}", err);
        std::process::exit(1);
    }
}
