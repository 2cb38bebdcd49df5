//! chess-desk: manage UCI engine configurations and solve puzzles in the terminal.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use desk::commands::{self, engines, puzzles};
use desk::config::Config;
use desk::session_store;
use engine_registry::EngineForm;
use puzzle_board::LichessDatabase;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess-desk", version, about = "Manage UCI engines and solve chess puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Engine registry
    #[command(subcommand)]
    Engines(EnginesCommand),
    /// Puzzle board
    #[command(subcommand)]
    Puzzles(PuzzlesCommand),
}

#[derive(Subcommand, Debug)]
enum EnginesCommand {
    /// List engines and whether their binaries exist
    List,
    /// Add an engine
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        path: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        elo: Option<u32>,
    },
    /// Edit the engine named NAME
    Edit {
        name: String,
        #[arg(long = "name")]
        new_name: Option<String>,
        #[arg(long)]
        path: Option<String>,
        #[arg(long, conflicts_with = "clear_image")]
        image: Option<String>,
        #[arg(long, conflicts_with = "clear_elo")]
        elo: Option<u32>,
        /// Remove the engine's image
        #[arg(long)]
        clear_image: bool,
        /// Remove the engine's rating
        #[arg(long)]
        clear_elo: bool,
    },
    /// Remove every engine named NAME
    Remove {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Open the engines folder in the file browser
    OpenFolder,
}

#[derive(Subcommand, Debug)]
enum PuzzlesCommand {
    /// Solve puzzles interactively
    Play {
        /// Lichess puzzle CSV to draw new puzzles from
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show the saved puzzle list
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    info!(data_dir = %config.data_dir.display(), "Config loaded");

    match cli.command {
        Command::Engines(cmd) => match cmd {
            EnginesCommand::List => engines::list(&config, &mut io::stdout()).await?,
            EnginesCommand::Add {
                name,
                path,
                image,
                elo,
            } => engines::add(
                &config,
                EngineForm {
                    name,
                    path,
                    image,
                    elo,
                },
            )?,
            EnginesCommand::Edit {
                name,
                new_name,
                path,
                image,
                elo,
                clear_image,
                clear_elo,
            } => engines::edit(
                &config,
                &name,
                engines::EngineEdit {
                    name: new_name,
                    path,
                    image,
                    elo,
                    clear_image,
                    clear_elo,
                },
            )?,
            EnginesCommand::Remove { name, yes } => {
                let prompt = format!("Are you sure you want to remove \"{name}\"?");
                if yes || commands::confirm(&prompt, &mut io::stdin().lock(), &mut io::stdout())? {
                    engines::remove(&config, &name)?;
                }
            }
            EnginesCommand::OpenFolder => engines::open_engines_folder(&config).await?,
        },
        Command::Puzzles(cmd) => match cmd {
            PuzzlesCommand::Play { db } => {
                let db = db.unwrap_or_else(|| config.puzzle_db.clone());
                let mut store = session_store::load(&config.session_file())?;
                let generator = LichessDatabase::new(config.min_rating, config.max_rating);
                let mut session =
                    puzzles::restore(&db.display().to_string(), generator, store.get().clone())?;

                puzzles::run(&mut session, &mut store, io::stdin().lock(), &mut io::stdout())?;
            }
            PuzzlesCommand::Status => {
                let store = session_store::load(&config.session_file())?;
                let saved = store.get();
                print!("{}", puzzles::format_puzzles(&saved.puzzles, saved.current_puzzle));
            }
        },
    }

    Ok(())
}
