//! Coin Dash entry point
//!
//! Sets up logging and the terminal, then runs one session.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Parser;
use crossterm::terminal;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use coin_dash::platform::{ConsoleSink, TerminalGuard, spawn_input_thread};
use coin_dash::renderer::TerminalRenderer;
use coin_dash::{Config, Session, SessionError};

/// Collect every coin, dodge the enemies.
#[derive(Debug, Parser)]
#[command(name = "coin-dash", version)]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for the initial layout and random walkers
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here instead of stderr (stderr would draw over the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(err) => eprintln!("Cannot open log file {}: {err}", path.display()),
        }
    }
    builder.init();
}

fn main() -> Result<(), SessionError> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref());

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Coin Dash starting (seed {seed})");

    let mut sink = ConsoleSink::default();
    {
        let mut stdout = io::stdout();
        let _guard = TerminalGuard::enter(&mut stdout).map_err(SessionError::Terminal)?;
        let (cols, rows) = terminal::size().map_err(SessionError::Terminal)?;
        let mut renderer = TerminalRenderer::new(BufWriter::new(stdout), &config, cols, rows);

        let (tx, rx) = mpsc::channel();
        spawn_input_thread(tx).map_err(SessionError::Terminal)?;

        let session = Session::new(&config, Pcg32::seed_from_u64(seed), rx);
        session.run(&mut renderer, &mut sink);
    }

    // Screen is restored; report like the classic end-of-game dialog
    if let Some(message) = sink.message() {
        println!("{message}");
    }
    Ok(())
}
