use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use classic_snake::config::{CLASSIC_PALETTE, ConfigOverrides, MAX_INPUT_POLL_MS, load_config};
use classic_snake::error::AppError;
use classic_snake::game::GameState;
use classic_snake::input::poll_input;
use classic_snake::renderer;
use classic_snake::session::Session;
use classic_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use clap::Parser;
use env_logger::{Env, Target};
use log::{error, info};

#[derive(Debug, Parser)]
#[command(name = "classic-snake", version, about = "Classic grid snake in the terminal")]
struct Cli {
    /// JSON config file. Without it the per-user config file is used when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Playable width in coordinate units.
    #[arg(long)]
    width: Option<u16>,

    /// Playable height in coordinate units.
    #[arg(long)]
    height: Option<u16>,

    /// Side length of one grid cell; width and height must be multiples of it.
    #[arg(long)]
    cell_size: Option<u16>,

    /// Number of snake segments at the start of each round.
    #[arg(long)]
    initial_length: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file; RUST_LOG sets the filter (default: info).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            initial_length: self.initial_length,
            tick_interval_ms: self.tick_ms,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.log_file.as_deref()) {
        eprintln!("classic-snake: {error}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("classic-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = load_config(cli.config.as_deref())?.with_overrides(&cli.overrides());
    config.validate()?;
    info!("resolved config: {config:?}");

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    let mut session = Session::new(state, Instant::now());
    let max_poll = Duration::from_millis(MAX_INPUT_POLL_MS);

    loop {
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session.state(), &CLASSIC_PALETTE))?;

        let timeout = session.poll_timeout(Instant::now(), max_poll);
        if let Some(input) = poll_input(timeout)? {
            if session.handle_input(input, Instant::now()).is_break() {
                break;
            }
        }

        session.update(Instant::now());
    }

    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<(), AppError> {
    // The game owns the terminal, so stderr logging stays off unless asked for.
    let Some(path) = log_file else {
        env_logger::Builder::from_env(Env::default().default_filter_or("off")).init();
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
