use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use handflap::app::{exit_status, App, ExitReason};
use handflap::build_info;
use handflap::cli::{self, CliCommand, CliOptions};
use handflap::core::{config::GameConfig, logging};
use handflap::input::TerminalInput;
use handflap::tracking::{spawn_tracker, FrameSource, KeyboardOnly, LandmarkStream, ReportedHands};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Run(options)) => options,
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_line());
            return ExitCode::SUCCESS;
        }
        Ok(CliCommand::Help) => {
            println!("handflap - Flappy Bird controlled by a closed fist\n");
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'handflap --help' for usage.");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&options);
    match &result {
        Ok(ExitReason::Quit) => {}
        Ok(ExitReason::CaptureFailed(e)) => eprintln!("Camera capture failed: {}", e),
        Err(e) => {
            log::error!("Fatal: {}", e);
            eprintln!("Error: {}", e);
        }
    }
    ExitCode::from(exit_status(&result))
}

fn run(options: &CliOptions) -> io::Result<ExitReason> {
    // Logging is best effort; the game runs without it.
    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }
    log::info!("{}", build_info::version_line());

    let mut config = GameConfig::load(options.config_path.as_deref())?;
    options.apply(&mut config);
    config.validate()?;

    let source = open_source(&config)?;
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(config, source, ReportedHands, TerminalInput, rng);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => {
            let _ = terminal.hide_cursor();
            let result = app.run(&mut terminal);
            let _ = terminal.show_cursor();
            result
        }
        Err(e) => Err(e),
    };

    // Restore the terminal whatever happened in the loop.
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    match &result {
        Ok(ExitReason::Quit) => log::info!("Goodbye"),
        Ok(ExitReason::CaptureFailed(e)) => log::error!("Stopping: capture failed: {}", e),
        Err(e) => log::error!("Game loop error: {}", e),
    }
    result
}

/// Pick the frame source: replay file, tracker process, or keyboard only.
fn open_source(config: &GameConfig) -> io::Result<Box<dyn FrameSource>> {
    if let Some(path) = &config.landmark_file {
        log::info!("Replaying landmarks from {}", path.display());
        return Ok(Box::new(LandmarkStream::open(path, config.mirror_landmarks)?));
    }
    if let Some(command) = &config.tracker_command {
        return Ok(Box::new(spawn_tracker(command, config.mirror_landmarks)?));
    }
    log::warn!("No hand tracker configured, keyboard only");
    Ok(Box::new(KeyboardOnly::default()))
}
