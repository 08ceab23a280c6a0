use chrono::Utc;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use lane_runner::backend::{CosmeticsSource, HttpBackend, MemoryBackend, RewardBackend};
use lane_runner::config::RunnerConfig;
use lane_runner::core::constants::FRAME_INTERVAL_MS;
use lane_runner::input::handle_game_input;
use lane_runner::loading::AssetGate;
use lane_runner::logging;
use lane_runner::runner::{
    ClaimOutcome, FrameOutcome, InputEffect, NavigationEvent, RunnerSession, SessionPhase,
};
use lane_runner::ui::draw_ui;
use lane_runner::utils::build_info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

struct Options {
    config_path: Option<PathBuf>,
    offline: bool,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let mut config = match &options.config_path {
        Some(path) => match RunnerConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => RunnerConfig::load(),
    };
    if options.offline {
        config.offline = true;
    }

    match logging::init(&config.log_level) {
        Ok(path) => log::info!("{} starting, logging to {}", build_info::version_string(), path.display()),
        Err(e) => eprintln!("Warning: could not open log file: {}", e),
    }

    let (cosmetics, rewards) = connect(&config);
    let mut session = match config.seed {
        Some(seed) => RunnerSession::with_seed(config.rewards.clone(), seed),
        None => RunnerSession::new(config.rewards.clone()),
    };
    let mut gate = AssetGate::spawn(cosmetics, config.loading_grace());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut session, &mut gate, rewards.as_ref());

    session.teardown();
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("terminal error: {}", e);
    }
    result
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        config_path: None,
        offline: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Lane Runner - dodge obstacles across three lanes\n");
                println!("Usage: lane-runner [options]\n");
                println!("Options:");
                println!("  --config <path>  Use a config file other than ~/.lane-runner/config.json");
                println!("  --offline        Play without the rewards server");
                println!("  --version        Show version information");
                println!("  --help           Show this help message");
                println!("\nKeys: ←/a →/d move, Esc settings, r restart, Enter claim, q quit");
                std::process::exit(0);
            }
            "--offline" => options.offline = true,
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'lane-runner --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

/// Pick the backend: the REST API when credentials are configured, the
/// in-process one otherwise.
fn connect(config: &RunnerConfig) -> (Arc<dyn CosmeticsSource>, Arc<dyn RewardBackend>) {
    if config.offline || !config.has_credentials() {
        log::info!("playing offline; rewards are kept in memory");
        let backend = Arc::new(MemoryBackend::new());
        let cosmetics: Arc<dyn CosmeticsSource> = backend.clone();
        let rewards: Arc<dyn RewardBackend> = backend;
        return (cosmetics, rewards);
    }
    log::info!("using rewards server at {}", config.api_base_url);
    let backend = Arc::new(HttpBackend::new(
        &config.api_base_url,
        config.user_id.clone(),
        config.auth_token.clone(),
    ));
    let cosmetics: Arc<dyn CosmeticsSource> = backend.clone();
    let rewards: Arc<dyn RewardBackend> = backend;
    (cosmetics, rewards)
}

fn run(
    terminal: &mut Tui,
    session: &mut RunnerSession,
    gate: &mut AssetGate,
    rewards: &dyn RewardBackend,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_frame = Instant::now();

    loop {
        if let Some(outcome) = gate.poll() {
            session.assets_ready(outcome, Utc::now());
            last_frame = Instant::now();
        }

        let view: &RunnerSession = session;
        terminal.draw(|f| draw_ui(f, view, view.last_claim_error()))?;

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let before = session.phase();
                match handle_game_input(key, session) {
                    InputEffect::ClaimRequested => claim(session, rewards),
                    InputEffect::Navigate(NavigationEvent::ReturnToMenu) => return Ok(()),
                    InputEffect::Navigate(NavigationEvent::RestartRequested) => {
                        last_frame = Instant::now();
                    }
                    InputEffect::Changed => {
                        if resumes_play(before, session.phase()) {
                            last_frame = Instant::now();
                        }
                    }
                    InputEffect::Ignored => {}
                }
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame_interval {
            last_frame = Instant::now();
            if let FrameOutcome::GameOver { .. } = session.pump(elapsed.as_millis() as u64) {
                log::debug!("final score {}", session.player().score);
            }
        }
    }
}

/// The pause should not count as elapsed frame time once play resumes.
fn resumes_play(before: SessionPhase, after: SessionPhase) -> bool {
    before == SessionPhase::Paused && after.is_running()
}

fn claim(session: &mut RunnerSession, rewards: &dyn RewardBackend) {
    match session.claim_reward(rewards, Utc::now()) {
        Ok(ClaimOutcome::Settled(record)) => {
            log::info!("claimed {} coins and {} xp", record.coins_earned, record.xp_earned)
        }
        Ok(ClaimOutcome::AlreadyClaimed) | Ok(ClaimOutcome::NotFinished) => {}
        // Kept on the session and shown in the status bar until a retry works.
        Err(e) => log::warn!("claim failed, can retry: {}", e),
    }
}
