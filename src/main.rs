mod display;
mod keyboard;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use star_catcher::arcade::ArcadeWorld;
use star_catcher::collaborators::{InputPoller, Renderer};
use star_catcher::compute::GameSession;
use star_catcher::config::{self, GameConfig, DEFAULT_CONFIG_PATH};
use star_catcher::entities::Vec2;
use star_catcher::error::GameResult;

use display::TerminalRenderer;
use keyboard::KeyboardPoller;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: stderr belongs to the raw-mode terminal while playing.
fn init_logging(config: &GameConfig) -> GameResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

// ── Best-score persistence ────────────────────────────────────────────────────

fn score_path(config: &GameConfig) -> Option<PathBuf> {
    if config.score_file.is_empty() {
        return None;
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Some(PathBuf::from(home).join(&config.score_file))
}

fn load_best_score(config: &GameConfig) -> u32 {
    score_path(config)
        .and_then(|p| std::fs::read_to_string(p).ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_best_score(config: &GameConfig, score: u32) {
    let Some(path) = score_path(config) else {
        return;
    };
    if let Err(e) = std::fs::write(&path, score.to_string()) {
        warn!("could not save best score to {}: {}", path.display(), e);
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive sessions until the player quits.  A frozen session is restarted
/// when `R` is pressed; the best score is persisted on every restart/quit.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    poller: &mut KeyboardPoller,
    config: &GameConfig,
    rng: &mut StdRng,
) -> GameResult<()> {
    let frame_time = Duration::from_secs_f32(config.frame_dt());
    let mut best = load_best_score(config);

    let mut world = ArcadeWorld::new(config);
    let mut session = GameSession::initialize(config, renderer.atlas_mut(), &mut world, rng)?;

    loop {
        let frame_start = Instant::now();

        let input = poller.poll();
        if poller.quit_requested() {
            break;
        }
        if let Some((cols, rows)) = poller.take_resize() {
            renderer.resize(cols, rows);
        }
        if poller.take_restart() && session.is_frozen() {
            if session.score > best {
                best = session.score;
                save_best_score(config, best);
            }
            session.restart(config, renderer.atlas_mut(), &mut world, rng)?;
        }

        session.frame(&input, config.frame_dt(), &mut world, rng);

        renderer.begin_frame()?;
        session.render(renderer)?;
        renderer.draw_controls_hint()?;
        if session.is_frozen() {
            renderer.draw_frozen(session.score, best)?;
        }
        renderer.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    if session.score > best {
        save_best_score(config, session.score);
    }
    info!("quit with score {}", session.score);
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let loaded = config::load_config(DEFAULT_CONFIG_PATH);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => GameConfig::default(),
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("{}; continuing without a log file", e);
    }
    match loaded {
        Ok(Some(_)) => info!("loaded config from {}", DEFAULT_CONFIG_PATH),
        Ok(None) => info!("no {} found; using compiled defaults", DEFAULT_CONFIG_PATH),
        Err(e) => warn!("{}; using defaults", e),
    }

    if let Err(e) = run(&config) {
        error!("{}", e);
        eprintln!("star_catcher: {}", e);
        std::process::exit(1);
    }
}

// ── Terminal session ──────────────────────────────────────────────────────────

/// Raw mode plus alternate screen for as long as it lives.  Dropping it
/// restores the terminal, including on early returns.
struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> GameResult<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            out,
            raw_mode: true,
            keyboard_enhanced: false,
        };
        guard.out.execute(terminal::EnterAlternateScreen)?;
        guard.out.execute(cursor::Hide)?;

        // Ask for key-release events; terminals without the kitty protocol
        // refuse and fall back to the hold window.
        guard.keyboard_enhanced = guard
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

fn run(config: &GameConfig) -> GameResult<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut screen = TerminalGuard::enter(BufWriter::new(stdout()))?;

    // Blocking reads live on their own thread so the frame loop never waits.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let (cols, rows) = terminal::size()?;
    let world = Vec2::new(config.world_width, config.world_height);
    let mut renderer = TerminalRenderer::new(&mut screen.out, cols, rows, world);
    let mut poller = KeyboardPoller::new(rx);
    game_loop(&mut renderer, &mut poller, config, &mut rng)
}
