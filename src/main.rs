use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use goose_game::compute::TickInput;
use goose_game::config::Config;
use goose_game::display::{self, terminal::TerminalSurface};
use goose_game::highscore::HighscoreStore;
use goose_game::screen::{Command, Flow, Game};

#[derive(Parser, Debug)]
#[command(name = "goose_game", about = "Dodge enemies, catch bonuses, beat the high score")]
struct Cli {
    /// JSON file overriding any of the default settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// High score file (overrides the config)
    #[arg(long)]
    highscore: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Where log output goes; the terminal itself is busy drawing the game
    #[arg(long, default_value = "goose_game.log")]
    log_file: PathBuf,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events:
/// 8 ticks @ 60 FPS ≈ 133 ms, shorter than any OS key-repeat gap.
const HOLD_WINDOW: u64 = 8;

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> TickInput {
    TickInput {
        up: is_held(key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
        down: is_held(key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
        left: is_held(key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
        right: is_held(key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
    }
}

fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Close),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Close),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Esc => Some(Command::Escape),
        _ => None,
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(
    surface: &mut TerminalSurface<W>,
    game: &mut Game<StdRng>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame_time = game.config().tick_delta();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        if let Some(command) = command_for(code, modifiers) {
                            if game.handle(command) == Flow::Exit {
                                return Ok(());
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }

        game.update(&held_input(&key_frame, frame));
        display::render(surface, game.state())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;
    log::info!("Goose Game starting...");

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = cli.highscore {
        config.highscore_file = path;
    }

    let rng = match cli.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let (cols, rows) = terminal::size().context("not running in a terminal")?;
    let mut surface = TerminalSurface::new(BufWriter::new(stdout()), cols, rows, config.viewport);

    // Missing assets are fatal before the screen is taken over.
    let assets = display::load_assets(&mut surface, &config).context("failed to load assets")?;
    let store = HighscoreStore::open(&config.highscore_file);
    log::info!("High score {} from {}", store.best(), config.highscore_file.display());
    let mut game = Game::new(assets, config, store, rng);

    terminal::enable_raw_mode()?;
    let out = surface.writer();
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut surface, &mut game, &rx);

    // Always restore the terminal
    let out = surface.writer();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Goose Game exiting");
    result.context("terminal I/O failed")
}
