mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
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
use rand::{RngCore, SeedableRng};

use pixel_shooter::compute::{MoveIntent, Session, TickInput};
use pixel_shooter::entities::GameStatus;
use pixel_shooter::GameConfig;

#[derive(Parser)]
#[command(name = "pixel_shooter")]
#[command(about = "Arcade shooter in the terminal: survive the waves, shoot everything")]
struct Args {
    /// RNG seed; a random one is chosen (and logged) when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file overriding the default tuning tables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "pixel_shooter.log")]
    log_file: PathBuf,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum LoopExit {
    Quit,
    Restart,
}

/// Result of draining the input channel for one frame.
#[derive(Debug, Default, PartialEq)]
struct Drained {
    fire_pressed: bool,
    exit: Option<LoopExit>,
}

/// Consume every pending event. Non-key events are skipped without ending the
/// drain, so keys queued behind a resize still land this frame.
fn drain_input(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    frame: u64,
    status: GameStatus,
) -> Drained {
    let mut drained = Drained::default();
    while let Ok(event) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            continue;
        };
        match kind {
            KeyEventKind::Press => {
                key_frame.insert(code.clone(), frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        drained.exit = Some(LoopExit::Quit);
                        return drained;
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        drained.exit = Some(LoopExit::Quit);
                        return drained;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if status == GameStatus::GameOver => {
                        drained.exit = Some(LoopExit::Restart);
                        return drained;
                    }
                    KeyCode::Char(' ') => drained.fire_pressed = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                key_frame.insert(code.clone(), frame);
            }
            KeyEventKind::Release => {
                key_frame.remove(&code);
            }
        }
    }
    drained
}

/// Run one session until the player quits or asks for a restart.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and build a single `TickInput` from them, so
/// Space + arrows can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<LoopExit> {
    let frame_budget = Duration::from_secs_f64(session.config().arena.frame_ms() / 1000.0);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let Drained { fire_pressed, exit } = drain_input(rx, &mut key_frame, frame, session.status());
        if let Some(exit) = exit {
            return Ok(exit);
        }

        let input = TickInput {
            movement: MoveIntent {
                up: any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
                down: any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
                left: any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
                right: any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            },
            fire_pressed,
            fire_held: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        session.update(&input, rng);
        display::render(out, &session.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: GameConfig, rng: &mut StdRng) -> Result<()> {
    loop {
        let mut session = Session::new(config.clone()).context("building game session")?;
        log::info!("New session started");
        match game_loop(out, &mut session, rx, rng)? {
            LoopExit::Quit => {
                log::info!("Quit with score {} on wave {}", session.score(), session.wave());
                return Ok(());
            }
            LoopExit::Restart => {
                log::info!("Restart after score {} on wave {}", session.score(), session.wave());
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    log::info!("RNG seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
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

    let result = run(&mut out, &rx, config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
