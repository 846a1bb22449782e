mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use flappy_game::constants::FPS;
use flappy_game::entities::InputAction;
use flappy_game::game::{Control, Game};
use flappy_game::persistence::{default_score_path, FileScoreStore};

const FRAME: Duration = Duration::from_micros(1_000_000 / FPS as u64);

#[derive(Parser)]
#[command(name = "flappy_game")]
#[command(about = "Flap through the pipes in your terminal")]
struct Args {
    /// File holding the best score (default: ~/.flappy_game_score)
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; filter with RUST_LOG (default: info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn to_action(ev: Event) -> Option<InputAction> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char(' ') | KeyCode::Up => Some(InputAction::Jump),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputAction::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputAction::Quit)
            }
            _ => None,
        },
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
            Some(InputAction::PointerActivate)
        }
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-timestep loop: drain input, advance one tick, draw, then sleep
/// off the rest of the frame. Returns when the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game<FileScoreStore, StdRng>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Some(action) = to_action(ev) {
                if game.handle(action) == Control::Quit {
                    return Ok(());
                }
            }
        }

        game.step();
        display::render(out, game.state())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let store = FileScoreStore::new(args.score_file.unwrap_or_else(default_score_path));
    tracing::info!(path = %store.path().display(), "using high score file");
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(store, rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
