//! TETRS - line-based driver
//!
//! Prints the board each turn and reads one action token per line from
//! stdin (`l r d hd cw ccw hold`, or whatever `settings.toml` binds).
//! There is no gravity here: the piece only moves when you say so.

use std::io::{self, BufRead, Write};

use tetrs_engine::grid::{EMPTY, HIDDEN_ROWS, Row, WIDTH};
use tetrs_engine::mode::{self, GameMode, ModeState};
use tetrs_engine::settings::{Command, DisplaySettings, OutputFormat, Settings};
use tetrs_engine::{Board, Outcome, Shape, Snapshot};

/// Get the tetrs temp directory, creating it if needed
fn tetrs_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("tetrs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn init_logging(settings: &Settings) -> tracing_appender::non_blocking::WorkerGuard {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();
    let tetrs_dir = tetrs_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Log to a file so the board output stays clean
    let file_appender = tracing_appender::rolling::never(&tetrs_dir, &log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&settings.logging.filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "TETRS starting up, session={:08x}, log={}",
        session_id,
        tetrs_dir.join(&log_file).display()
    );
    guard
}

fn main() -> io::Result<()> {
    let settings = Settings::load();
    let _guard = init_logging(&settings);

    // Write a default config on first run so there is something to edit
    if Settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(err) = settings.save() {
            tracing::warn!(%err, "could not write default settings");
        }
    }

    // A seed on the command line beats the one in the settings file
    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                eprintln!("usage: tetrs [SEED]");
                std::process::exit(2);
            }
        },
        None => settings.game.seed,
    };
    let mut board = match seed {
        Some(seed) => Board::with_seed(seed),
        None => Board::new(),
    };
    let goal = ModeState::new(settings.game.mode);
    tracing::info!(?seed, mode = goal.mode.name(), "new game");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut lines = stdin.lock().lines();

    loop {
        print_board(&mut stdout, &board.snapshot(), &settings.display)?;
        if settings.display.format == OutputFormat::Text {
            print_goal(&mut stdout, &goal, board.lines_cleared())?;
        }
        if board.dead() {
            break;
        }
        if goal.is_complete(board.lines_cleared()) {
            tracing::info!(mode = goal.mode.name(), lines = board.lines_cleared(), "goal reached");
            writeln!(stdout, "{} complete in {}!", goal.mode.name(), mode::format_time(goal.elapsed()))?;
            break;
        }

        write!(stdout, "Enter move (l, r, d, hd, cw, ccw, hold, q): ")?;
        stdout.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let input = line.trim();
        let locked_before = board.pieces_locked();

        let outcome = match settings.keys.command(input) {
            Some(Command::Quit) => break,
            Some(Command::Play(action)) => board.act(action),
            None => board.act_token(input),
        };
        match outcome {
            Outcome::Rejected => writeln!(stdout, "Invalid action '{}'", input)?,
            Outcome::Failed => writeln!(stdout, "Invalid movement '{}'", input)?,
            Outcome::Applied => {}
        }

        // Announce line clears and T-spins from this move's lock
        if board.pieces_locked() > locked_before {
            if let Some(report) = board.last_lock() {
                let name = report.clear.name();
                if !name.is_empty() {
                    writeln!(stdout, "{}! +{}", name, report.points)?;
                }
            }
        }
    }

    writeln!(stdout)?;
    writeln!(stdout, "Thanks for playing TETRS!")?;
    writeln!(stdout, "Final Score: {}", board.score())?;
    writeln!(
        stdout,
        "Lines: {} | Pieces: {}",
        board.lines_cleared(),
        board.pieces_locked()
    )?;
    Ok(())
}

fn print_goal(out: &mut impl Write, goal: &ModeState, lines_cleared: u32) -> io::Result<()> {
    let elapsed = goal.elapsed();
    match goal.mode {
        GameMode::Marathon => Ok(()),
        GameMode::Sprint => writeln!(
            out,
            "Sprint: {} lines to go  Time: {}",
            goal.lines_remaining(lines_cleared).unwrap_or(0),
            mode::format_time(elapsed)
        ),
        GameMode::Ultra => writeln!(
            out,
            "Ultra: {} left",
            mode::format_time(goal.time_remaining(elapsed).unwrap_or_default())
        ),
    }
}

fn print_board(out: &mut impl Write, snapshot: &Snapshot, display: &DisplaySettings) -> io::Result<()> {
    if display.format == OutputFormat::Json {
        let json = serde_json::to_string(snapshot).map_err(io::Error::other)?;
        return writeln!(out, "{}", json);
    }

    if display.show_hidden_rows {
        for (row, cells) in snapshot.cells[..HIDDEN_ROWS].iter().enumerate() {
            writeln!(out, "|{}|", render_row(snapshot, row, cells, display.show_ghost))?;
        }
        writeln!(out, "+{}+", "-".repeat(2 * WIDTH))?;
    }
    for (i, cells) in snapshot.visible_rows().iter().enumerate() {
        let row = HIDDEN_ROWS + i;
        writeln!(out, "|{}|", render_row(snapshot, row, cells, display.show_ghost))?;
    }
    writeln!(out, "+{}+", "-".repeat(2 * WIDTH))?;

    let held = snapshot.held.map_or_else(|| "-".to_string(), |s| s.letter().to_string());
    let next: String = snapshot
        .next
        .iter()
        .take(display.preview)
        .map(|s| s.letter())
        .collect();
    writeln!(out, "Score: {}  Lines: {}", snapshot.score, snapshot.lines_cleared)?;
    writeln!(out, "Hold: {}  Next: {}", held, next)?;
    if snapshot.dead {
        writeln!(out, "GAME OVER")?;
    }
    Ok(())
}

fn render_row(snapshot: &Snapshot, row: usize, cells: &Row, show_ghost: bool) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(col, &cell)| match Shape::from_id(cell) {
            Some(shape) => format!("{0}{0}", shape.letter()),
            None if cell == EMPTY && show_ghost && snapshot.shows_ghost(row, col) => "::".into(),
            None => "  ".into(),
        })
        .collect()
}
