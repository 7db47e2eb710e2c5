//! Terminal runner (reference driver).
//!
//! The engine only ever talks to a display sink and a clock; this binary is
//! the surrounding collaborator layer: it wires those capabilities to a
//! real terminal with crossterm, maps keys to commands, and owns the poll
//! loop. Nothing here is required to embed the engine elsewhere.

use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, queue, style::Print, terminal};

use matrix_tetris::core::Game;
use matrix_tetris::types::{Command, DisplaySink};

const ROWS: usize = 23;
const COLS: usize = 12;
const LEVEL: u8 = 1;

/// Draws each engine cell as a two-column block on stdout.
struct TermSink {
    stdout: io::Stdout,
}

impl DisplaySink for TermSink {
    fn set_cell(&mut self, x: usize, y: usize, on: bool) {
        let glyph = if on { "██" } else { "  " };
        let _ = queue!(
            self.stdout,
            cursor::MoveTo((x * 2) as u16, y as u16),
            Print(glyph)
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut stdout = io::stdout();
    enter(&mut stdout)?;

    let result = run();

    // Always try to restore terminal state.
    let _ = exit(&mut stdout);

    let score = result?;
    println!("final score: {score}");
    Ok(())
}

fn enter(stdout: &mut io::Stdout) -> Result<()> {
    terminal::enable_raw_mode()?;
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    )?;
    stdout.flush()?;
    Ok(())
}

fn exit(stdout: &mut io::Stdout) -> Result<()> {
    queue!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn run() -> Result<u32> {
    let sink = TermSink {
        stdout: io::stdout(),
    };

    let start = Instant::now();
    let clock = move || start.elapsed().as_micros() as u64;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_micros())
        .unwrap_or(1);

    let mut game = Game::new(sink, clock, ROWS, COLS, LEVEL, seed)?;

    loop {
        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        break;
                    }
                    if let Some(command) = map_key(key.code) {
                        game.apply(command);
                    }
                }
            }
        }

        if game.poll() {
            draw_score(game.score())?;
        }
        if game.game_over() {
            break;
        }
    }

    Ok(game.score())
}

fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Command::MoveRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Command::Rotate),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char(' ') => Some(Command::HardDrop),
        _ => None,
    }
}

fn draw_score(score: u32) -> Result<()> {
    let mut stdout = io::stdout();
    queue!(
        stdout,
        cursor::MoveTo(0, ROWS as u16),
        Print(format!("score: {score}"))
    )?;
    stdout.flush()?;
    Ok(())
}
