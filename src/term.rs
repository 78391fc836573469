use std::io::{stdout, IsTerminal, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use log::debug;

use crate::config::Config;
use crate::engine::{GameState, Status};
use crate::error::{Result, SnakeError, ViewportTooSmall};
use crate::game::{Key, Keyboard, Screen};
use crate::snake::Direction::*;
use crate::{Coords, TermInt};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Owns stdout while a session runs. Anything drawn outside the visible
/// area is dropped.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    /// Fails when stdout is not an interactive terminal crossterm can drive.
    pub fn new() -> Result<Self> {
        let stdout = stdout();
        if !stdout.is_terminal() {
            return Err(SnakeError::MissingTerminal { reason: "standard output is not a terminal".to_string() });
        }

        let (width, height) = terminal::size()
            .map_err(|err| SnakeError::MissingTerminal { reason: format!("cannot read terminal size: {}", err) })?;
        Ok(TermManager { width, height, stdout })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn refresh_size(&mut self) -> Result<()> {
        let (width, height) = terminal::size()?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn print_at(&mut self, (row, col): Coords, ch: char) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Ok(());
        }

        queue!(self.stdout, cursor::MoveTo(col, row), style::Print(ch))?;
        Ok(())
    }

    /// Prints `text` from `(row, col)`, cut short one column before the right
    /// edge so the cursor never wraps.
    fn print_str_at(&mut self, (row, col): Coords, text: &str) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Ok(());
        }

        let room = (self.width - col).saturating_sub(1) as usize;
        let trimmed: String = text.chars().take(room).collect();
        queue!(self.stdout, cursor::MoveTo(col, row), style::Print(trimmed))?;
        Ok(())
    }

    fn draw_borders(&mut self, config: &Config) -> Result<()> {
        let (height, width) = (config.height(), config.width());
        let (end_y, end_x) = (height - 1, width - 1);

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((0, x), ch)?;
            self.print_at((end_y, x), ch)?;
        }

        for y in 1..end_y {
            self.print_at((y, 0), '|')?;
            self.print_at((y, end_x), '|')?;
        }

        Ok(())
    }

    fn draw_snake(&mut self, state: &GameState, dead: bool) -> Result<()> {
        let head_char = state.direction().head_char();

        for (i, &pos) in state.snake().body().iter().enumerate() {
            let ch = match (dead, i) {
                (true, _) => DEAD_SNAKE_CHAR,
                (false, 0) => head_char,
                _ => SNAKE_BODY_CHAR,
            };
            self.print_at(pos, ch)?;
        }

        Ok(())
    }

    fn draw_status(&mut self, state: &GameState) -> Result<()> {
        let row = state.config().height().min(self.height.saturating_sub(1));
        let message = format!("Score: {}  (q = quit)", state.score());

        queue!(self.stdout, cursor::MoveTo(0, row), terminal::Clear(ClearType::CurrentLine))?;
        self.print_str_at((row, 0), &message)
    }

    /// Centred box of text on top of whatever is on screen.
    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let top = (self.height / 2).saturating_sub(msg_height / 2);
        let left = (self.width / 2).saturating_sub(msg_width / 2);

        // Blank padding rows above and below the text
        let blank = " ".repeat(msg_width as usize);
        self.print_str_at((top, left), &blank)?;
        self.print_str_at((top + msg_height - 1, left), &blank)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.print_str_at((top + i as TermInt + 1, left), &padded_line)?;
        }

        Ok(())
    }
}

impl Screen for TermManager {
    fn viewport(&mut self) -> Result<(TermInt, TermInt)> {
        self.refresh_size()?;
        Ok((self.height, self.width))
    }

    fn render(&mut self, state: &GameState) -> Result<()> {
        self.refresh_size()?;
        self.clear()?;
        self.draw_borders(state.config())?;
        self.draw_snake(state, false)?;

        if let Some(food) = state.food() {
            self.print_at(food, FOOD_CHAR)?;
        }

        self.draw_status(state)?;
        self.flush()
    }

    fn show_game_over(&mut self, state: &GameState) -> Result<()> {
        let won = state.status() == Status::Won;
        if !won {
            self.draw_snake(state, true)?;
        }

        let score = format!("Score: {}", state.score());
        self.show_message(&[
            if won {"You won!"} else {"Game over!"},
            score.as_str(),
            "",
            "Press r to play again,",
            "or q to quit."
        ])?;
        self.flush()
    }

    fn show_too_small(&mut self, err: &ViewportTooSmall) -> Result<()> {
        self.clear()?;

        for (row, line) in err.message_lines().iter().enumerate() {
            self.print_str_at((row as TermInt, 0), line)?;
        }

        self.flush()
    }
}

impl Keyboard for TermManager {
    fn poll_key(&mut self) -> Result<Option<Key>> {
        let mut keys = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                keys.extend(map_key(&ev));
            }
        }

        if keys.len() > 1 {
            debug!("collapsing {} queued keys", keys.len());
        }
        Ok(collapse(keys))
    }

    fn wait_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(ev) = read()? {
                if let Some(key) = map_key(&ev) {
                    return Ok(key);
                }
            }
        }
    }
}

/// Stdout needs a real terminal; tells the player what to try instead.
pub fn remediation_hint() -> &'static str {
    if cfg!(windows) {
        "Run the game from Windows Terminal or a console window, not from a redirected or piped shell."
    } else {
        "Run the game from an interactive terminal (not a pipe or redirect) and check that TERM is set."
    }
}

/// Only key presses count; releases and auto-repeats are ignored.
pub fn map_key(ev: &KeyEvent) -> Option<Key> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    let key = match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') => Key::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Key::Restart,
        KeyCode::Char('w') | KeyCode::Up => Key::Turn(Up),
        KeyCode::Char('a') | KeyCode::Left => Key::Turn(Left),
        KeyCode::Char('s') | KeyCode::Down => Key::Turn(Down),
        KeyCode::Char('d') | KeyCode::Right => Key::Turn(Right),
        _ => Key::Other,
    };
    Some(key)
}

/// Reduces everything queued since the last tick to one key: a quit anywhere
/// in the queue wins, otherwise the most recent key does.
fn collapse(keys: Vec<Key>) -> Option<Key> {
    if keys.contains(&Key::Quit) {
        return Some(Key::Quit);
    }

    keys.into_iter().last()
}
