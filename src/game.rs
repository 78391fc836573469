use std::thread::sleep;

use log::{info, warn};

use crate::config::Config;
use crate::engine::{GameState, Status};
use crate::error::{Result, ViewportTooSmall};
use crate::food::FoodPicker;
use crate::snake::Direction;
use crate::TermInt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Turn(Direction),
    Quit,
    Restart,
    Other,
}

/// Drawing side of the terminal.
pub trait Screen {
    /// Current terminal size as `(rows, cols)`.
    fn viewport(&mut self) -> Result<(TermInt, TermInt)>;
    fn render(&mut self, state: &GameState) -> Result<()>;
    fn show_game_over(&mut self, state: &GameState) -> Result<()>;
    fn show_too_small(&mut self, err: &ViewportTooSmall) -> Result<()>;
}

/// Input side of the terminal.
pub trait Keyboard {
    /// Never blocks. At most one key comes back per call.
    fn poll_key(&mut self) -> Result<Option<Key>>;
    fn wait_key(&mut self) -> Result<Key>;
}

/// How a round ended, as reported back from [`SnakeGame::run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub score: u32,
    /// `Running` when the player quit mid-round.
    pub status: Status,
}

pub fn ensure_fits(required: (TermInt, TermInt), actual: (TermInt, TermInt)) -> std::result::Result<(), ViewportTooSmall> {
    let ((required_rows, required_cols), (actual_rows, actual_cols)) = (required, actual);

    if actual_rows >= required_rows && actual_cols >= required_cols {
        Ok(())
    } else {
        Err(ViewportTooSmall { required_rows, required_cols, actual_rows, actual_cols })
    }
}

pub struct SnakeGame<T, P> {
    config: Config,
    term: T,
    picker: P,
}

impl<T: Screen + Keyboard, P: FoodPicker> SnakeGame<T, P> {
    pub fn new(config: Config, term: T, picker: P) -> Self {
        SnakeGame { config, term, picker }
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.term
    }

    pub fn into_terminal(self) -> T {
        self.term
    }

    /// Plays rounds until the player quits. Each finished or abandoned round
    /// is returned in order.
    pub fn run(&mut self) -> Result<Vec<Round>> {
        let mut rounds = vec![];

        loop {
            self.check_viewport()?;

            let mut state = GameState::initialize(self.config, &mut self.picker);
            info!("round {} started", rounds.len() + 1);
            self.term.render(&state)?;

            let quit = self.play(&mut state)?;
            rounds.push(Round { score: state.score(), status: state.status() });

            if quit {
                info!("quit during round with score {}", state.score());
                return Ok(rounds);
            }

            self.term.show_game_over(&state)?;

            if !self.wait_for_restart()? {
                info!("quit after game over");
                return Ok(rounds);
            }
            info!("restarting");
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn check_viewport(&mut self) -> Result<()> {
        let actual = self.term.viewport()?;

        if let Err(too_small) = ensure_fits(self.config.required_viewport(), actual) {
            warn!("{}", too_small);
            self.term.show_too_small(&too_small)?;
            self.term.wait_key()?;
            return Err(too_small.into());
        }

        Ok(())
    }

    /// Runs ticks until the round is over. Returns true if the player quit.
    fn play(&mut self, state: &mut GameState) -> Result<bool> {
        while !state.is_over() {
            match self.term.poll_key()? {
                Some(Key::Quit) => return Ok(true),
                Some(Key::Turn(dir)) => state.change_direction(dir),
                _ => {}
            }

            state.advance_tick(&mut self.picker);
            self.term.render(state)?;

            sleep(self.config.tick_interval());
        }

        Ok(false)
    }

    fn wait_for_restart(&mut self) -> Result<bool> {
        loop {
            match self.term.wait_key()? {
                Key::Restart => return Ok(true),
                Key::Quit => return Ok(false),
                _ => {}
            }
        }
    }
}
