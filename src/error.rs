use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::TermInt;

#[derive(Debug, Error)]
pub enum SnakeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ViewportTooSmall(#[from] ViewportTooSmall),

    #[error("terminal not usable: {reason}")]
    MissingTerminal { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "terminal is {actual_cols} columns x {actual_rows} rows, \
     need at least {required_cols} columns x {required_rows} rows"
)]
pub struct ViewportTooSmall {
    pub required_rows: TermInt,
    pub required_cols: TermInt,
    pub actual_rows: TermInt,
    pub actual_cols: TermInt,
}

impl ViewportTooSmall {
    /// What the player sees before the session aborts.
    pub fn message_lines(&self) -> Vec<String> {
        vec![
            "The terminal window is too small for Snake.".to_string(),
            format!("Minimum size: {} columns x {} rows.", self.required_cols, self.required_rows),
            format!("Current size: {} columns x {} rows.", self.actual_cols, self.actual_rows),
            String::new(),
            "Enlarge the terminal and press any key to exit.".to_string(),
        ]
    }
}
