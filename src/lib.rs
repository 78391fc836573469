//! Terminal snake: a pure game-state engine and the session loop that drives it.

pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod snake;
pub mod term;

pub type TermInt = u16;

/// Grid position as `(row, col)`.
pub type Coords = (TermInt, TermInt);
