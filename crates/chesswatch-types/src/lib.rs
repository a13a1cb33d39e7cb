//! Shared domain types for the chesswatch workspace.

pub mod config;
pub mod game;
pub mod player;

mod errors;

pub use errors::{ChesswatchError, Result};
