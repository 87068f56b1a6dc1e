//! The text notation of formulas and session files
mod command;
mod element;
pub mod error;

pub use command::*;
pub use element::*;
