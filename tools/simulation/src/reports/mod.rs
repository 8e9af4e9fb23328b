//! Report modules for simulation output
//!
//! Plain-text book dumps and depth snapshots.

pub mod book_dump;
pub mod depth;

pub use book_dump::{render_book, render_books, render_trade, StepPrinter};
