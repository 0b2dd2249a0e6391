//! Durable play history.
//!
//! `HistoryStore` owns the CSV file mechanics (full rewrite through a
//! temporary file, header row first). `PlayHistory` is the in-memory mirror
//! and enforces adjacent dedup before anything reaches disk.

mod ledger;
mod store;

pub use ledger::*;
pub use store::*;
