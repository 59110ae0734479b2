//! Cross-page row selection.
//!
//! Selections are stored per page so they survive navigation, and a bulk
//! "select first N" request may reach one page past the current one.

mod accumulator;
mod map;

pub use accumulator::{SelectOutcome, SelectionAccumulator, SpillOutcome, SpillRequest};
pub use map::SelectionMap;
