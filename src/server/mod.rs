//! Accept loop and connection bookkeeping.

pub mod listener;
pub mod tracker;
