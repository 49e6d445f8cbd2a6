//! Station configuration web page.
//!
//! The application served on top of the HTTP core: a single form showing the
//! current station settings, and its submission, which persists them.

pub mod assets;
pub mod form;
pub mod handler;
pub mod page;
pub mod store;

pub use handler::ConfigPageHandler;
pub use store::{ConfigStore, StationConfig};
