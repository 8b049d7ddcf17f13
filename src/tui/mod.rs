pub mod app;
pub mod input;
pub mod render;
pub mod theme;

pub use app::{App, Outcome, run};
