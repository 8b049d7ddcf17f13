pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod select;
pub mod tui;
pub mod util;
