pub mod config_io;
pub mod items_io;
