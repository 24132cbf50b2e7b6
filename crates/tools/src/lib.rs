pub mod config_file;
pub mod logging;
pub mod report;
