pub mod artifacts;
pub mod core;
pub mod error;
pub mod hive;
pub mod structs;

mod output;
mod utils;
