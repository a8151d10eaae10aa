pub mod report;
pub mod time;
pub mod windows;
