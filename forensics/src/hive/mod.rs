pub mod controlset;
pub mod error;
pub mod helper;
pub mod locate;
pub mod memory;
#[cfg(feature = "raw-hives")]
pub mod raw;
pub mod store;
