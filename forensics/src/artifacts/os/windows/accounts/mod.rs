pub mod error;
pub mod hashes;
mod layout;
pub(crate) mod parser;
mod users;
