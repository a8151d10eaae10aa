pub(crate) mod error;
mod interfaces;
pub(crate) mod parser;
mod profiles;
