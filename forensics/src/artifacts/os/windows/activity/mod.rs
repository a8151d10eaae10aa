mod environment;
pub(crate) mod error;
mod mru;
mod opensave;
pub(crate) mod parser;
mod rdp;
