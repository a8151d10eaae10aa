mod assist;
pub(crate) mod error;
pub(crate) mod parser;
