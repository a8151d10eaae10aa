pub(crate) mod diagnostics;
pub(crate) mod encoding;
pub(crate) mod error;
pub(crate) mod logging;
pub(crate) mod nom_helper;
pub(crate) mod regex_options;
pub(crate) mod strings;
pub(crate) mod time;
