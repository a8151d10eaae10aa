use super::error::UtilsError;
use log::error;
use regex::Regex;

/// Create a compiled Regex
pub(crate) fn create_regex(input: &str) -> Result<Regex, UtilsError> {
    let regex_result = Regex::new(input);
    let regex = match regex_result {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Bad regex {input}, error: {err:?}");
            return Err(UtilsError::Regex);
        }
    };

    Ok(regex)
}
