use super::error::UtilsError;
use crate::structs::toml::Output;
use log::{LevelFilter, error};
use std::fs::{File, create_dir_all};

/// Create log output file and logging level based on TOML `Output` configuration
pub(crate) fn create_log_file(output: &Output) -> Result<(File, LevelFilter), UtilsError> {
    let path = match &output.directory {
        Some(result) => result,
        None => return Err(UtilsError::LogFile),
    };
    let result = create_dir_all(path);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[regalyzer] Failed to create logging output directory for {path}. Error: {err:?}");
            return Err(UtilsError::CreateDirectory);
        }
    }

    let output_result = File::create(format!("{path}/regalyzer.log"));
    let log_file = match output_result {
        Ok(result) => result,
        Err(err) => {
            error!("[regalyzer] Failed to create log file at {path}. Error: {err:?}");
            return Err(UtilsError::LogFile);
        }
    };

    Ok((log_file, log_level(&output.logging)))
}

/// Map the configured level name to a filter. Unknown names fall back to warn
pub(crate) fn log_level(logging: &Option<String>) -> LevelFilter {
    if let Some(log_level) = logging {
        match log_level.to_lowercase().as_str() {
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            _ => LevelFilter::Warn,
        }
    } else {
        LevelFilter::Warn
    }
}
