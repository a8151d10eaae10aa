use crate::{
    artifacts::collection::{AnalysisSummary, collect, selected_reports},
    error::TomlError,
    structs::toml::RegalyzerToml,
    utils::logging::{create_log_file, log_level},
};
use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};
use std::{fs::read, path::Path};

/// Parse a TOML file at provided path and run the analysis it describes
pub fn parse_toml_file(path: &str) -> Result<AnalysisSummary, TomlError> {
    let buffer_results = read(path);
    let buffer = match buffer_results {
        Ok(results) => results,
        Err(err) => {
            error!("[regalyzer] Could not read TOML file {path}: {err:?}");
            return Err(TomlError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse an already read TOML file
pub fn parse_toml_data(data: &[u8]) -> Result<AnalysisSummary, TomlError> {
    let toml_results = RegalyzerToml::parse_regalyzer_toml(data);
    let config = match toml_results {
        Ok(results) => results,
        Err(_) => {
            return Err(TomlError::BadToml);
        }
    };
    regalyzer_analysis(&config)
}

/// Run every selected report against the image. Succeeds when at least one report ran
pub fn regalyzer_analysis(config: &RegalyzerToml) -> Result<AnalysisSummary, TomlError> {
    setup_logging(config);

    if !Path::new(&config.analysis.image_root).is_dir() {
        error!(
            "[regalyzer] Image root {} is not a directory",
            config.analysis.image_root
        );
        return Err(TomlError::ImageRoot);
    }

    let reports = selected_reports(&config.analysis.reports);
    if reports.is_empty() {
        error!("[regalyzer] No known reports selected");
        return Err(TomlError::NoReports);
    }

    let summary = collect(config, &reports);
    if !summary.success() {
        error!("[regalyzer] None of the selected reports ran");
        return Err(TomlError::NoReports);
    }
    info!(
        "[regalyzer] {} of {} reports ran",
        summary.ran_count(),
        summary.outcomes.len()
    );
    Ok(summary)
}

/// Log to `<output>/regalyzer.log` when an output directory is set, otherwise to the terminal.
/// Only the first logger installed in a process is kept
fn setup_logging(config: &RegalyzerToml) {
    if let Ok((log_file, level)) = create_log_file(&config.output) {
        let _ = WriteLogger::init(level, Config::default(), log_file);
        return;
    }
    let _ = TermLogger::init(
        log_level(&config.output.logging),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

#[cfg(test)]
mod tests {
    use super::{parse_toml_data, parse_toml_file, regalyzer_analysis};
    use crate::{
        error::TomlError,
        structs::toml::{Analysis, Output, RegalyzerToml},
    };
    use std::path::PathBuf;

    #[test]
    fn test_parse_toml_file() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/regalyzer.toml");
        let summary = parse_toml_file(&test_location.display().to_string()).unwrap();
        assert_eq!(summary.outcomes.len(), 2);
        assert!(summary.success());
    }

    #[test]
    fn test_parse_toml_file_missing() {
        assert_eq!(
            parse_toml_file("/nonexistent/regalyzer.toml").unwrap_err(),
            TomlError::NoFile
        );
    }

    #[test]
    fn test_parse_toml_data_bad() {
        assert_eq!(
            parse_toml_data(b"[analysis]\nreports = 1").unwrap_err(),
            TomlError::BadToml
        );
    }

    #[test]
    fn test_regalyzer_analysis_errors() {
        let mut config = RegalyzerToml {
            output: Output::default(),
            analysis: Analysis {
                image_root: String::from("/nonexistent/image"),
                reports: None,
                hashes: None,
            },
        };
        assert_eq!(
            regalyzer_analysis(&config).unwrap_err(),
            TomlError::ImageRoot
        );

        config.analysis.image_root = env!("CARGO_MANIFEST_DIR").to_string();
        config.analysis.reports = Some(vec![String::from("bogus")]);
        assert_eq!(
            regalyzer_analysis(&config).unwrap_err(),
            TomlError::NoReports
        );

        // A directory without any hives runs nothing
        config.analysis.reports = None;
        assert_eq!(
            regalyzer_analysis(&config).unwrap_err(),
            TomlError::NoReports
        );
    }
}
