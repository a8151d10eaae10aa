mod error;
mod formats;
mod local;

use crate::{artifacts::collection::ReportData, structs::toml::Output};
use error::FormatError;
use formats::{json::json_format, jsonl::jsonl_format};
use log::warn;

/// Write a report in the configured format. Nothing is written without an output directory
pub(crate) fn output_report(report: &ReportData, output: &Output) -> Result<(), FormatError> {
    let directory = match &output.directory {
        Some(result) => result,
        None => return Ok(()),
    };

    match output.format.to_lowercase().as_str() {
        "jsonl" => jsonl_format(report, directory),
        "json" => json_format(report, directory),
        unknown => {
            warn!("[output] Unknown output format {unknown}, using json");
            json_format(report, directory)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::output_report;
    use crate::{artifacts::collection::ReportData, structs::toml::Output};
    use serde_json::json;
    use std::{fs::read_to_string, path::PathBuf};

    #[test]
    fn test_output_report() {
        let mut directory = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        directory.push("tmp/output_report");
        let output = Output {
            directory: Some(directory.display().to_string()),
            format: String::from("yaml"),
            logging: None,
        };
        let report = ReportData {
            name: String::from("system"),
            record_count: 1,
            records: json!({"hostname": "DESKTOP-1"}),
            diagnostics: Vec::new(),
        };

        output_report(&report, &output).unwrap();
        let written = read_to_string(directory.join("system.json")).unwrap();
        assert!(written.contains("DESKTOP-1"));
    }

    #[test]
    fn test_no_directory() {
        let report = ReportData {
            name: String::from("system"),
            record_count: 0,
            records: json!([]),
            diagnostics: Vec::new(),
        };
        output_report(&report, &Output::default()).unwrap();
    }
}
