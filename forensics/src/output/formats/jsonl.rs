use crate::{
    artifacts::collection::ReportData,
    output::{error::FormatError, local::local_output},
};
use log::{error, info};
use serde_json::Value;

/// Output one line per record. Object reports are a single line
pub(crate) fn jsonl_format(report: &ReportData, directory: &str) -> Result<(), FormatError> {
    let records: Vec<&Value> = match &report.records {
        Value::Array(entries) => entries.iter().collect(),
        other => vec![other],
    };

    let mut report_data = Vec::new();
    for record in records {
        let line_result = serde_json::to_writer(&mut report_data, record);
        match line_result {
            Ok(_) => report_data.push(b'\n'),
            Err(err) => {
                error!("[output] Failed to serialize {} record: {err:?}", report.name);
                return Err(FormatError::Serialize);
            }
        }
    }

    let output_result = local_output(&report_data, directory, &report.name, "jsonl");
    match output_result {
        Ok(_) => info!("[output] {} jsonl output success", report.name),
        Err(err) => {
            error!("[output] Failed to output {} jsonl: {err:?}", report.name);
            return Err(FormatError::Output);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::jsonl_format;
    use crate::artifacts::collection::ReportData;
    use serde_json::json;
    use std::{fs::read_to_string, path::PathBuf};

    #[test]
    fn test_jsonl_format() {
        let mut directory = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        directory.push("tmp/jsonl_format");
        let directory = directory.display().to_string();

        let report = ReportData {
            name: String::from("accounts"),
            record_count: 2,
            records: json!([{"relative_id": 500}, {"relative_id": 1001}]),
            diagnostics: Vec::new(),
        };
        jsonl_format(&report, &directory).unwrap();

        let written = read_to_string(format!("{directory}/accounts.jsonl")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec![r#"{"relative_id":500}"#, r#"{"relative_id":1001}"#]);
    }

    #[test]
    fn test_jsonl_object() {
        let mut directory = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        directory.push("tmp/jsonl_object");
        let directory = directory.display().to_string();

        let report = ReportData {
            name: String::from("system"),
            record_count: 1,
            records: json!({"hostname": "DESKTOP-1"}),
            diagnostics: Vec::new(),
        };
        jsonl_format(&report, &directory).unwrap();
        let written = read_to_string(format!("{directory}/system.jsonl")).unwrap();
        assert_eq!(written.lines().count(), 1);
    }
}
