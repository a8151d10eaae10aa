use crate::{
    artifacts::collection::ReportData,
    output::{error::FormatError, local::local_output},
};
use log::{error, info};

/// Output the whole report, diagnostics included, as one `json` document
pub(crate) fn json_format(report: &ReportData, directory: &str) -> Result<(), FormatError> {
    let serde_result = serde_json::to_vec_pretty(report);
    let report_data = match serde_result {
        Ok(result) => result,
        Err(err) => {
            error!("[output] Failed to serialize {}: {err:?}", report.name);
            return Err(FormatError::Serialize);
        }
    };

    let output_result = local_output(&report_data, directory, &report.name, "json");
    match output_result {
        Ok(_) => info!("[output] {} json output success", report.name),
        Err(err) => {
            error!("[output] Failed to output {} json: {err:?}", report.name);
            return Err(FormatError::Output);
        }
    }
    Ok(())
}
