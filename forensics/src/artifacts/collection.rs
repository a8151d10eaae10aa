use super::os::windows::{
    accounts::hashes::{CredentialSource, NoCredentials, PwdumpFile},
    artifacts::{accounts, activity, network, storage, system},
    error::ReportError,
};
use crate::{
    hive::locate::ImageHives, output::output_report, structs::toml::RegalyzerToml,
};
use common::report::Diagnostic;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Reports in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    System,
    Network,
    Storage,
    Accounts,
    Activity,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::System,
        ReportKind::Network,
        ReportKind::Storage,
        ReportKind::Accounts,
        ReportKind::Activity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::System => "system",
            ReportKind::Network => "network",
            ReportKind::Storage => "storage",
            ReportKind::Accounts => "accounts",
            ReportKind::Activity => "activity",
        }
    }

    pub fn from_name(name: &str) -> Option<ReportKind> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Output of one report: serialized records and the problems hit while building them
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub name: String,
    pub record_count: usize,
    pub records: Value,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct ReportOutcome {
    pub kind: ReportKind,
    pub result: Result<ReportData, ReportError>,
}

impl ReportOutcome {
    pub fn ran(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct AnalysisSummary {
    pub outcomes: Vec<ReportOutcome>,
}

impl AnalysisSummary {
    pub fn ran_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.ran()).count()
    }

    /// An analysis succeeds when at least one report ran
    pub fn success(&self) -> bool {
        self.ran_count() > 0
    }
}

/// Reports selected in the config, in execution order. Unknown names are skipped
pub(crate) fn selected_reports(names: &Option<Vec<String>>) -> Vec<ReportKind> {
    let names = match names {
        Some(result) => result,
        None => return ReportKind::ALL.to_vec(),
    };

    for name in names {
        if ReportKind::from_name(name).is_none() {
            warn!("[regalyzer] Unknown report {name}, skipping");
        }
    }
    ReportKind::ALL
        .into_iter()
        .filter(|kind| {
            names
                .iter()
                .any(|name| ReportKind::from_name(name) == Some(*kind))
        })
        .collect()
}

/// Run a single report against an image
pub fn run_report(
    kind: ReportKind,
    hives: &ImageHives,
    credentials: &dyn CredentialSource,
) -> Result<ReportData, ReportError> {
    match kind {
        ReportKind::System => system(hives),
        ReportKind::Network => network(hives),
        ReportKind::Storage => storage(hives),
        ReportKind::Accounts => accounts(hives, credentials),
        ReportKind::Activity => activity(hives),
    }
}

/// Run every selected report and write the ones that ran
pub(crate) fn collect(config: &RegalyzerToml, reports: &[ReportKind]) -> AnalysisSummary {
    let hives = ImageHives::new(Path::new(&config.analysis.image_root));
    let credentials: Box<dyn CredentialSource> = match &config.analysis.hashes {
        Some(path) => Box::new(PwdumpFile::new(Path::new(path))),
        None => Box::new(NoCredentials),
    };

    let mut summary = AnalysisSummary::default();
    for kind in reports {
        let result = run_report(*kind, &hives, credentials.as_ref());
        match &result {
            Ok(report) => {
                info!(
                    "[regalyzer] {} report produced {} records",
                    report.name, report.record_count
                );
                if let Err(err) = output_report(report, &config.output) {
                    error!("[regalyzer] Failed to output {}: {err:?}", report.name);
                }
            }
            Err(err) => warn!("[regalyzer] {} report did not run: {err}", kind.name()),
        }
        summary.outcomes.push(ReportOutcome {
            kind: *kind,
            result,
        });
    }
    summary
}
