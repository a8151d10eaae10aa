use common::report::{Diagnostic, Severity};
use log::{error, info, warn};

/// Collects sub-record problems for one report. Every event is logged as it is recorded
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn new() -> Diagnostics {
        Diagnostics { events: Vec::new() }
    }

    pub(crate) fn info(&mut self, component: &str, message: String) {
        info!("[{component}] {message}");
        self.push(Severity::Info, component, message);
    }

    pub(crate) fn warning(&mut self, component: &str, message: String) {
        warn!("[{component}] {message}");
        self.push(Severity::Warning, component, message);
    }

    pub(crate) fn error(&mut self, component: &str, message: String) {
        error!("[{component}] {message}");
        self.push(Severity::Error, component, message);
    }

    fn push(&mut self, severity: Severity, component: &str, message: String) {
        self.events.push(Diagnostic {
            severity,
            component: component.to_string(),
            message,
        });
    }

    #[cfg(test)]
    pub(crate) fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub(crate) fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::Diagnostics;
    use common::report::Severity;

    #[test]
    fn test_diagnostics() {
        let mut diag = Diagnostics::new();
        diag.warning("usb", String::from("Serial key without timestamp"));
        diag.error("accounts", String::from("F record too short"));

        assert_eq!(diag.events().len(), 2);
        let events = diag.into_events();
        assert_eq!(events[0].severity, Severity::Warning);
        assert_eq!(events[1].component, "accounts");
    }
}
