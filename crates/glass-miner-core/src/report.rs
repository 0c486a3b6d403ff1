//! Per-run success/failure accounting.

use serde::{Deserialize, Serialize};

/// One file the driver gave up on, with the error that stopped it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileFailure {
    /// Input file name as listed in the directory.
    pub file: String,
    /// Rendered error chain.
    pub error: String,
}

/// Outcome of a batch run. Failures never abort the run, so
/// `attempted == succeeded + failed.len()` always holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, file: impl Into<String>, error: impl Into<String>) {
        self.attempted += 1;
        self.failed.push(FileFailure {
            file: file.into(),
            error: error.into(),
        });
    }

    /// True when at least one file was attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounting_invariant() {
        let mut report = BatchReport::new();
        report.record_success();
        report.record_failure("b.xml", "read error");
        report.record_success();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file, "b.xml");
        assert!(!report.all_failed());
    }

    #[test]
    fn test_all_failed() {
        let mut report = BatchReport::new();
        assert!(!report.all_failed()); // nothing attempted yet

        report.record_failure("a.xml", "boom");
        assert!(report.all_failed());

        report.record_success();
        assert!(!report.all_failed());
    }
}
