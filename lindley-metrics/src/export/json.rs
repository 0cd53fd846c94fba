//! JSON export for sweep reports

use crate::error::MetricsError;
use crate::export::{MetricsExporter, SweepReport};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON exporter for sweep reports
#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn new(path: &Path, pretty: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty,
        }
    }

    pub fn to_json_string(&self, report: &SweepReport) -> Result<String, MetricsError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }?;
        Ok(json)
    }
}

impl MetricsExporter for JsonExporter {
    fn export(&self, report: &SweepReport) -> Result<(), MetricsError> {
        let json = self.to_json_string(report)?;

        let mut file = File::create(&self.path).map_err(|e| {
            MetricsError::Export(format!("Failed to create {}: {e}", self.path.display()))
        })?;
        file.write_all(json.as_bytes())?;

        debug!(path = %self.path.display(), rows = report.rows.len(), "Exported sweep report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::ComparisonRow;
    use crate::sweep::SweepConfig;
    use lindley_core::SummaryMetrics;

    fn report() -> SweepReport {
        let simulated = SummaryMetrics {
            w: 2.0,
            l: 1.0,
            wq: 1.0,
            lq: 0.5,
            rho_empirical: 0.49,
        };
        SweepReport::new(
            SweepConfig::default().with_rhos(vec![0.5]),
            vec![ComparisonRow::new(0.5, 1.0, simulated)],
        )
    }

    #[test]
    fn test_json_export_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        let report = report();

        JsonExporter::new(&path, true).export(&report).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("rho_empirical"));
        let back: SweepReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(back, report);
        assert!((back.max_rho_error() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_compact_json_has_no_newlines() {
        let exporter = JsonExporter::new(Path::new("unused.json"), false);
        let json = exporter.to_json_string(&report()).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sweep.json");
        let err = JsonExporter::new(&path, false).export(&report()).unwrap_err();
        assert!(matches!(err, MetricsError::Export(_)));
    }
}
