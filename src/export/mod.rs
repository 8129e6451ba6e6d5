//! Progress report and raw data export.

use crate::metrics::MetricsSummary;
use crate::models::Entry;
use crate::storage::Settings;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Data-dump format version.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Raw data dump: everything needed to rebuild the journal elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataExport {
    /// Dump format version.
    pub version: String,
    /// When the dump was produced.
    pub export_date: DateTime<Utc>,
    /// The full entry sequence, in store order.
    pub entries: Vec<Entry>,
    /// The settings record.
    pub settings: Settings,
}

impl DataExport {
    /// Builds a dump from the current store contents.
    #[must_use]
    pub fn new(entries: Vec<Entry>, settings: Settings, now: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            export_date: now,
            entries,
            settings,
        }
    }
}

/// Renders the Spanish progress report for a metrics summary.
#[must_use]
pub fn render_report(summary: &MetricsSummary, now: DateTime<Utc>) -> String {
    format!(
        "INFORME DE PROGRESO - ANXIETYFLOW
Fecha: {}

MÉTRICAS PRINCIPALES:
- Índice de Resiliencia: {}/100
- Episodios registrados: {}
- Intensidad media: {:.1}/10
- Reducción media: {}%
- Exposiciones realizadas: {}
- Tasa de éxito: {}%
- Anticipaciones refutadas: {}%

Este informe es generado automáticamente por AnxietyFlow.
No constituye un diagnóstico médico.
",
        now.format("%d/%m/%Y"),
        summary.resilience_index,
        summary.episode_count,
        summary.avg_intensity,
        summary.avg_reduction,
        summary.exposure_count,
        summary.success_rate,
        summary.refuted_rate,
    )
}

/// Default file name for a progress report produced at `now`.
#[must_use]
pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("anxietyflow-report-{}.txt", now.format("%Y-%m-%d"))
}

/// Default file name for a data dump produced at `now`.
#[must_use]
pub fn data_file_name(now: DateTime<Utc>) -> String {
    format!("anxietyflow-data-{}.json", now.format("%Y-%m-%d"))
}

/// Writes the progress report into `dir` and returns the file path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report(
    dir: &Path,
    summary: &MetricsSummary,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = dir.join(report_file_name(now));
    fs::write(&path, render_report(summary, now)).map_err(|e| Error::OperationFailed {
        operation: "write_report".to_string(),
        cause: e.to_string(),
    })?;
    Ok(path)
}

/// Writes the raw data dump into `dir` and returns the file path.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_data(dir: &Path, export: &DataExport) -> Result<PathBuf> {
    let path = dir.join(data_file_name(export.export_date));
    let json = serde_json::to_string_pretty(export).map_err(|e| Error::OperationFailed {
        operation: "serialize_export".to_string(),
        cause: e.to_string(),
    })?;
    fs::write(&path, json).map_err(|e| Error::OperationFailed {
        operation: "write_export".to_string(),
        cause: e.to_string(),
    })?;
    Ok(path)
}

/// Reads a previously written data dump back.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid dump.
pub fn read_data(path: &Path) -> Result<DataExport> {
    let contents = fs::read_to_string(path).map_err(|e| Error::OperationFailed {
        operation: "read_export".to_string(),
        cause: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| Error::OperationFailed {
        operation: "parse_export".to_string(),
        cause: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, EntryPayload, Idea, Priority};
    use tempfile::TempDir;

    fn sample_summary() -> MetricsSummary {
        MetricsSummary {
            resilience_index: 62,
            episode_count: 3,
            avg_intensity: 6.3,
            avg_reduction: 50,
            exposure_count: 5,
            success_rate: 60,
            refuted_rate: 75,
        }
    }

    fn sample_entries() -> Vec<Entry> {
        vec![Entry::now(EntryPayload::Idea(Idea {
            title: "Miedo a reuniones".to_string(),
            body: "creencia".to_string(),
            tags: vec!["trabajo".to_string()],
            suggested_distortion: None,
            priority: Priority::Medium,
        }))]
    }

    #[test]
    fn test_report_contains_all_metrics() {
        let report = render_report(&sample_summary(), Utc::now());
        assert!(report.contains("Índice de Resiliencia: 62/100"));
        assert!(report.contains("Episodios registrados: 3"));
        assert!(report.contains("Intensidad media: 6.3/10"));
        assert!(report.contains("Reducción media: 50%"));
        assert!(report.contains("Exposiciones realizadas: 5"));
        assert!(report.contains("Tasa de éxito: 60%"));
        assert!(report.contains("Anticipaciones refutadas: 75%"));
        assert!(report.contains("No constituye un diagnóstico médico"));
    }

    #[test]
    fn test_file_names_are_dated() {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(report_file_name(now), "anxietyflow-report-2025-06-15.txt");
        assert_eq!(data_file_name(now), "anxietyflow-data-2025-06-15.json");
    }

    #[test]
    fn test_data_dump_roundtrip_preserves_entries() {
        let dir = TempDir::new().unwrap();
        let entries = sample_entries();
        let export = DataExport::new(entries.clone(), Settings::default(), Utc::now());

        let path = write_data(dir.path(), &export).unwrap();
        let back = read_data(&path).unwrap();

        assert_eq!(back.entries, entries);
        assert_eq!(back.settings, Settings::default());
        assert_eq!(back.version, EXPORT_VERSION);
    }

    #[test]
    fn test_write_report_creates_dated_file() {
        let dir = TempDir::new().unwrap();
        let path = write_report(dir.path(), &sample_summary(), Utc::now()).unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap()
            .starts_with("anxietyflow-report-"));
    }

    #[test]
    fn test_read_data_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(read_data(&path).is_err());
    }
}
