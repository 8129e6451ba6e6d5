//! End-to-end journal tests: capture through the service, persistence across
//! reopen, dashboard assembly and export round-trip.

// Integration tests use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

use anxietyflow::export::{self, DataExport};
use anxietyflow::metrics::PeriodWindow;
use anxietyflow::models::{EntryKind, ExposureResult, Priority};
use anxietyflow::services::{
    EpisodeRequest, IdeaRequest, JournalService, SuccessRequest,
};
use anxietyflow::storage::JournalStore;
use chrono::Utc;
use tempfile::TempDir;

fn service_in(dir: &TempDir) -> JournalService {
    JournalService::new(JournalStore::open(dir.path()).unwrap())
}

fn log_sample_week(service: &mut JournalService) {
    service
        .log_episode(EpisodeRequest {
            situation: "Metro en hora punta".to_string(),
            intensity_before: 8,
            triggers: vec!["multitud".to_string()],
            other_trigger: None,
            distortion: "catastrofizacion".to_string(),
            alternative_thought: "Puedo bajar en la próxima parada".to_string(),
            intensity_after: 4,
            symptoms: vec!["taquicardia".to_string()],
            duration_minutes: Some(15),
        })
        .unwrap();

    service
        .log_success(SuccessRequest {
            situation: "Supermercado solo".to_string(),
            duration_minutes: 20,
            skills: vec!["respiracion".to_string()],
            result: ExposureResult::NoSymptoms,
            learning: "la ansiedad baja sola".to_string(),
            confidence_after: 7,
        })
        .unwrap();

    service
        .log_idea(IdeaRequest {
            title: "Miedo a reuniones".to_string(),
            body: "Si me mareo pensarán que no soy competente".to_string(),
            tags: "trabajo, salud".to_string(),
            suggested_distortion: Some("lectura_mente".to_string()),
            priority: Priority::High,
        })
        .unwrap();
}

#[test]
fn captured_entries_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = service_in(&dir);
        log_sample_week(&mut service);
    }

    let store = JournalStore::open(dir.path()).unwrap();
    assert_eq!(store.entries().len(), 3);
    assert_eq!(store.entries_by_kind(EntryKind::Episode, None).len(), 1);
    assert_eq!(store.entries_by_kind(EntryKind::Success, None).len(), 1);
    assert_eq!(store.entries_by_kind(EntryKind::Idea, None).len(), 1);
}

#[test]
fn dashboard_reflects_recent_captures() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    log_sample_week(&mut service);

    let dashboard = service.dashboard(PeriodWindow::Rolling30Days, Utc::now());
    assert_eq!(dashboard.summary.episode_count, 1);
    assert_eq!(dashboard.summary.exposure_count, 1);
    // One episode from 8 to 4 halves the intensity.
    assert_eq!(dashboard.summary.avg_reduction, 50);
    assert_eq!(dashboard.summary.success_rate, 100);
    assert!(dashboard.summary.resilience_index <= 100);
}

#[test]
fn export_and_import_round_trips_entries() {
    let source = TempDir::new().unwrap();
    let mut service = service_in(&source);
    log_sample_week(&mut service);

    let out = TempDir::new().unwrap();
    let dump = DataExport::new(
        service.store().entries().to_vec(),
        service.store().settings().clone(),
        Utc::now(),
    );
    let path = export::write_data(out.path(), &dump).unwrap();

    // Import into a fresh journal.
    let target = TempDir::new().unwrap();
    let mut restored = service_in(&target);
    let read_back = export::read_data(&path).unwrap();
    restored
        .store_mut()
        .replace_entries(read_back.entries)
        .unwrap();

    assert_eq!(restored.store().entries(), service.store().entries());
}

#[test]
fn report_uses_current_window_metrics() {
    let dir = TempDir::new().unwrap();
    let mut service = service_in(&dir);
    log_sample_week(&mut service);

    let dashboard = service.dashboard(PeriodWindow::Rolling30Days, Utc::now());
    let out = TempDir::new().unwrap();
    let path = export::write_report(out.path(), &dashboard.summary, Utc::now()).unwrap();

    let report = std::fs::read_to_string(path).unwrap();
    assert!(report.contains("INFORME DE PROGRESO - ANXIETYFLOW"));
    assert!(report.contains("Episodios registrados: 1"));
    assert!(report.contains("Tasa de éxito: 100%"));
}

#[test]
fn wipe_clears_journal_and_persists() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = service_in(&dir);
        log_sample_week(&mut service);
        service.store_mut().wipe().unwrap();
    }

    let store = JournalStore::open(dir.path()).unwrap();
    assert!(store.entries().is_empty());
    assert!(store.settings().auto_save);
}
