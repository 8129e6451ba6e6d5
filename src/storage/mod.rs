//! Durable journal storage.
//!
//! The store owns three independent JSON records in a data directory, keyed
//! by fixed file names: the full entry sequence, the user settings record and
//! the calendar auth record. Persistence is whole-record: every mutation
//! serializes and rewrites the affected file (load-all / save-all semantics,
//! acceptable at personal-journal volumes).

mod records;

pub use records::{AuthRecord, Settings};

use crate::models::{Entry, EntryKind, EntryPayload};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// File name for the persisted entry sequence.
const ENTRIES_FILE: &str = "entries.json";
/// File name for the persisted settings record.
const SETTINGS_FILE: &str = "settings.json";
/// File name for the persisted auth record.
const AUTH_FILE: &str = "auth.json";

/// Result of appending an entry.
///
/// The in-memory append always succeeds for valid input; persistence
/// problems surface as warnings rather than errors so the session can
/// continue (durability resumes on the next successful persist).
#[derive(Debug, Clone)]
pub struct AppendResult {
    /// The entry as stored, with its assigned id and timestamp.
    pub entry: Entry,
    /// Non-fatal warnings (currently only persistence failures).
    pub warnings: Vec<String>,
}

/// The authoritative, append-only journal store.
pub struct JournalStore {
    /// Data directory holding the three record files.
    data_dir: PathBuf,
    /// Ordered entry sequence (insertion order).
    entries: Vec<Entry>,
    /// User settings record.
    settings: Settings,
    /// Calendar auth record.
    auth: AuthRecord,
}

impl JournalStore {
    /// Opens a store rooted at `data_dir`, loading all persisted records.
    ///
    /// Loading is best-effort: a missing or corrupt record logs a warning and
    /// falls back to its default, never a hard failure.
    ///
    /// # Errors
    ///
    /// Returns an error only if the data directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| Error::OperationFailed {
            operation: "create_data_dir".to_string(),
            cause: e.to_string(),
        })?;

        let entries = load_record(&data_dir.join(ENTRIES_FILE), "entries");
        let settings = load_record(&data_dir.join(SETTINGS_FILE), "settings");
        let auth = load_record(&data_dir.join(AUTH_FILE), "auth");

        Ok(Self {
            data_dir,
            entries,
            settings,
            auth,
        })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the full entry sequence in store order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the current settings record.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the current auth record.
    #[must_use]
    pub const fn auth(&self) -> &AuthRecord {
        &self.auth
    }

    /// Appends a new entry, assigning its id and timestamp, and persists the
    /// whole store.
    pub fn append(&mut self, payload: EntryPayload) -> AppendResult {
        let entry = Entry::now(payload);
        self.entries.push(entry.clone());

        let mut warnings = Vec::new();
        if let Err(e) = self.persist_entries() {
            tracing::warn!("entry kept in memory but not persisted: {e}");
            warnings.push(format!("entry not persisted: {e}"));
        }

        AppendResult { entry, warnings }
    }

    /// Returns entries of the given kind in store order.
    ///
    /// When `limit` is given, the **last** `limit` matches are kept (most
    /// recently appended), preserving their relative order.
    #[must_use]
    pub fn entries_by_kind(&self, kind: EntryKind, limit: Option<usize>) -> Vec<&Entry> {
        let matches: Vec<&Entry> = self.entries.iter().filter(|e| e.kind() == kind).collect();
        match limit {
            Some(n) if n < matches.len() => matches[matches.len() - n..].to_vec(),
            _ => matches,
        }
    }

    /// Returns entries whose timestamp falls within `[start, end]`
    /// (inclusive bounds). Linear scan.
    #[must_use]
    pub fn entries_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect()
    }

    /// Returns the `n` most recent entries, newest first.
    ///
    /// Sorted by timestamp (insertion order is not trusted for recency since
    /// clock skew can produce out-of-order appends).
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&Entry> {
        let mut all: Vec<&Entry> = self.entries.iter().collect();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        all.truncate(n);
        all
    }

    /// Replaces the settings record and persists it.
    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.persist_settings()
    }

    /// Replaces the auth record and persists it.
    pub fn update_auth(&mut self, auth: AuthRecord) -> Result<()> {
        self.auth = auth;
        self.persist_auth()
    }

    /// Clears all entries and resets settings and auth to defaults.
    ///
    /// Irreversible. Confirmation is the caller's responsibility.
    pub fn wipe(&mut self) -> Result<()> {
        self.entries.clear();
        self.settings = Settings::default();
        self.auth = AuthRecord::default();
        self.persist_entries()?;
        self.persist_settings()?;
        self.persist_auth()
    }

    /// Replaces the entry sequence wholesale (used by data import) and
    /// persists it.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) -> Result<()> {
        self.entries = entries;
        self.persist_entries()
    }

    fn persist_entries(&self) -> Result<()> {
        write_record(&self.data_dir.join(ENTRIES_FILE), &self.entries, "entries")
    }

    fn persist_settings(&self) -> Result<()> {
        write_record(
            &self.data_dir.join(SETTINGS_FILE),
            &self.settings,
            "settings",
        )
    }

    fn persist_auth(&self) -> Result<()> {
        write_record(&self.data_dir.join(AUTH_FILE), &self.auth, "auth")
    }
}

/// Loads a JSON record, falling back to its default on any failure.
fn load_record<T: serde::de::DeserializeOwned + Default>(path: &Path, name: &str) -> T {
    if !path.exists() {
        return T::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("corrupt {name} record at {}: {e}", path.display());
                T::default()
            },
        },
        Err(e) => {
            tracing::warn!("could not read {name} record at {}: {e}", path.display());
            T::default()
        },
    }
}

/// Serializes and writes a JSON record.
fn write_record<T: serde::Serialize>(path: &Path, value: &T, name: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
        operation: format!("serialize_{name}"),
        cause: e.to_string(),
    })?;

    fs::write(path, json).map_err(|e| Error::OperationFailed {
        operation: format!("write_{name}"),
        cause: e.to_string(),
    })
}
