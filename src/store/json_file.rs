use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::BookingStore;
use crate::errors::Result;
use crate::models::BookingRecord;

/// Keeps every booking in one JSON array, rewritten in full on each append.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_all(&self, bookings: &[BookingRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        bookings.serialize(&mut ser)?;

        // Write then rename so a crash never leaves a truncated file behind.
        let tmp = self.temp_path();
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl BookingStore for JsonFileStore {
    fn append(&self, record: &BookingRecord) -> Result<()> {
        let mut bookings = self.load()?;
        bookings.push(record.clone());
        self.write_all(&bookings)?;

        tracing::info!(
            path = %self.path.display(),
            total = bookings.len(),
            "booking saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<Vec<BookingRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::ServiceKind;

    fn record(name: &str) -> BookingRecord {
        BookingRecord {
            name: name.to_string(),
            service: ServiceKind::Room,
            rooms: 2,
            checkin: "2026-10-18".to_string(),
            checkout: "2026-10-20".to_string(),
            guests: 4,
            timestamp: "2026-10-17 09:30:00.000000".to_string(),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("bookings.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_prior_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("bookings.json"));

        store.append(&record("Alice")).unwrap();
        store.append(&record("Bob")).unwrap();

        let bookings = store.load().unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0], record("Alice"));
        assert_eq!(bookings[1], record("Bob"));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("bookings.json"));
        let mut hall = record("Carol");
        hall.service = ServiceKind::Hall;
        store.append(&hall).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value[0];
        assert_eq!(entry["name"], "Carol");
        assert_eq!(entry["service"], "event hall");
        assert_eq!(entry["rooms"], 2);
        assert_eq!(entry["checkin"], "2026-10-18");
        assert_eq!(entry["guests"], 4);
        assert!(raw.contains("\n        \"name\""));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data/nested/bookings.json"));
        store.append(&record("Dana")).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.append(&record("Eve")).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
