//! Mock show source for running without network access.
//!
//! Loads saved API responses from a directory and serves them as if they
//! were live responses:
//!
//! ```text
//! <dir>/roster.json        GetRiderData
//! <dir>/classes.json       GetClassData
//! <dir>/riders/<id>.json   GetAllRiderData for rider <id>
//! ```
//!
//! A missing file makes the corresponding fetch fail, which is also how
//! tests simulate an unreachable endpoint.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::ShowSource;
use super::error::FetchError;
use super::payload::Payload;

/// Show source that serves canned payloads.
#[derive(Debug, Clone, Default)]
pub struct MockShowSource {
    roster: Option<Payload>,
    classes: Option<Payload>,
    riders: HashMap<i64, Payload>,
    /// Every request served, in order (e.g. `rider:308`).
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockShowSource {
    /// Create an empty mock where every fetch fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load saved responses from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FetchError::Mock {
                message: format!("{} is not a directory", dir.display()),
            });
        }

        let mut mock = Self::new();
        mock.roster = read_payload(&dir.join("roster.json"))?;
        mock.classes = read_payload(&dir.join("classes.json"))?;

        let riders_dir = dir.join("riders");
        if riders_dir.is_dir() {
            let entries = std::fs::read_dir(&riders_dir).map_err(|e| FetchError::Mock {
                message: format!("failed to read {}: {}", riders_dir.display(), e),
            })?;

            for entry in entries {
                let path = entry
                    .map_err(|e| FetchError::Mock {
                        message: format!("failed to read directory entry: {}", e),
                    })?
                    .path();

                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }

                // "308.json" -> 308
                let Some(rider_id) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse::<i64>().ok())
                else {
                    continue;
                };

                if let Some(payload) = read_payload(&path)? {
                    mock.riders.insert(rider_id, payload);
                }
            }
        }

        Ok(mock)
    }

    /// Serve `payload` as the roster.
    pub fn with_roster(mut self, payload: Payload) -> Self {
        self.roster = Some(payload);
        self
    }

    /// Serve `payload` as the class list.
    pub fn with_classes(mut self, payload: Payload) -> Self {
        self.classes = Some(payload);
        self
    }

    /// Serve `payload` as the schedule of `rider_id`.
    pub fn with_rider(mut self, rider_id: i64, payload: Payload) -> Self {
        self.riders.insert(rider_id, payload);
        self
    }

    /// Requests served so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn record(&self, request: String) {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }
    }

    fn serve(payload: Option<&Payload>, what: &str) -> Result<Payload, FetchError> {
        payload.cloned().ok_or_else(|| FetchError::Mock {
            message: format!("no mock data for {what}"),
        })
    }
}

fn read_payload(path: &Path) -> Result<Option<Payload>, FetchError> {
    if !path.exists() {
        return Ok(None);
    }

    let body = std::fs::read_to_string(path).map_err(|e| FetchError::Mock {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;

    Ok(Some(Payload::from_body(body)))
}

impl ShowSource for MockShowSource {
    async fn roster(&self, show_id: u64) -> Result<Payload, FetchError> {
        self.record(format!("roster:{show_id}"));
        Self::serve(self.roster.as_ref(), "roster")
    }

    async fn classes(&self, show_id: u64) -> Result<Payload, FetchError> {
        self.record(format!("classes:{show_id}"));
        Self::serve(self.classes.as_ref(), "classes")
    }

    async fn rider_schedule(&self, _show_id: u64, rider_id: i64) -> Result<Payload, FetchError> {
        self.record(format!("rider:{rider_id}"));
        Self::serve(self.riders.get(&rider_id), &format!("rider {rider_id}"))
    }
}
