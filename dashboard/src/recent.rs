use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of cities kept in the history
pub const MAX_RECENT: usize = 5;

/// Storage key the history lives under
pub const STORAGE_KEY: &str = "recentSearches";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable home of the recent-search list
pub trait RecentSearchesStore: Send {
    fn load(&self) -> Result<Vec<String>, StoreError>;
    fn save(&self, searches: &[String]) -> Result<(), StoreError>;
}

/// Most-recent-first city history, unique ignoring case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    items: Vec<String>,
}

impl RecentSearches {
    /// Build from a stored list, repairing duplicates and overflow
    pub fn from_stored(stored: Vec<String>) -> Self {
        let mut items: Vec<String> = Vec::with_capacity(MAX_RECENT);
        for city in stored {
            if city.trim().is_empty() || items.iter().any(|c| same_city(c, &city)) {
                continue;
            }
            items.push(city);
            if items.len() == MAX_RECENT {
                break;
            }
        }
        Self { items }
    }

    /// Move `city` to the front, replacing any entry equal ignoring case
    pub fn record(&mut self, city: &str) {
        self.items.retain(|c| !same_city(c, city));
        self.items.insert(0, city.to_string());
        self.items.truncate(MAX_RECENT);
    }

    /// Drop the entry matching `city` exactly. Returns whether one was removed.
    pub fn remove(&mut self, city: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c != city);
        self.items.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn same_city(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Process-local store, handy for tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: Arc<Mutex<Vec<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: Arc::new(Mutex::new(items.into_iter().map(Into::into).collect())),
        }
    }

    /// What was last saved
    pub fn snapshot(&self) -> Vec<String> {
        self.items.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl RecentSearchesStore for InMemoryStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, searches: &[String]) -> Result<(), StoreError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| io::Error::other("recent searches lock poisoned"))?;
        *items = searches.to_vec();
        Ok(())
    }
}

/// JSON file holding an object of keys, the list stored under [`STORAGE_KEY`].
///
/// Other keys in the file are preserved. Writes go through a temporary file
/// and a rename so a crash never leaves a half-written document.
#[derive(Debug, Clone)]
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

    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Map::new()),
            Ok(text) => match serde_json::from_str::<Value>(&text)? {
                Value::Object(map) => Ok(map),
                _ => Ok(Map::new()),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecentSearchesStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        let document = self.read_document()?;
        let Some(value) = document.get(STORAGE_KEY) else {
            debug!(path = %self.path.display(), "No stored recent searches");
            return Ok(Vec::new());
        };
        Ok(serde_json::from_value(value.clone())?)
    }

    fn save(&self, searches: &[String]) -> Result<(), StoreError> {
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Replacing unreadable store");
                Map::new()
            }
        };
        document.insert(STORAGE_KEY.to_string(), serde_json::to_value(searches)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&Value::Object(document))?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), count = searches.len(), "Saved recent searches");
        Ok(())
    }
}
