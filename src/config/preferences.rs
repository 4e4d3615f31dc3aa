//! Persisted user preferences.
//!
//! A flat string key-value store. The only key in use is [`THEME_KEY`]; its
//! absence means the visitor never chose a theme explicitly.

use super::ConfigError;
use crate::error::AppError;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::Write,
    path::PathBuf,
};

/// Key holding the explicit theme choice (`light` or `dark`).
///
pub const THEME_KEY: &str = "theme";

/// Key-value storage for preferences that outlive a page session.
///
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Preference store backed by a YAML map on disk.
///
pub struct FilePreferenceStore {
    file_path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Load the store from the given file, starting empty when the file does
    /// not exist yet.
    ///
    pub fn load(file_path: PathBuf) -> Result<Self, AppError> {
        let values = if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(&contents)
                    .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(FilePreferenceStore { file_path, values })
    }

    fn save(&self) -> Result<(), AppError> {
        let content = serde_yaml::to_string(&self.values)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        let mut file = fs::File::create(&self.file_path).map_err(|e| ConfigError::SaveFailed {
            path: self.file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: self.file_path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Preference store that lives only as long as the process.
///
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        MemoryPreferenceStore::default()
    }

    /// Return a store pre-populated with a single value.
    ///
    #[cfg(test)]
    pub fn with(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        MemoryPreferenceStore { values }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
