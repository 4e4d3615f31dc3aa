//! Configuration management module.
//!
//! This module handles loading the site configuration (submission endpoint,
//! scroll offset, animation delay) and the persisted theme preference.

mod error;
mod preferences;

pub use error::ConfigError;
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, THEME_KEY};

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const PREFERENCES_FILE_NAME: &str = "preferences.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/showroom";

/// Immutable site configuration, set once at startup.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub submit_endpoint: String,
    pub scroll_offset: f64,
    pub animation_delay: Duration,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_submit_endpoint")]
    pub submit_endpoint: String,
    #[serde(default = "default_scroll_offset")]
    pub scroll_offset: f64,
    #[serde(default = "default_animation_delay_ms")]
    pub animation_delay_ms: u64,
}

fn default_submit_endpoint() -> String {
    "https://formspree.io/f/YOUR_FORM_ID".to_string()
}

fn default_scroll_offset() -> f64 {
    80.0
}

fn default_animation_delay_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            submit_endpoint: default_submit_endpoint(),
            scroll_offset: default_scroll_offset(),
            animation_delay: Duration::from_millis(default_animation_delay_ms()),
            file_path: None,
        }
    }
}

impl Config {
    /// Return a new instance holding the default values.
    ///
    pub fn new() -> Config {
        Config::default()
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. When no file exists yet, the defaults are
    /// written out so they can be edited.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.submit_endpoint = data.submit_endpoint;
            self.scroll_offset = data.scroll_offset;
            self.animation_delay = Duration::from_millis(data.animation_delay_ms);
        } else {
            self.create_file()?;
        }

        Ok(())
    }

    /// Return the path of the preference file living next to the
    /// configuration file.
    ///
    pub fn preferences_path(&self) -> Result<PathBuf, AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        Ok(file_path.with_file_name(PREFERENCES_FILE_NAME))
    }

    /// Attempt to serialize the configuration data and write it to the disk,
    /// returning any unrecoverable errors.
    ///
    fn create_file(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            submit_endpoint: self.submit_endpoint.clone(),
            scroll_offset: self.scroll_offset,
            animation_delay_ms: self.animation_delay.as_millis() as u64,
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
