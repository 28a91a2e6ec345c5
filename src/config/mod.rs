//! Configuration management module.
//!
//! This module loads the configuration file, creating it with defaults on
//! first run. It selects the theme, the date format, animation, the size of
//! the log buffer, whether submissions are printed on exit, and optionally
//! the form to show.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::form::FormDefinition;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/form-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub theme_name: String,
    pub date_format: String,
    pub animate: bool,
    pub log_capacity: usize,
    pub print_submissions: bool,
    pub form: Option<FormDefinition>,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_true")]
    pub animate: bool,
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    #[serde(default = "default_true")]
    pub print_submissions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormDefinition>,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_capacity() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            theme_name: default_theme_name(),
            date_format: default_date_format(),
            animate: true,
            log_capacity: default_log_capacity(),
            print_submissions: true,
            form: None,
            file_path: None,
        }
    }

    /// Load the configuration from the custom directory if provided, or the
    /// default one. A missing file is created with the current values.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
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

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if !file_path.exists() {
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        validate_date_format(&data.date_format)?;

        self.theme_name = data.theme_name;
        self.date_format = data.date_format;
        self.animate = data.animate;
        self.log_capacity = data.log_capacity;
        self.print_submissions = data.print_submissions;
        self.form = data.form;
        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            theme_name: self.theme_name.clone(),
            date_format: self.date_format.clone(),
            animate: self.animate,
            log_capacity: self.log_capacity,
            print_submissions: self.print_submissions,
            form: self.form.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

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

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// The form to show: the configured one, or the built-in signup form.
    ///
    pub fn form_definition(&self) -> FormDefinition {
        self.form.clone().unwrap_or_else(FormDefinition::signup)
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

fn validate_date_format(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("form-tui-test-{}", Uuid::new_v4()))
    }

    fn write_config(dir: &Path, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(FILE_NAME), contents).unwrap();
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = scratch_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();

        let written = fs::read_to_string(dir.join(FILE_NAME)).unwrap();
        assert!(written.contains("theme_name: tokyo-night"));
        assert!(!written.contains("form:"));
        assert_eq!(config.file_path(), Some(dir.join(FILE_NAME).as_path()));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn existing_file_overrides_defaults() {
        let dir = scratch_dir();
        write_config(
            &dir,
            "theme_name: dracula\ndate_format: \"%d/%m/%Y\"\nanimate: false\nprint_submissions: false\n",
        );
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();

        assert_eq!(config.theme_name, "dracula");
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert!(!config.animate);
        assert!(!config.print_submissions);
        assert_eq!(config.log_capacity, 500);
        assert!(config.form.is_none());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn form_can_be_configured() {
        let dir = scratch_dir();
        write_config(
            &dir,
            r#"
form:
  sections:
    - title: Feedback
      fields:
        - key: comment
          kind: text
          label: Comment
          required: true
        - key: send
          kind: button
          label: Send
"#,
        );
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();

        let form = config.form_definition();
        assert_eq!(form.sections.len(), 1);
        assert_eq!(form.sections[0].fields[0].key, "comment");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unconfigured_form_falls_back_to_signup() {
        assert_eq!(Config::new().form_definition(), FormDefinition::signup());
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let dir = scratch_dir();
        write_config(&dir, "animate: [not, a, bool]\n");
        let mut config = Config::new();
        let error = config.load(dir.to_str()).unwrap_err();
        assert!(matches!(
            error,
            AppError::Config(ConfigError::DeserializationFailed(_))
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn invalid_date_format_is_reported() {
        let dir = scratch_dir();
        write_config(&dir, "date_format: \"%Y-%\"\n");
        let mut config = Config::new();
        let error = config.load(dir.to_str()).unwrap_err();
        assert!(matches!(
            error,
            AppError::Config(ConfigError::InvalidDateFormat(_))
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_without_path_fails() {
        let error = Config::new().save().unwrap_err();
        assert!(matches!(error, AppError::Config(ConfigError::FilePathNotSet)));
    }
}
