//! Runtime settings for pyreview.
//!
//! The API credential comes from the environment (a `.env` file is loaded
//! by the binary first). Model, sampling temperature and endpoint may be
//! overridden by an optional YAML file discovered in the working directory:
//!
//! ```yaml
//! model: gpt-4o-mini
//! temperature: 0.3
//! base_url: https://api.openai.com/v1
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["pyreview.yaml", ".pyreview.yaml"];

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Optional overrides read from a YAML config file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ConfigFile {
    /// Parse a config file from YAML.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file is a valid config with no overrides.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look for a config file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

/// Resolved settings for one run.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub base_url: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Settings {
    /// Load settings from an environment lookup and the config file
    /// discovered in the working directory, if any.
    pub fn load<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = std::env::current_dir()
            .ok()
            .and_then(|dir| ConfigFile::discover(&dir));

        Self::resolve(env, config_path.as_deref())
    }

    /// Resolve settings from an environment lookup and an optional config file.
    ///
    /// The credential is checked before the config file is read.
    pub fn resolve<F>(env: F, config_path: Option<&Path>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        let file = match config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                ConfigFile::parse_file(path)?
            }
            None => ConfigFile::default(),
        };

        let base_url = env(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let settings = Settings {
            api_key,
            model: file.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: file.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        };

        validate(&settings)?;
        Ok(settings)
    }
}

/// Validate resolved settings.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.model.trim().is_empty() {
        return Err(ConfigError::Invalid("model must not be empty".to_string()));
    }

    if !(settings.temperature > 0.0 && settings.temperature <= 2.0) {
        return Err(ConfigError::Invalid(format!(
            "temperature {} out of range, must be in (0.0, 2.0]",
            settings.temperature
        )));
    }

    if !settings.base_url.starts_with("http://") && !settings.base_url.starts_with("https://") {
        return Err(ConfigError::Invalid(format!(
            "base_url {:?} must start with http:// or https://",
            settings.base_url
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(env_from(&[(API_KEY_VAR, "sk-test")]), None).unwrap();

        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_credential() {
        let err = Settings::resolve(env_from(&[]), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(API_KEY_VAR)));

        let err = Settings::resolve(env_from(&[(API_KEY_VAR, "   ")]), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn test_missing_credential_checked_before_config_file() {
        // The config path does not exist; the credential error must win.
        let err = Settings::resolve(env_from(&[]), Some(Path::new("/nonexistent/pyreview.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn test_load_checks_credential() {
        let err = Settings::load(env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(API_KEY_VAR)));
    }

    #[test]
    fn test_config_file_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pyreview.yaml");
        std::fs::write(
            &path,
            "model: gpt-4o-mini\ntemperature: 0.5\nbase_url: http://localhost:8080/v1/\n",
        )
        .unwrap();

        let settings =
            Settings::resolve(env_from(&[(API_KEY_VAR, "sk-test")]), Some(&path)).unwrap();

        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_env_base_url_wins_over_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pyreview.yaml");
        std::fs::write(&path, "base_url: http://file.example/v1\n").unwrap();

        let settings = Settings::resolve(
            env_from(&[(API_KEY_VAR, "sk-test"), (BASE_URL_VAR, "http://env.example/v1")]),
            Some(&path),
        )
        .unwrap();

        assert_eq!(settings.base_url, "http://env.example/v1");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pyreview.yaml");
        std::fs::write(&path, "modle: gpt-4o\n").unwrap();

        let err =
            Settings::resolve(env_from(&[(API_KEY_VAR, "sk-test")]), Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_empty_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".pyreview.yaml");
        std::fs::write(&path, "\n").unwrap();

        assert_eq!(ConfigFile::parse_file(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_validate_temperature_range() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pyreview.yaml");

        for bad in ["0.0", "-1", "2.5"] {
            std::fs::write(&path, format!("temperature: {}\n", bad)).unwrap();
            let err = Settings::resolve(env_from(&[(API_KEY_VAR, "sk-test")]), Some(&path))
                .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let err = Settings::resolve(
            env_from(&[(API_KEY_VAR, "sk-test"), (BASE_URL_VAR, "api.openai.com/v1")]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_discover() {
        let temp = TempDir::new().unwrap();
        assert_eq!(ConfigFile::discover(temp.path()), None);

        let hidden = temp.path().join(".pyreview.yaml");
        std::fs::write(&hidden, "model: gpt-4o\n").unwrap();
        assert_eq!(ConfigFile::discover(temp.path()), Some(hidden));

        let visible = temp.path().join("pyreview.yaml");
        std::fs::write(&visible, "model: gpt-4o\n").unwrap();
        assert_eq!(ConfigFile::discover(temp.path()), Some(visible));
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings::resolve(env_from(&[(API_KEY_VAR, "sk-secret")]), None).unwrap();
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
