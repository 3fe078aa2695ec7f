use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use phishcheck_client::ClientSettings;
use phishcheck_logging::phish_info;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "phishcheck.ron";

/// Optional settings read from a RON file; command-line flags win over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub form_field: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_bytes: Option<u64>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// An explicit path must exist; the default file in `working_dir` is optional.
pub fn resolve_config(explicit: Option<&Path>, working_dir: &Path) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
    match load_config(&default_path) {
        Ok(config) => {
            phish_info!("Loaded config from {:?}", default_path);
            Ok(config)
        }
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(AppConfig::default())
        }
        Err(err) => Err(err),
    }
}

impl AppConfig {
    pub fn client_settings(&self, overrides: &Overrides) -> ClientSettings {
        let defaults = ClientSettings::default();
        ClientSettings {
            endpoint: overrides
                .endpoint
                .clone()
                .or_else(|| self.endpoint.clone())
                .unwrap_or(defaults.endpoint),
            form_field: self.form_field.clone().unwrap_or(defaults.form_field),
            connect_timeout: self
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            request_timeout: overrides
                .request_timeout_secs
                .or(self.request_timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_bytes: self.max_bytes.unwrap_or(defaults.max_bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_default_file_yields_defaults() {
        let temp = TempDir::new().unwrap();

        let config = resolve_config(None, temp.path()).unwrap();

        assert_eq!(config, AppConfig::default());
        let settings = config.client_settings(&Overrides::default());
        assert_eq!(settings.endpoint, ClientSettings::default().endpoint);
        assert_eq!(settings.form_field, "name");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.ron");

        let err = resolve_config(Some(&path), temp.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn default_file_is_read_and_flags_override_it() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"(
                endpoint: Some("http://backend.internal:8000/predict"),
                form_field: Some("url"),
                request_timeout_secs: Some(5),
                max_bytes: Some(4096),
            )"#,
        )
        .unwrap();

        let config = resolve_config(None, temp.path()).unwrap();
        let settings = config.client_settings(&Overrides {
            endpoint: None,
            request_timeout_secs: Some(2),
        });

        assert_eq!(settings.endpoint, "http://backend.internal:8000/predict");
        assert_eq!(settings.form_field, "url");
        assert_eq!(settings.request_timeout, Duration::from_secs(2));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.max_bytes, 4096);

        let settings = config.client_settings(&Overrides {
            endpoint: Some("http://other/predict".to_string()),
            request_timeout_secs: None,
        });
        assert_eq!(settings.endpoint, "http://other/predict");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(retries: Some(3))").unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
