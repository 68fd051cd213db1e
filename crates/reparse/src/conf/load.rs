//! Load: config loading from file and environment variables.

use std::path::Path;

use super::model::ParserOutputConfig;
use super::validate::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/reparse/reparse.toml";
pub const CONFIG_FILE_ENV: &str = "REPARSE_CONFIG_FILE";

impl ParserOutputConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicit `path` must exist; the env/default location may be absent.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                Self::from_file(path)?
            }
            None => {
                let config_path = std::env::var(CONFIG_FILE_ENV)
                    .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

                if Path::new(&config_path).exists() {
                    tracing::info!("Loading configuration from: {}", config_path);
                    Self::from_file(&config_path)?
                } else {
                    tracing::info!("Config file not found at {}, using environment variables", config_path);
                    Self::default()
                }
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_string(),
            source,
        })
    }

    /// Environment variables override file config for the routing-critical settings.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key_name) = lookup("REPARSE_KEY_NAME") {
            self.key_name = Some(key_name);
        }
        if let Some(format) = lookup("REPARSE_FORMAT") {
            self.format = Some(format);
        }
        if let Some(tag) = lookup("REPARSE_TAG") {
            self.tag = Some(tag);
        }
        if let Some(prefix) = lookup("REPARSE_REMOVE_PREFIX") {
            self.remove_prefix = Some(prefix);
        }
        if let Some(prefix) = lookup("REPARSE_ADD_PREFIX") {
            self.add_prefix = Some(prefix);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_from_file() {
        let file = write_config("key_name = \"message\"\nformat = \"json\"\ntag = \"parsed\"\n");
        let cfg = ParserOutputConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.key_name.as_deref(), Some("message"));
        assert_eq!(cfg.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_load_explicit_path() {
        let file = write_config("key_name = \"message\"\nformat = \"json\"\ntag = \"parsed\"\n");
        let cfg = ParserOutputConfig::load(file.path().to_str()).unwrap();
        assert_eq!(cfg.tag.as_deref(), Some("parsed"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ParserOutputConfig::from_file("/nonexistent/reparse.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/reparse.toml"));
    }

    #[test]
    fn test_from_file_bad_toml() {
        let file = write_config("key_name = \n");
        let err = ParserOutputConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut cfg = ParserOutputConfig {
            key_name: Some("message".into()),
            tag: Some("parsed".into()),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("REPARSE_KEY_NAME", "log"),
            ("REPARSE_ADD_PREFIX", "pre"),
        ]
        .into_iter()
        .collect();

        cfg.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(cfg.key_name.as_deref(), Some("log"));
        assert_eq!(cfg.add_prefix.as_deref(), Some("pre"));
        assert_eq!(cfg.tag.as_deref(), Some("parsed")); // untouched
        assert!(cfg.format.is_none());
    }
}
