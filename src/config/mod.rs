pub mod init;
mod schema;

pub use init::{run_init_wizard, write_sample_data};
pub use schema::{Config, DataConfig, ReportConfig, ShuffleConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/persona-quiz/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("persona-quiz"))
}

/// Get the default config file path (~/.config/persona-quiz/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// Relative data paths are resolved against the config file's directory.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };
    let base = config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        let mut config = Config::default();
        config.resolve_paths(&base);
        return Ok(config);
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;
    config.resolve_paths(&base);

    tracing::debug!(path = %config_path.display(), "loaded config");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_explicit_missing_file_errors() {
        let path = env::temp_dir().join("persona_quiz_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = env::temp_dir().join("persona_quiz_test_config_dir");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        fs::write(&path, "data:\n  types: my_types.csv\nshuffle:\n  seed: 9\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.data.types, dir.join("my_types.csv"));
        assert_eq!(config.data.questions, dir.join("questions.csv"));
        assert_eq!(config.shuffle.seed, Some(9));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let path = env::temp_dir().join("persona_quiz_test_bad_config.yaml");
        fs::write(&path, "shuffle: [unclosed\n").unwrap();
        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        let _ = fs::remove_file(&path);
    }
}
