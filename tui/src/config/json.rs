use std::{env, fs, path::Path};

use anyhow::{Context, Result};

use super::model::AppConfig;

pub const CONFIG_VAR: &str = "HOUSING_CONFIG";
pub const DATASET_VAR: &str = "HOUSING_DATASET";
pub const SEED_VAR: &str = "HOUSING_SEED";

/// Builds the config from the process environment.
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed, or the seed override is
/// not an unsigned integer.
pub fn load() -> Result<AppConfig> {
    resolve(|key| env::var(key).ok())
}

/// Builds the config from `var`: the file named by [`CONFIG_VAR`] if any, then the
/// [`DATASET_VAR`] and [`SEED_VAR`] overrides. Empty variables count as unset.
///
/// # Errors
/// Same as [`load`].
pub fn resolve(var: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    let mut config = match var(CONFIG_VAR) {
        Some(path) => load_file(Path::new(&path))?,
        None => AppConfig::default(),
    };

    if let Some(path) = var(DATASET_VAR) {
        config.dataset_path = path.into();
    }

    if let Some(seed) = var(SEED_VAR) {
        let seed = seed
            .trim()
            .parse()
            .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got '{seed}'"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

/// Loads an [`AppConfig`] from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid config.
pub fn load_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read config '{}'", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("invalid config '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write, path::PathBuf};

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn config_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_environment() {
        let config = resolve(vars(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.dataset_path, PathBuf::from("data/housing.csv"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = config_file(r#"{ "seed": 7 }"#);
        let config = load_file(file.path()).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_path, PathBuf::from("housing-tui.log"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let file = config_file(r#"{ "dataset": "x.csv" }"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let file = config_file(r#"{ "dataset_path": "a.csv", "seed": 1 }"#);
        let path = file.path().to_string_lossy().into_owned();

        let config = resolve(vars(&[
            (CONFIG_VAR, path.as_str()),
            (DATASET_VAR, "b.csv"),
            (SEED_VAR, " 42 "),
        ]))
        .unwrap();

        assert_eq!(config.dataset_path, PathBuf::from("b.csv"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn empty_variables_are_ignored() {
        let config = resolve(vars(&[(DATASET_VAR, ""), (SEED_VAR, "  ")])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn bad_seed_is_an_error() {
        let err = resolve(vars(&[(SEED_VAR, "-3")])).unwrap_err();
        assert!(err.to_string().contains(SEED_VAR), "{err}");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let path = path.to_string_lossy().into_owned();

        assert!(resolve(vars(&[(CONFIG_VAR, path.as_str())])).is_err());
    }
}
