use std::env;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, OrgchartConfig};

pub const CONFIG_FILE_NAME: &str = ".orgchart.toml";

/// Loads the effective configuration.
///
/// Lookup order: `explicit`, then `ORGCHART_CONFIG`, then the nearest
/// `.orgchart.toml` at or above `start`. Without any file the defaults apply.
pub fn load_config(
    start: impl AsRef<Path>,
    explicit: Option<PathBuf>,
) -> Result<OrgchartConfig, ConfigError> {
    let mut config = match resolve_config_path(start, explicit)? {
        Some(path) => load_config_file(&path)?,
        None => OrgchartConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn resolve_config_path(
    start: impl AsRef<Path>,
    explicit: Option<PathBuf>,
) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        return require_file(path).map(Some);
    }

    if let Ok(path) = env::var("ORGCHART_CONFIG") {
        return require_file(PathBuf::from(path)).map(Some);
    }

    Ok(find_config_from(start.as_ref()))
}

pub fn load_config_file(path: &Path) -> Result<OrgchartConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn require_file(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(ConfigError::ConfigNotFound(path))
    }
}

fn find_config_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

fn apply_env_overrides(config: &mut OrgchartConfig) {
    if let Ok(separator) = env::var("ORGCHART_FIELD_SEPARATOR") {
        config.input.field_separator = separator;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{find_config_from, load_config_file, resolve_config_path, CONFIG_FILE_NAME};
    use crate::config::ConfigError;

    fn unique_temp_dir(prefix: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        let pid = std::process::id();
        std::env::temp_dir().join(format!("orgchart-{prefix}-{pid}-{nanos}"))
    }

    #[test]
    fn finds_config_in_an_ancestor() {
        let root = unique_temp_dir("config-ancestor");
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).expect("create nested dir");
        fs::write(root.join(CONFIG_FILE_NAME), "[input]\ntrim_fields = true\n")
            .expect("write config");

        let found = find_config_from(&nested).expect("config found");
        assert_eq!(found, root.join(CONFIG_FILE_NAME));
        let config = load_config_file(&found).expect("load config");
        assert!(config.input.trim_fields);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn explicit_path_must_exist() {
        let root = unique_temp_dir("config-explicit");
        fs::create_dir_all(&root).expect("create dir");
        let missing = root.join("nope.toml");

        let err = resolve_config_path(&root, Some(missing.clone())).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigNotFound(path) if path == missing));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn malformed_toml_names_the_file() {
        let root = unique_temp_dir("config-bad");
        fs::create_dir_all(&root).expect("create dir");
        let path = root.join(CONFIG_FILE_NAME);
        fs::write(&path, "[input\n").expect("write config");

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { path: ref p, .. } if p == &path));

        let _ = fs::remove_dir_all(root);
    }
}
