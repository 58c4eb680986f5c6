//! Config file and store location resolution shared by the subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use nemesis_core::GameConfig;

pub const STORE_FILE_NAME: &str = "ai_memory.json";

/// Reads a TOML config file. Missing keys fall back to their defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    config.validate().context("Invalid game config")?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<GameConfig> {
    Ok(toml::from_str(content)?)
}

pub fn default_store_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "Nemesis").map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push(STORE_FILE_NAME);
        path
    })
}

pub fn resolve_store_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => default_store_path()
            .context("No data directory available on this platform; pass --store explicitly"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = parse_config("grid_size = 12\ndual_agents = false\n").unwrap();
        assert_eq!(config.grid_size, 12);
        assert!(!config.dual_agents);
        assert_eq!(config.trap_budget, GameConfig::default().trap_budget);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("grid_sise = 12\n").is_err());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nemesis.toml");
        fs::write(&path, "grid_size = 3\nobstacle_count = 8\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("obstacles"), "{err:#}");
    }

    #[test]
    fn explicit_store_path_wins() {
        let path = PathBuf::from("/tmp/custom.json");
        assert_eq!(resolve_store_path(Some(path.clone())).unwrap(), path);
    }
}
