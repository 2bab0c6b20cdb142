// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Defaults for the command-line front end. Every field may be omitted.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Person to look up when `--name` is not given.
    #[serde(default)]
    pub default_name: Option<String>,
    /// Target year when `--year` is not given.
    #[serde(default)]
    pub default_year: Option<String>,
    /// Directory for `<name>_排班.ics` when no explicit file is given.
    #[serde(default)]
    pub ics_dir: Option<PathBuf>,
    /// Always export an ICS file, even without `--ics`.
    #[serde(default)]
    pub export_ics: bool,
}

impl Config {
    /// Loads the configuration. A missing file yields the defaults; a file
    /// that cannot be read or parsed is an error.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, toml_str)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// File name used when exporting without an explicit path.
    pub fn default_ics_file_name(name: &str) -> String {
        format!("{}_排班.ics", name.trim())
    }

    /// Resolves where the ICS file goes. An explicit path wins and may be a
    /// directory; otherwise `ics_dir` is used when `export_ics` is set.
    pub fn ics_target(&self, explicit: Option<PathBuf>, name: &str) -> Option<PathBuf> {
        match explicit {
            Some(path) if path.is_dir() => Some(path.join(Self::default_ics_file_name(name))),
            Some(path) => Some(path),
            None if self.export_ics => {
                let dir = self.ics_dir.clone().unwrap_or_else(|| PathBuf::from("."));
                Some(dir.join(Self::default_ics_file_name(name)))
            }
            None => None,
        }
    }
}
