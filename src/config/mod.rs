//! Persistent application settings and their on-disk manager.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Amount, CabinetProfile},
    errors::Result,
    utils::paths::PathResolver,
};

const TMP_SUFFIX: &str = "tmp";

pub const DEFAULT_ANNUAL_TARGET: Amount = 15_125_000;
pub const DEFAULT_PLANNED_BUDGET: Amount = 2_139_500;

/// User-adjustable settings. The cabinet profile is only present once the
/// operator has explicitly saved it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_label")]
    pub currency_label: String,
    #[serde(default = "Config::default_annual_target")]
    pub annual_target: Amount,
    #[serde(default = "Config::default_planned_budget")]
    pub planned_budget: Amount,
    #[serde(default = "Config::default_followup_message")]
    pub followup_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabinet: Option<CabinetProfile>,
}

impl Config {
    fn default_currency_label() -> String {
        "CFA".into()
    }

    fn default_annual_target() -> Amount {
        DEFAULT_ANNUAL_TARGET
    }

    fn default_planned_budget() -> Amount {
        DEFAULT_PLANNED_BUDGET
    }

    fn default_followup_message() -> String {
        "Bonjour, Nexus vous relance pour le solde restant de votre prestation.".into()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_label: Self::default_currency_label(),
            annual_target: DEFAULT_ANNUAL_TARGET,
            planned_budget: DEFAULT_PLANNED_BUDGET,
            followup_message: Self::default_followup_message(),
            logo_path: None,
            export_dir: None,
            cabinet: None,
        }
    }
}

/// Loads and saves [`Config`] and resolves the directories derived from it.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        let config_path = PathResolver::config_file_in(&base);
        Ok(Self { base, config_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> PathBuf {
        PathResolver::data_dir_in(&self.base)
    }

    pub fn export_dir(&self, config: &Config) -> PathBuf {
        config
            .export_dir
            .clone()
            .unwrap_or_else(|| PathResolver::export_dir_in(&self.base))
    }

    pub fn logo_path(&self, config: &Config) -> PathBuf {
        config
            .logo_path
            .clone()
            .unwrap_or_else(|| PathResolver::logo_file_in(&self.base))
    }

    pub fn load(&self) -> Result<Config> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        tracing::debug!(path = %self.config_path.display(), "saved configuration");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
