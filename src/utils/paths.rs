use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".nexus_manager";
const DATA_DIR: &str = "data";
const EXPORT_DIR: &str = "exports";
const CONFIG_FILE: &str = "config.json";
const LOGO_FILE: &str = "logo.png";

/// Resolves the application's directories, honouring `NEXUS_MANAGER_HOME`.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application home, defaulting to `~/.nexus_manager`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os("NEXUS_MANAGER_HOME") {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn export_dir_in(base: &Path) -> PathBuf {
        base.join(EXPORT_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn logo_file_in(base: &Path) -> PathBuf {
        base.join(LOGO_FILE)
    }
}

/// Turns free text (a client name) into a portable file-name fragment.
pub fn sanitize_file_stem(raw: &str) -> String {
    let mut sanitized = String::new();
    let mut last_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            sanitized.push(ch);
            last_sep = false;
        } else if !sanitized.is_empty() && !last_sep {
            sanitized.push('_');
            last_sep = true;
        }
    }
    let trimmed = sanitized.trim_matches('_').to_string();
    if trimmed.is_empty() {
        "client".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_separators() {
        assert_eq!(sanitize_file_stem("Awa  Traoré"), "Awa_Traoré");
        assert_eq!(sanitize_file_stem("../École/B"), "École_B");
        assert_eq!(sanitize_file_stem(" // "), "client");
    }
}
