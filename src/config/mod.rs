mod settings;

pub use settings::{ApiSettings, Config, ReportRules, ReportSettings};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `[api].token`
pub const TOKEN_ENV: &str = "PRODREPORT_TOKEN";

/// Get the config directory path (XDG, falling back to ~/.prodreport/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "prodreport") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".prodreport"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output directory. Relative paths are taken
/// from the config directory.
pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(output_dir);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

/// Load the main config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })?;

    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.is_empty() {
            config.api.token = token;
        }
    }

    Ok(config)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
base_url = "http://localhost:8000/api"
token = ""          # bearer token; PRODREPORT_TOKEN overrides it
timeout_secs = 10

[report]
output_dir = "output"           # relative to this directory, ~ is expanded
currency_symbol = "₱"
default_range_count = 30
default_range_unit = "days"     # days, weeks or months

[rules]
deadline_days = 14                     # deadline = acceptance date + N days
missing_acceptance_is_pending = true   # orders without acceptance_status count as pending
"#;
