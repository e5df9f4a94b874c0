use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User-tunable defaults, loaded once from studyforge.toml in the app data
/// directory. Every field has a sensible default so the file is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Override for the plan store directory. Defaults to `<app data>/plans`.
    pub data_dir: Option<PathBuf>,
    pub default_duration_weeks: u32,
    pub default_daily_goal: u32,
    pub default_max_problems_per_company: usize,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            data_dir: None,
            default_duration_weeks: 4,
            default_daily_goal: 3,
            default_max_problems_per_company: 10,
        }
    }
}

/// Platform-specific app data directory for studyforge.
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support/studyforge");
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push("studyforge");
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share/studyforge");
            return dir;
        }
    }

    // Fallback
    PathBuf::from(".studyforge")
}

fn config_path() -> PathBuf {
    app_data_dir().join("studyforge.toml")
}

fn load_config_internal() -> ForgeConfig {
    let config_path = config_path();

    // Try to load from config file
    if let Ok(content) = fs::read_to_string(&config_path) {
        match toml::from_str::<ForgeConfig>(&content) {
            Ok(config) => {
                eprintln!("[Config] Loaded config from: {:?}", config_path);
                return config;
            }
            Err(e) => {
                eprintln!("[Config] Failed to parse studyforge.toml ({}), using defaults", e);
            }
        }
    }

    // Return defaults if file doesn't exist or parsing fails
    ForgeConfig::default()
}

lazy_static! {
    static ref CONFIG: ForgeConfig = load_config_internal();
}

pub fn config() -> &'static ForgeConfig {
    &CONFIG
}
