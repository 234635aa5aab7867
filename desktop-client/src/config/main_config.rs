use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ttt_common::config::Validate;
use ttt_common::{Difficulty, MatchSettings};

use super::theme::{DEFAULT_THEME, Theme, default_themes};
use super::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "ultimate_ttt_config.yaml";
const STATS_FILE_NAME: &str = ".ultimate_ttt_stats.yaml";

pub const MIN_BOARD_SIZE: u32 = 3;
pub const MAX_BOARD_SIZE: u32 = 5;
/// Full-depth minimax only finishes in reasonable time on the classic board.
pub const MAX_HARD_BOARD_SIZE: u32 = 3;

fn path_next_to_executable(file_name: &str) -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(file_name);
    }
    PathBuf::from(file_name)
}

fn default_stats_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(STATS_FILE_NAME),
        None => path_next_to_executable(STATS_FILE_NAME),
    }
}

pub fn default_config_path() -> PathBuf {
    path_next_to_executable(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub board_size: u32,
    pub difficulty: Difficulty,
    pub ai_enabled: bool,
    pub ai_delay_ms: u64,
    pub reset_delay_ms: u64,
    pub sound_enabled: bool,
    pub theme: String,
    pub themes: BTreeMap<String, Theme>,
    /// Win counts, stored as a flat YAML map (`X: 3`). Defaults to
    /// `~/.ultimate_ttt_stats.yaml`. An older `~/.ultimate_ttt_stats.json`
    /// can be used by pointing this at it, since a JSON object loads as YAML;
    /// it is rewritten as YAML on the next win.
    pub stats_file: PathBuf,
}

impl Config {
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            board_size: self.board_size as usize,
            difficulty: self.difficulty,
            ai_enabled: self.ai_enabled,
            ai_delay: Duration::from_millis(self.ai_delay_ms),
            reset_delay: Duration::from_millis(self.reset_delay_ms),
        }
    }

    pub fn hard_allowed(&self) -> bool {
        self.board_size <= MAX_HARD_BOARD_SIZE
    }

    /// The selected theme, or the first one when the name is unknown.
    pub fn active_theme(&self) -> Option<&Theme> {
        self.themes
            .get(&self.theme)
            .or_else(|| self.themes.values().next())
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(format!(
                "board_size must be between {} and {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE
            ));
        }
        if self.difficulty == Difficulty::Hard && !self.hard_allowed() {
            return Err(format!(
                "Hard difficulty supports boards up to {0}x{0}",
                MAX_HARD_BOARD_SIZE
            ));
        }
        if self.themes.is_empty() {
            return Err("at least one theme must be defined".to_string());
        }
        if !self.themes.contains_key(&self.theme) {
            return Err(format!("unknown theme {:?}", self.theme));
        }
        for (name, theme) in &self.themes {
            theme
                .validate()
                .map_err(|e| format!("theme {:?}: {}", name, e))?;
        }
        if self.stats_file.as_os_str().is_empty() {
            return Err("stats_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: MIN_BOARD_SIZE,
            difficulty: Difficulty::Medium,
            ai_enabled: true,
            ai_delay_ms: 500,
            reset_delay_ms: 1000,
            sound_enabled: true,
            theme: DEFAULT_THEME.to_string(),
            themes: default_themes(),
            stats_file: default_stats_path(),
        }
    }
}
