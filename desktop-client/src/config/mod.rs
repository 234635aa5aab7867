mod main_config;
mod theme;

pub(crate) use ttt_common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use main_config::{Config, default_config_path, get_config_manager};
pub use theme::{Rgb, Theme};
