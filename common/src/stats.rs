use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};
use crate::games::tictactoe::Mark;
use crate::log;

/// Win counts per mark, stored as a flat `X: n` / `O: m` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    wins: BTreeMap<Mark, u32>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads stats from `path`. A missing, unreadable or malformed file
    /// gives empty stats.
    pub fn load(path: &Path) -> Self {
        let provider = FileContentConfigProvider::new(path);
        let content = match provider.get_config_content() {
            Ok(Some(content)) => content,
            Ok(None) => return Self::new(),
            Err(e) => {
                log!("Ignoring stats file: {}", e);
                return Self::new();
            }
        };

        match Self::from_yaml(&content) {
            Ok(stats) => stats,
            Err(e) => {
                log!("Ignoring stats file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = self.to_yaml()?;
        FileContentConfigProvider::new(path).set_config_content(&content)
    }

    fn from_yaml(content: &str) -> Result<Self, String> {
        let raw: BTreeMap<String, u32> = YamlConfigSerializer::new().deserialize(content)?;
        let mut stats = Self::new();
        for (key, count) in raw {
            match key.as_str() {
                "X" => stats.wins.insert(Mark::X, count),
                "O" => stats.wins.insert(Mark::O, count),
                _ => {
                    log!("Skipping unknown stats key {:?}", key);
                    None
                }
            };
        }
        Ok(stats)
    }

    fn to_yaml(&self) -> Result<String, String> {
        let raw: BTreeMap<String, u32> = self
            .wins
            .iter()
            .map(|(mark, count)| (mark.symbol().to_string(), *count))
            .collect();
        YamlConfigSerializer::new().serialize(&raw)
    }

    pub fn record_win(&mut self, mark: Mark) {
        if mark == Mark::Empty {
            return;
        }
        *self.wins.entry(mark).or_insert(0) += 1;
    }

    pub fn wins(&self, mark: Mark) -> u32 {
        self.wins.get(&mark).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_ttt_stats_{}.yaml", random_number))
    }

    #[test]
    fn test_missing_file_gives_empty_stats() {
        let stats = Stats::load(Path::new("this_stats_file_does_not_exist.yaml"));
        assert_eq!(stats, Stats::new());
        assert_eq!(stats.wins(Mark::X), 0);
    }

    #[test]
    fn test_malformed_file_gives_empty_stats() {
        let path = get_temp_file_path();
        std::fs::write(&path, "{ not: [valid").unwrap();
        assert_eq!(Stats::load(&path), Stats::new());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_directory_path_gives_empty_stats() {
        let stats = Stats::load(&std::env::temp_dir());
        assert_eq!(stats, Stats::new());
    }

    #[test]
    fn test_record_and_reload() {
        let path = get_temp_file_path();
        let mut stats = Stats::new();
        stats.record_win(Mark::X);
        stats.record_win(Mark::X);
        stats.record_win(Mark::O);
        stats.record_win(Mark::Empty);
        stats.save(&path).unwrap();

        let loaded = Stats::load(&path);
        assert_eq!(loaded.wins(Mark::X), 2);
        assert_eq!(loaded.wins(Mark::O), 1);
        assert_eq!(loaded, stats);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_file_is_flat_mapping() {
        let path = get_temp_file_path();
        std::fs::write(&path, "X: 4\nO: 7\nDraw: 2\n").unwrap();
        let stats = Stats::load(&path);
        assert_eq!(stats.wins(Mark::X), 4);
        assert_eq!(stats.wins(Mark::O), 7);

        stats.save(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "O: 7\nX: 4\n");

        let _ = std::fs::remove_file(path);
    }
}
