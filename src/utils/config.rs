use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::db::query::{ScriptOptions, DEFAULT_DELIMITER};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub script: ScriptOptions,
    pub default_delimiter: String,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            script: ScriptOptions::default(),
            default_delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("db2script");
            path.push("config.json");
            path
        })
    }

    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = serde_json::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::new()
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                match fs::create_dir_all(parent) {
                    Ok(()) => {}
                    Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
                }
            }
            let content = match serde_json::to_string_pretty(self) {
                Ok(content) => content,
                Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
            };
            match fs::write(path, content) {
                Ok(()) => {}
                Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct RunHistory {
    pub runs: Vec<RunHistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunHistoryEntry {
    pub path: String,
    pub timestamp: String,
    pub statement_count: usize,
    pub segment_count: usize,
    pub duration_ms: u64,
}

impl RunHistory {
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    pub fn history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|mut path| {
            path.push("db2script");
            path.push("history.json");
            path
        })
    }

    pub fn load() -> Self {
        if let Some(path) = Self::history_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(history) = serde_json::from_str(&content) {
                        return history;
                    }
                }
            }
        }
        Self::new()
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(path) = Self::history_path() {
            if let Some(parent) = path.parent() {
                match fs::create_dir_all(parent) {
                    Ok(()) => {}
                    Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
                }
            }
            let content = match serde_json::to_string_pretty(self) {
                Ok(content) => content,
                Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
            };
            match fs::write(path, content) {
                Ok(()) => {}
                Err(err) => { eprintln!("Config persistence error: {err}"); return Err(Box::new(err)); },
            }
        }
        Ok(())
    }

    pub fn add_entry(&mut self, entry: RunHistoryEntry) {
        self.runs.insert(0, entry);
        // Keep only last 1000 runs
        self.runs.truncate(1000);
    }
}
