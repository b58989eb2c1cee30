use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::try_exists;

use crate::app::ctrl_key;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub keys: KeyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub max_lines: usize,
    pub max_line_length: usize,
    /// Width of the status message part of the status line.
    pub status_width: usize,
    /// Longest command line, `:` included.
    pub command_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Letter that, held with Ctrl, quits from insert mode.
    pub quit_key: char,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_lines: 1000,
            max_line_length: 1000,
            status_width: 20,
            command_capacity: 80,
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self { quit_key: 'q' }
    }
}

impl KeyConfig {
    pub fn quit_code(&self) -> u8 {
        ctrl_key(self.quit_key.to_ascii_lowercase() as u8)
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if try_exists(&config_path).await? {
                match tokio::fs::read_to_string(&config_path).await {
                    Ok(content) => {
                        if content.trim().is_empty() {
                            log::warn!("Config file is empty, using defaults");
                            return Ok(Self::default());
                        }

                        match serde_json::from_str::<Self>(&content) {
                            Ok(mut config) => {
                                config.validate();
                                log::info!(
                                    "Successfully loaded config from: {}",
                                    config_path.display()
                                );
                                return Ok(config);
                            }
                            Err(json_err) => {
                                log::error!("Failed to parse config file: {}", json_err);

                                let backup_path = config_path.with_extension("bak");
                                if let Err(e) = tokio::fs::copy(&config_path, &backup_path).await {
                                    log::warn!("Failed to backup broken config: {}", e);
                                } else {
                                    log::info!(
                                        "Backed up broken config to: {}",
                                        backup_path.display()
                                    );
                                }
                                return Ok(Self::default());
                            }
                        }
                    }
                    Err(io_err) => {
                        log::error!("Failed to read config file: {}", io_err);
                        return Ok(Self::default());
                    }
                }
            } else {
                log::info!("Config file does not exist, creating default");
            }
        }

        let default_config = Self::default();
        if let Err(e) = default_config.save().await {
            log::warn!("Could not write default config: {}", e);
        }
        Ok(default_config)
    }

    pub async fn save(&self) -> Result<()> {
        let Some(config_path) = Self::config_path() else {
            return Ok(());
        };

        let mut config_to_save = self.clone();
        config_to_save.validate();

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }

        let content = serde_json::to_string_pretty(&config_to_save)?;
        tokio::fs::write(&config_path, content).await.map_err(|e| {
            anyhow::anyhow!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            )
        })?;
        log::info!("Successfully saved config to: {}", config_path.display());
        Ok(())
    }

    /// Replace out-of-range values with defaults.
    pub fn validate(&mut self) {
        let defaults = EditorConfig::default();
        let mut has_issues = false;

        if self.editor.max_lines == 0 {
            log::warn!("Invalid max_lines: 0, using default");
            self.editor.max_lines = defaults.max_lines;
            has_issues = true;
        }

        if self.editor.max_line_length == 0 {
            log::warn!("Invalid max_line_length: 0, using default");
            self.editor.max_line_length = defaults.max_line_length;
            has_issues = true;
        }

        if self.editor.status_width == 0 {
            log::warn!("Invalid status_width: 0, using default");
            self.editor.status_width = defaults.status_width;
            has_issues = true;
        }

        if self.editor.command_capacity < 2 {
            log::warn!(
                "Invalid command_capacity: {}, using default",
                self.editor.command_capacity
            );
            self.editor.command_capacity = defaults.command_capacity;
            has_issues = true;
        }

        if !self.keys.quit_key.is_ascii_alphabetic() {
            log::warn!("Invalid quit_key: {:?}, using default", self.keys.quit_key);
            self.keys.quit_key = KeyConfig::default().quit_key;
            has_issues = true;
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("VIMLET_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("VIMLET_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "vimlet", "vimlet")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
