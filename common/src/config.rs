//! ユーザー設定
//!
//! `~/.config/thumb-picker/config.json` に保存する。無ければデフォルト値。

use crate::catalog::DEFAULT_EXTENSIONS;
use crate::error::{PickerError, Result};
use crate::page::DEFAULT_PAGE_SIZE;
use crate::session::SessionOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 1ページのスロット数
    pub page_size: usize,
    /// 対象拡張子（大文字小文字を区別）
    pub extensions: Vec<String>,
    /// 状態フォルダの置き場所（未設定なら対象フォルダ）
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PickerError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("thumb-picker").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PickerError::Config("page_size must be at least 1".into()));
        }
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(PickerError::Config("at least one extension is required".into()));
        }
        Ok(())
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(PickerError::Config("page_size must be at least 1".into()));
        }
        self.page_size = page_size;
        Ok(())
    }

    /// `gif,webp` / `.gif` などを受け付ける
    pub fn set_extensions(&mut self, list: &str) -> Result<()> {
        let extensions: Vec<String> = list
            .split(',')
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if extensions.is_empty() {
            return Err(PickerError::Config(format!("no extensions in {:?}", list)));
        }
        self.extensions = extensions;
        Ok(())
    }

    /// 実行時の上書きを反映したセッション設定
    pub fn session_options(
        &self,
        page_size: Option<usize>,
        output_dir: Option<PathBuf>,
    ) -> Result<SessionOptions> {
        let page_size = page_size.unwrap_or(self.page_size);
        if page_size == 0 {
            return Err(PickerError::Config("page_size must be at least 1".into()));
        }
        Ok(SessionOptions {
            page_size,
            extensions: self.extensions.clone(),
            output_dir: output_dir.or_else(|| self.output_dir.clone()),
        })
    }
}
