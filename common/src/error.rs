//! エラー型定義

use std::path::PathBuf;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum PickerError {
    /// 対象フォルダが存在しない
    #[error("Folder not found: {0}")]
    NotFound(String),

    /// progress.cfg が非負整数として読めない（load内で自己修復される）
    #[error("Corrupt progress file: {0}")]
    CorruptProgress(String),

    /// 進捗・ログファイルへの書き込み失敗
    #[error("Write failed ({}): {source}", path.display())]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl PickerError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PickerError::IoWrite {
            path: path.into(),
            source,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, PickerError>;
