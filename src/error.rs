use picker_common::PickerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbPickerError {
    #[error(transparent)]
    Picker(#[from] PickerError),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON出力エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl ThumbPickerError {
    /// 対象フォルダが無い・開けない場合は「開かない」だけで、異常終了にはしない
    pub fn is_not_found(&self) -> bool {
        matches!(self, ThumbPickerError::Picker(PickerError::NotFound(_)))
    }
}

pub type Result<T> = std::result::Result<T, ThumbPickerError>;
