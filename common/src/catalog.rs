//! カタログ構築
//!
//! フォルダ直下のクリップを拡張子で拾い、パス順に並べる。
//! 並び順は進捗インデックスの前提なので、同じファイル集合なら毎回同じ順序になること。

use crate::error::{PickerError, Result};
use crate::types::Item;
use std::path::Path;
use walkdir::WalkDir;

/// デフォルトの対象拡張子
pub const DEFAULT_EXTENSIONS: &[&str] = &["gif"];

/// パス順に並んだ分類対象一覧
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// `folder` 直下をスキャンしてカタログを作る
    ///
    /// フォルダが無ければ `NotFound`。該当ファイルが無い場合は空のカタログ（エラーではない）。
    pub fn build<S: AsRef<str>>(folder: &Path, extensions: &[S]) -> Result<Self> {
        if !folder.is_dir() {
            return Err(PickerError::NotFound(folder.display().to_string()));
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if let Some(ext) = path.extension() {
                let ext_str = ext.to_string_lossy();
                if extensions.iter().any(|e| {
                    let wanted: &str = e.as_ref();
                    wanted == ext_str
                }) {
                    items.push(Item::new(path));
                }
            }
        }

        items.sort();
        log::debug!("catalog {}: {} items", folder.display(), items.len());

        Ok(Self { items })
    }

    pub fn from_items(mut items: Vec<Item>) -> Self {
        items.sort();
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
