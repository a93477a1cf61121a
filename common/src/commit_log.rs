//! カテゴリ別追記ログ
//!
//! ページ送りのたびに、表示していたアイテムのファイル名を
//! ラベルに対応する `*.out` へ1行ずつ追記する。既存行は書き換えない。

use crate::error::{PickerError, Result};
use crate::types::{Item, Label};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// ラベルを各カテゴリのログに追記する（スロット順を維持）
pub fn append(state_dir: &Path, labels: &[(Item, Label)]) -> Result<()> {
    let mut writers: HashMap<Label, BufWriter<File>> = HashMap::new();

    for label in Label::ALL {
        let path = state_dir.join(label.category_file());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| PickerError::write(&path, e))?;
        writers.insert(label, BufWriter::new(file));
    }

    for (item, label) in labels {
        if let Some(writer) = writers.get_mut(label) {
            writeln!(writer, "{}", item.file_name())
                .map_err(|e| PickerError::write(state_dir.join(label.category_file()), e))?;
        }
    }

    for label in Label::ALL {
        if let Some(mut writer) = writers.remove(&label) {
            writer
                .flush()
                .map_err(|e| PickerError::write(state_dir.join(label.category_file()), e))?;
        }
    }

    Ok(())
}

/// カテゴリごとの行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub valid: usize,
    pub border: usize,
    pub scene_cut: usize,
    pub screen_content: usize,
}

impl CategoryCounts {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Valid => self.valid,
            Label::Border => self.border,
            Label::SceneCut => self.scene_cut,
            Label::ScreenContent => self.screen_content,
        }
    }

    fn slot(&mut self, label: Label) -> &mut usize {
        match label {
            Label::Valid => &mut self.valid,
            Label::Border => &mut self.border,
            Label::SceneCut => &mut self.scene_cut,
            Label::ScreenContent => &mut self.screen_content,
        }
    }

    pub fn total(&self) -> usize {
        self.valid + self.border + self.scene_cut + self.screen_content
    }

    /// 1ページ分のラベルを集計
    pub fn from_labels(labels: &[(Item, Label)]) -> Self {
        let mut counts = Self::default();
        for (_, label) in labels {
            *counts.slot(*label) += 1;
        }
        counts
    }
}

/// 各ログの行数を数える（ファイルが無ければ0）
pub fn counts(state_dir: &Path) -> Result<CategoryCounts> {
    let mut counts = CategoryCounts::default();

    for label in Label::ALL {
        let path = state_dir.join(label.category_file());
        if !path.exists() {
            continue;
        }
        let reader = BufReader::new(File::open(&path)?);
        let mut lines = 0;
        for line in reader.lines() {
            if !line?.is_empty() {
                lines += 1;
            }
        }
        *counts.slot(label) = lines;
    }

    Ok(counts)
}
