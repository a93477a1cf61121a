//! 進捗の確認（読み取りのみ）

use crate::error::Result;
use picker_common::commit_log::{self, CategoryCounts};
use picker_common::page::progress_percent;
use picker_common::{progress, Catalog, Label, SessionOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatus {
    pub source_dir: PathBuf,
    pub catalog_len: usize,
    /// まだ一度も開いていなければ `None`
    pub state_dir: Option<PathBuf>,
    pub next_index: Option<usize>,
    pub percent: f64,
    pub counts: CategoryCounts,
}

/// フォルダの進捗を集める。状態フォルダの作成や進捗の修復はしない
pub fn collect(folder: &Path, options: &SessionOptions) -> Result<ProjectStatus> {
    let catalog = Catalog::build(folder, options.extensions.as_slice())?;
    let base_dir = options.output_dir.as_deref().unwrap_or(folder);

    let state_dir = progress::locate_state_dir(&catalog, base_dir).filter(|dir| dir.is_dir());

    let (next_index, counts) = match &state_dir {
        Some(dir) => (progress::peek(dir), commit_log::counts(dir)?),
        None => (None, CategoryCounts::default()),
    };

    Ok(ProjectStatus {
        source_dir: folder.to_path_buf(),
        catalog_len: catalog.len(),
        percent: progress_percent(next_index.unwrap_or(0), catalog.len()),
        state_dir,
        next_index,
        counts,
    })
}

pub fn print_status(status: &ProjectStatus) {
    println!("📂 {}", status.source_dir.display());
    println!("  クリップ数: {}", status.catalog_len);

    let Some(state_dir) = &status.state_dir else {
        if status.catalog_len == 0 {
            println!("  対象のクリップがありません");
        } else {
            println!("  進捗: まだ開始していません");
        }
        return;
    };

    println!("  状態フォルダ: {}", state_dir.display());
    match status.next_index {
        Some(index) => println!(
            "  進捗: {}/{} ({:.2}%)",
            index.min(status.catalog_len),
            status.catalog_len,
            status.percent
        ),
        None => println!("  進捗: progress.cfg が読めません（次回オープン時に0へ戻ります）"),
    }

    for label in Label::ALL {
        println!("  {:<18} {}", label.category_file(), status.counts.get(label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picker_common::Session;
    use std::fs::File;
    use tempfile::tempdir;

    fn make_clips(dir: &Path, count: usize) {
        for i in 0..count {
            File::create(dir.join(format!("{:04}.gif", i))).unwrap();
        }
    }

    #[test]
    fn test_status_before_first_open() {
        let dir = tempdir().unwrap();
        make_clips(dir.path(), 5);

        let status = collect(dir.path(), &SessionOptions::default()).unwrap();
        assert_eq!(status.catalog_len, 5);
        assert!(status.state_dir.is_none());
        assert!(status.next_index.is_none());
        assert!(!dir.path().join("picker_0000-0004").exists());
    }

    #[test]
    fn test_status_after_commit() {
        let dir = tempdir().unwrap();
        make_clips(dir.path(), 20);

        let mut session = Session::default();
        session.open_project(dir.path()).unwrap();
        session.toggle(1, Label::Border);
        session.request_advance().unwrap();

        let status = collect(dir.path(), &SessionOptions::default()).unwrap();
        assert_eq!(status.next_index, Some(16));
        assert_eq!(status.percent, 80.0);
        assert_eq!(status.counts.border, 1);
        assert_eq!(status.counts.valid, 15);
    }

    #[test]
    fn test_status_json_field_names() {
        let dir = tempdir().unwrap();
        make_clips(dir.path(), 2);

        let status = collect(dir.path(), &SessionOptions::default()).unwrap();
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["catalogLen"], 2);
        assert_eq!(json["counts"]["sceneCut"], 0);
        assert_eq!(json["counts"]["screenContent"], 0);
    }
}
