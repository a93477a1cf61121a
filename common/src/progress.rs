//! 進捗の永続化
//!
//! プロジェクトごとの状態フォルダ `picker_{先頭}-{末尾}` に
//! `progress.cfg`（次に処理するアイテムのインデックス1つだけ）を置く。

use crate::catalog::Catalog;
use crate::error::{PickerError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const PROGRESS_FILE_NAME: &str = "progress.cfg";
const STATE_DIR_PREFIX: &str = "picker_";

/// 状態フォルダ名（カタログの先頭・末尾アイテムから決まる）
///
/// 空のカタログには状態フォルダが無い。
pub fn state_dir_name(catalog: &Catalog) -> Option<String> {
    let first = catalog.first()?;
    let last = catalog.last()?;
    Some(format!("{}{}-{}", STATE_DIR_PREFIX, first.stem(), last.stem()))
}

/// 状態フォルダのパスを計算する（作成しない）
pub fn locate_state_dir(catalog: &Catalog, base_dir: &Path) -> Option<PathBuf> {
    state_dir_name(catalog).map(|name| base_dir.join(name))
}

/// 状態フォルダのパスを計算し、無ければ作成する
pub fn resolve_state_dir(catalog: &Catalog, base_dir: &Path) -> Result<PathBuf> {
    let dir = locate_state_dir(catalog, base_dir)
        .ok_or_else(|| PickerError::NotFound(format!("{} (no items)", base_dir.display())))?;
    fs::create_dir_all(&dir).map_err(|e| PickerError::write(&dir, e))?;
    Ok(dir)
}

pub fn progress_path(state_dir: &Path) -> PathBuf {
    state_dir.join(PROGRESS_FILE_NAME)
}

/// progress.cfg の中身を解釈する（前後の空白は許容）
pub fn parse_progress(content: &str) -> Result<usize> {
    let trimmed = content.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| PickerError::CorruptProgress(format!("{:?}", trimmed)))
}

/// 進捗を読み込む
///
/// - ファイルが無い → 0を書き込んで0を返す
/// - 読めない/壊れている → 0で上書きして0を返す（致命的にはしない）
pub fn load(state_dir: &Path) -> Result<usize> {
    let path = progress_path(state_dir);

    if !path.exists() {
        save(state_dir, 0)?;
        return Ok(0);
    }

    let parsed = fs::read_to_string(&path)
        .map_err(PickerError::from)
        .and_then(|content| parse_progress(&content));

    match parsed {
        Ok(index) => Ok(index),
        Err(e) => {
            log::warn!("{}: {}, resetting to 0", path.display(), e);
            save(state_dir, 0)?;
            Ok(0)
        }
    }
}

/// 修復せずに読む（status表示用）
pub fn peek(state_dir: &Path) -> Option<usize> {
    let content = fs::read_to_string(progress_path(state_dir)).ok()?;
    parse_progress(&content).ok()
}

/// 進捗を保存する
///
/// 一時ファイルに書いてからリネームするので、途中で落ちても
/// 古い値か新しい値のどちらかが残る。
pub fn save(state_dir: &Path, index: usize) -> Result<()> {
    let path = progress_path(state_dir);

    let mut tmp = NamedTempFile::new_in(state_dir).map_err(|e| PickerError::write(&path, e))?;
    write!(tmp, "{}", index).map_err(|e| PickerError::write(&path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PickerError::write(&path, e))?;
    tmp.persist(&path)
        .map_err(|e| PickerError::write(&path, e.error))?;

    log::debug!("progress {} -> {}", path.display(), index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;
    use tempfile::tempdir;

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::from_items(names.iter().map(|n| Item::new(format!("/clips/{}", n))).collect())
    }

    #[test]
    fn test_state_dir_name() {
        let c = catalog(&["0001.gif", "0002.gif", "0040.gif"]);
        assert_eq!(state_dir_name(&c).unwrap(), "picker_0001-0040");
    }

    #[test]
    fn test_state_dir_name_single_item() {
        let c = catalog(&["only.gif"]);
        assert_eq!(state_dir_name(&c).unwrap(), "picker_only-only");
    }

    #[test]
    fn test_state_dir_name_empty() {
        assert!(state_dir_name(&Catalog::default()).is_none());
    }

    #[test]
    fn test_resolve_creates_dir() {
        let dir = tempdir().unwrap();
        let c = catalog(&["a.gif", "b.gif"]);
        let state_dir = resolve_state_dir(&c, dir.path()).unwrap();
        assert!(state_dir.is_dir());
        assert_eq!(state_dir, dir.path().join("picker_a-b"));

        // 2回目も同じパス
        assert_eq!(resolve_state_dir(&c, dir.path()).unwrap(), state_dir);
    }

    #[test]
    fn test_parse_progress() {
        assert_eq!(parse_progress("16").unwrap(), 16);
        assert_eq!(parse_progress(" 32\n").unwrap(), 32);
        assert!(matches!(parse_progress(""), Err(PickerError::CorruptProgress(_))));
        assert!(matches!(parse_progress("-1"), Err(PickerError::CorruptProgress(_))));
        assert!(matches!(parse_progress("abc"), Err(PickerError::CorruptProgress(_))));
    }

    #[test]
    fn test_load_initializes_missing_file() {
        let dir = tempdir().unwrap();
        assert_eq!(load(dir.path()).unwrap(), 0);
        assert_eq!(fs::read_to_string(progress_path(dir.path())).unwrap(), "0");
    }

    #[test]
    fn test_load_heals_corrupt_file() {
        let dir = tempdir().unwrap();
        fs::write(progress_path(dir.path()), "not a number").unwrap();

        assert_eq!(load(dir.path()).unwrap(), 0);
        assert_eq!(fs::read_to_string(progress_path(dir.path())).unwrap(), "0");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        save(dir.path(), 1600).unwrap();
        save(dir.path(), 16).unwrap();

        assert_eq!(fs::read_to_string(progress_path(dir.path())).unwrap(), "16");
        assert_eq!(load(dir.path()).unwrap(), 16);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        save(dir.path(), 3).unwrap();
        save(dir.path(), 4).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_peek_does_not_heal() {
        let dir = tempdir().unwrap();
        assert_eq!(peek(dir.path()), None);

        fs::write(progress_path(dir.path()), "garbage").unwrap();
        assert_eq!(peek(dir.path()), None);
        assert_eq!(fs::read_to_string(progress_path(dir.path())).unwrap(), "garbage");
    }
}
