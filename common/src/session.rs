//! セッション制御
//!
//! フォルダを開く → 進捗から再開 → ページ表示 → ラベル付け → ページ送り（コミット）
//! を繰り返し、全アイテムを処理したら `Finished` になる。
//!
//! 表示層とのやりとりは `open_project` / `toggle` / `request_advance` の3つと、
//! それらが返す `Transition` だけ。状態遷移は呼び出しごとに完結する（並行呼び出しは想定しない）。

use crate::catalog::{Catalog, DEFAULT_EXTENSIONS};
use crate::commit_log::{self, CategoryCounts};
use crate::error::Result;
use crate::labels::LabelSet;
use crate::page::{self, PageWindow, DEFAULT_PAGE_SIZE};
use crate::progress;
use crate::types::{Item, Label};
use std::path::{Path, PathBuf};

const TITLE: &str = "Thumbnail Picker";

/// セッション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub page_size: usize,
    pub extensions: Vec<String>,
    /// 状態フォルダの置き場所。`None` なら対象フォルダ自身
    pub output_dir: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    /// open_project の実行中のみ
    Loading,
    Active(PageWindow),
    Finished,
}

/// 表示層に渡す1スロット分の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub index: usize,
    pub path: Option<PathBuf>,
}

impl SlotView {
    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }

    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .map(|p| Item::new(p).file_name())
    }
}

/// 操作の結果、表示層がやるべきこと
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 該当アイテムなし。何も開かない
    NothingToOpen,
    /// このページを表示する（常に page_size 個）
    Page(Vec<SlotView>),
    /// 全件完了。完了通知を出す
    Finished,
}

#[derive(Debug)]
struct Project {
    source_dir: PathBuf,
    catalog: Catalog,
    state_dir: PathBuf,
}

#[derive(Debug)]
pub struct Session {
    options: SessionOptions,
    state: SessionState,
    project: Option<Project>,
    progress: usize,
    labels: LabelSet,
}

impl Session {
    /// `page_size` 0 は 1 に切り上げる（0 だとページが進まない）
    pub fn new(mut options: SessionOptions) -> Self {
        options.page_size = options.page_size.max(1);
        Self {
            options,
            state: SessionState::Closed,
            project: None,
            progress: 0,
            labels: LabelSet::default(),
        }
    }

    /// フォルダを開き、保存済みの進捗から再開する
    ///
    /// 開いていたプロジェクトの未コミットのラベルは破棄される。
    /// カタログ構築や状態フォルダ作成に失敗した場合は `Closed` のままエラーを返す。
    pub fn open_project(&mut self, folder: &Path) -> Result<Transition> {
        self.project = None;
        self.labels = LabelSet::default();
        self.progress = 0;
        self.state = SessionState::Loading;

        let loaded = self.load_project(folder);
        let (project, progress) = match loaded {
            Ok(Some(loaded)) => loaded,
            Ok(None) => {
                self.state = SessionState::Closed;
                log::info!("{}: no items, nothing to open", folder.display());
                return Ok(Transition::NothingToOpen);
            }
            Err(e) => {
                self.state = SessionState::Closed;
                return Err(e);
            }
        };

        log::info!(
            "opened {} ({} items), state dir {}, resuming at {}",
            project.source_dir.display(),
            project.catalog.len(),
            project.state_dir.display(),
            progress
        );

        self.project = Some(project);
        self.progress = progress;
        Ok(self.load_page())
    }

    fn load_project(&self, folder: &Path) -> Result<Option<(Project, usize)>> {
        let catalog = Catalog::build(folder, self.options.extensions.as_slice())?;
        if catalog.is_empty() {
            return Ok(None);
        }

        let base_dir = self.options.output_dir.as_deref().unwrap_or(folder);
        let state_dir = progress::resolve_state_dir(&catalog, base_dir)?;
        let index = progress::load(&state_dir)?;

        let project = Project {
            source_dir: folder.to_path_buf(),
            catalog,
            state_dir,
        };
        Ok(Some((project, index)))
    }

    /// 現在の進捗位置のページを読み込む（ラベルは作り直し）
    fn load_page(&mut self) -> Transition {
        let Some(project) = self.project.as_ref() else {
            self.state = SessionState::Closed;
            return Transition::NothingToOpen;
        };

        let len = project.catalog.len();
        if page::is_complete(self.progress, len) {
            self.labels = LabelSet::default();
            self.state = SessionState::Finished;
            log::info!("{}: all {} items classified", project.source_dir.display(), len);
            return Transition::Finished;
        }

        let window = page::window_for(len, self.progress, self.options.page_size);
        log::debug!("page {:?} of {}", window.range(), len);
        self.labels = LabelSet::for_window(&project.catalog, &window);
        self.state = SessionState::Active(window);
        Transition::Page(self.current_slots())
    }

    /// スロットのラベルをトグルする
    ///
    /// `Active` 以外や空きスロットでは何もしない。ラベルが変わったら `true`。
    pub fn toggle(&mut self, slot: usize, category: Label) -> bool {
        if !self.is_active() {
            return false;
        }
        self.labels.toggle_slot(slot, category)
    }

    /// アイテム指定でトグルする。表示中のページに無ければ何もしない
    pub fn toggle_item(&mut self, item: &Item, category: Label) -> bool {
        if !self.is_active() {
            return false;
        }
        self.labels.toggle(item, category)
    }

    /// 現在のページをコミットして次へ進む
    ///
    /// 1. 進捗 = 現在ページ先頭 を保存
    /// 2. ラベルをカテゴリ別ログに追記
    /// 3. 進捗 = 次ページ先頭 を保存
    /// 4. 次ページを読み込む（無ければ `Finished`）
    ///
    /// 書き込みエラーはそのまま返す（リトライしない）。その場合の状態は変えない。
    /// `Closed` / `Finished` では何もしない。
    pub fn request_advance(&mut self) -> Result<Transition> {
        let window = match self.state {
            SessionState::Active(window) => window,
            SessionState::Finished => return Ok(Transition::Finished),
            SessionState::Closed | SessionState::Loading => return Ok(Transition::NothingToOpen),
        };
        let Some(project) = self.project.as_ref() else {
            return Ok(Transition::NothingToOpen);
        };

        progress::save(&project.state_dir, window.start)?;

        let snapshot = self.labels.snapshot();
        commit_log::append(&project.state_dir, &snapshot)?;

        let next = page::advance(window.start, self.options.page_size);
        progress::save(&project.state_dir, next)?;

        let counts = CategoryCounts::from_labels(&snapshot);
        log::info!(
            "committed {:?}: valid={} border={} sceneCut={} screenContent={}",
            window.range(),
            counts.valid,
            counts.border,
            counts.scene_cut,
            counts.screen_content
        );

        self.progress = next;
        Ok(self.load_page())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn current_window(&self) -> Option<PageWindow> {
        match self.state {
            SessionState::Active(window) => Some(window),
            _ => None,
        }
    }

    /// 表示中ページのスロット一覧（`Active` 以外は空）
    pub fn current_slots(&self) -> Vec<SlotView> {
        let (Some(window), Some(project)) = (self.current_window(), self.project.as_ref()) else {
            return Vec::new();
        };
        window
            .slots(&project.catalog)
            .into_iter()
            .map(|slot| SlotView {
                index: slot.index,
                path: slot.item.map(|item| item.path().to_path_buf()),
            })
            .collect()
    }

    pub fn label_of_slot(&self, slot: usize) -> Option<Label> {
        if !self.is_active() {
            return None;
        }
        self.labels.label_of_slot(slot)
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// 次にコミットされるアイテムのインデックス
    pub fn progress_index(&self) -> usize {
        self.progress
    }

    pub fn catalog_len(&self) -> usize {
        self.project.as_ref().map_or(0, |p| p.catalog.len())
    }

    pub fn progress_percent(&self) -> f64 {
        match self.project {
            Some(_) => page::progress_percent(self.progress, self.catalog_len()),
            None => 0.0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.project.as_ref().map(|p| p.source_dir.as_path())
    }

    pub fn state_dir(&self) -> Option<&Path> {
        self.project.as_ref().map(|p| p.state_dir.as_path())
    }

    /// ウィンドウタイトル
    pub fn title(&self) -> String {
        match self.source_dir() {
            Some(dir) => format!("{}: {}", TITLE, dir.display()),
            None => TITLE.to_string(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn make_clips(dir: &Path, count: usize) {
        for i in 0..count {
            File::create(dir.join(format!("clip{:03}.gif", i))).unwrap();
        }
    }

    #[test]
    fn test_new_session_is_closed() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(session.title(), "Thumbnail Picker");
        assert!(session.current_slots().is_empty());
    }

    #[test]
    fn test_open_missing_folder_stays_closed() {
        let mut session = Session::default();
        let result = session.open_project(Path::new("/nonexistent/clips"));
        assert!(result.is_err());
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_toggle_when_closed_is_noop() {
        let mut session = Session::default();
        assert!(!session.toggle(0, Label::Border));
    }

    #[test]
    fn test_advance_when_closed_is_noop() {
        let mut session = Session::default();
        assert_eq!(session.request_advance().unwrap(), Transition::NothingToOpen);
    }

    #[test]
    fn test_open_emits_full_slot_list() {
        let dir = tempdir().unwrap();
        make_clips(dir.path(), 5);

        let mut session = Session::new(SessionOptions { page_size: 4, ..Default::default() });
        let Transition::Page(slots) = session.open_project(dir.path()).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].file_name().as_deref(), Some("clip000.gif"));
        assert!(session.title().starts_with("Thumbnail Picker: "));
    }

    #[test]
    fn test_zero_page_size_still_finishes() {
        let dir = tempdir().unwrap();
        make_clips(dir.path(), 2);

        let mut session = Session::new(SessionOptions { page_size: 0, ..Default::default() });
        assert_eq!(session.page_size(), 1);

        let Transition::Page(slots) = session.open_project(dir.path()).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(slots.len(), 1);
        assert!(matches!(session.request_advance().unwrap(), Transition::Page(_)));
        assert_eq!(session.request_advance().unwrap(), Transition::Finished);
        assert_eq!(session.state(), SessionState::Finished);
    }

    #[test]
    fn test_toggle_empty_slot_is_noop() {
        let dir = tempdir().unwrap();
        make_clips(dir.path(), 2);

        let mut session = Session::new(SessionOptions { page_size: 4, ..Default::default() });
        session.open_project(dir.path()).unwrap();
        assert!(!session.toggle(3, Label::Border));
        assert_eq!(session.label_of_slot(3), None);
        assert!(session.toggle(1, Label::Border));
        assert_eq!(session.label_of_slot(1), Some(Label::Border));
    }

    #[test]
    fn test_output_dir_override() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        make_clips(src.path(), 3);

        let mut session = Session::new(SessionOptions {
            output_dir: Some(out.path().to_path_buf()),
            ..Default::default()
        });
        session.open_project(src.path()).unwrap();

        let state_dir = session.state_dir().unwrap().to_path_buf();
        assert_eq!(state_dir, out.path().join("picker_clip000-clip002"));
        assert!(!src.path().join("picker_clip000-clip002").exists());
    }

    #[test]
    fn test_reopen_discards_uncommitted_labels() {
        let dir = tempdir().unwrap();
        make_clips(dir.path(), 3);

        let mut session = Session::default();
        session.open_project(dir.path()).unwrap();
        session.toggle(0, Label::SceneCut);
        session.open_project(dir.path()).unwrap();
        assert_eq!(session.label_of_slot(0), Some(Label::Valid));
        assert_eq!(session.progress_index(), 0);
    }
}
