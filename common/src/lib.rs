//! Thumbnail Picker Common Library
//!
//! クリップを固定サイズのページ単位で表示し、排他的なカテゴリに振り分ける
//! 分類セッションのエンジン。CLIとデスクトップ版で共有する。
//!
//! - catalog: 対象クリップの列挙と並び順
//! - progress: 再開位置の保存・読み込み
//! - page: ページ境界の計算
//! - labels: 表示中ページのラベル状態
//! - commit_log: カテゴリ別の追記ログ
//! - session: 上記をまとめる状態機械
//! - config: ページサイズ等のユーザー設定

pub mod types;
pub mod error;
pub mod catalog;
pub mod progress;
pub mod page;
pub mod labels;
pub mod commit_log;
pub mod session;
pub mod config;

pub use types::{Item, Label};
pub use error::{PickerError, Result};
pub use catalog::{Catalog, DEFAULT_EXTENSIONS};
pub use page::{PageWindow, Slot, DEFAULT_PAGE_SIZE, grid_shape};
pub use labels::LabelSet;
pub use commit_log::CategoryCounts;
pub use config::Config;
pub use session::{Session, SessionOptions, SessionState, SlotView, Transition};
