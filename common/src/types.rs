//! 分類対象の型定義
//!
//! - Item: 1本のクリップ（パスで識別）
//! - Label: 排他的な分類カテゴリ

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 分類対象のクリップ
///
/// 同一性はパスで決まる。カタログ構築後は不変。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    path: PathBuf,
}

impl Item {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// パス末尾のファイル名（拡張子付き）。ログにはこの文字列が書かれる
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// 最初の `.` より前の部分（`clip.part1.gif` → `clip`）
    pub fn stem(&self) -> String {
        let name = self.file_name();
        match name.split_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => name,
        }
    }
}

/// 分類ラベル
///
/// `Valid` は「特別なタグなし」を表すデフォルト。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    #[default]
    Valid,
    Border,
    SceneCut,
    ScreenContent,
}

impl Label {
    /// ログファイル順
    pub const ALL: [Label; 4] = [Label::Valid, Label::Border, Label::SceneCut, Label::ScreenContent];

    /// トグル可能なカテゴリ（Valid以外）
    pub const CATEGORIES: [Label; 3] = [Label::Border, Label::SceneCut, Label::ScreenContent];

    pub fn key(&self) -> &'static str {
        match self {
            Label::Valid => "valid",
            Label::Border => "border",
            Label::SceneCut => "sceneCut",
            Label::ScreenContent => "screenContent",
        }
    }

    /// カテゴリごとの追記ログファイル名
    pub fn category_file(&self) -> &'static str {
        match self {
            Label::Valid => "valid.out",
            Label::Border => "border.out",
            Label::SceneCut => "sceneCut.out",
            Label::ScreenContent => "screenContent.out",
        }
    }

    /// ボタン表示用の1文字
    pub fn shortcut(&self) -> char {
        match self {
            Label::Valid => '-',
            Label::Border => 'B',
            Label::SceneCut => 'C',
            Label::ScreenContent => 'S',
        }
    }

    /// 選択中ボタンの背景色 (RGB)
    pub fn color(&self) -> [u8; 3] {
        match self {
            Label::Valid => [0xAD, 0xFF, 0x2F],
            Label::Border => [0x00, 0x00, 0x00],
            Label::SceneCut => [0xFF, 0x00, 0x00],
            Label::ScreenContent => [0x00, 0xFF, 0x00],
        }
    }

    /// 同じカテゴリなら解除、違えば切り替え
    pub fn toggled(self, category: Label) -> Label {
        if self == category {
            Label::Valid
        } else {
            category
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// トグル操作で指定できるラベルのみ受け付ける（`Valid` は未指定時の状態）
impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "border" | "b" | "B" => Ok(Label::Border),
            "sceneCut" | "scenecut" | "c" | "C" => Ok(Label::SceneCut),
            "screenContent" | "screencontent" | "s" | "S" => Ok(Label::ScreenContent),
            _ => Err(format!("Unknown label: {}. Use b (border), c (sceneCut) or s (screenContent)", s)),
        }
    }
}
