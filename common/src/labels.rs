//! 表示中ページのラベル状態
//!
//! ページを読み込むたびに全アイテム `Valid` で作り直す。
//! ページをまたいで残るのはコミット済みのログだけ。

use crate::catalog::Catalog;
use crate::page::PageWindow;
use crate::types::{Item, Label};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    /// スロット順（埋まっているスロットのみ）
    entries: Vec<(Item, Label)>,
}

impl LabelSet {
    pub fn for_window(catalog: &Catalog, window: &PageWindow) -> Self {
        let entries = catalog.items()[window.range()]
            .iter()
            .map(|item| (item.clone(), Label::Valid))
            .collect();
        Self { entries }
    }

    /// 同じカテゴリなら `Valid` に戻し、違えば切り替える
    ///
    /// ページに無いアイテムは何もしない。ラベルが変わったら `true`。
    pub fn toggle(&mut self, item: &Item, category: Label) -> bool {
        match self.entries.iter_mut().find(|(i, _)| i == item) {
            Some(entry) => Self::apply(entry, category),
            None => false,
        }
    }

    /// スロット番号で指定する版。空きスロットは何もしない
    pub fn toggle_slot(&mut self, slot: usize, category: Label) -> bool {
        match self.entries.get_mut(slot) {
            Some(entry) => Self::apply(entry, category),
            None => false,
        }
    }

    fn apply(entry: &mut (Item, Label), category: Label) -> bool {
        let before = entry.1;
        entry.1 = before.toggled(category);
        log::debug!("{}: {} -> {}", entry.0.file_name(), before, entry.1);
        before != entry.1
    }

    pub fn label_of(&self, item: &Item) -> Option<Label> {
        self.entries.iter().find(|(i, _)| i == item).map(|(_, l)| *l)
    }

    pub fn label_of_slot(&self, slot: usize) -> Option<Label> {
        self.entries.get(slot).map(|(_, l)| *l)
    }

    /// スロット順のスナップショット
    pub fn snapshot(&self) -> Vec<(Item, Label)> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
