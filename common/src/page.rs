//! ページ分割
//!
//! カタログのインデックス空間を固定サイズのページに区切る。
//! 表示スロット数は常に `page_size` で、カタログ末尾を超えた分は空きスロット。

use crate::catalog::Catalog;
use crate::types::Item;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 16;

/// 表示中のページ `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// 埋まっているスロット数
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slot_count(&self) -> usize {
        self.page_size
    }

    /// スロット順のアイテム（空きスロットは `None`）
    pub fn slots<'a>(&self, catalog: &'a Catalog) -> Vec<Slot<'a>> {
        (0..self.page_size)
            .map(|index| Slot {
                index,
                item: if self.start + index < self.end {
                    catalog.get(self.start + index)
                } else {
                    None
                },
            })
            .collect()
    }
}

/// ページ内の1スロット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub index: usize,
    pub item: Option<&'a Item>,
}

/// `[index, min(index + page_size, catalog_len))`
pub fn window_for(catalog_len: usize, index: usize, page_size: usize) -> PageWindow {
    let start = index.min(catalog_len);
    let end = index.saturating_add(page_size).min(catalog_len);
    PageWindow {
        start,
        end: end.max(start),
        page_size,
    }
}

/// 次ページの先頭。カタログ長ではクランプしない
pub fn advance(index: usize, page_size: usize) -> usize {
    index.saturating_add(page_size)
}

pub fn is_complete(index: usize, catalog_len: usize) -> bool {
    index >= catalog_len
}

/// 進捗率 (0.0〜100.0)
pub fn progress_percent(index: usize, catalog_len: usize) -> f64 {
    if catalog_len == 0 {
        return 100.0;
    }
    (index as f64 / catalog_len as f64 * 100.0).min(100.0)
}

/// グリッドの (行数, 列数)。行 = floor(sqrt(n)), 列 = ceil(n / 行)
pub fn grid_shape(page_size: usize) -> (usize, usize) {
    if page_size == 0 {
        return (0, 0);
    }
    let rows = ((page_size as f64).sqrt().floor() as usize).max(1);
    let cols = page_size.div_ceil(rows);
    (rows, cols)
}
