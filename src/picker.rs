//! 対話式の分類画面（ターミナル版）
//!
//! 1ページ分のスロットをグリッド表示し、`<スロット> <b|c|s>` でラベルをトグル、
//! `n` で次ページ（コミット）、`q` で中断する。

use crate::error::{Result, ThumbPickerError};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use picker_common::{grid_shape, Label, Session, SessionOptions, SlotView, Transition};
use std::path::Path;

pub const FINISH_MESSAGE: &str = "You have finished the classification of all the thumbnails !!!";
const NAME_WIDTH: usize = 22;

/// 入力1行分の操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    /// (スロット, カテゴリ) の組を順にトグル
    Toggle(Vec<(usize, Label)>),
    /// コミットして次ページへ
    Advance,
    /// コミットせずに終了
    Quit,
    Help,
    /// 再表示
    Redraw,
}

/// セッションの終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NothingToOpen,
    Finished,
    Quit,
}

/// 入力行を解釈する
///
/// `0 b 5 c` のような組の並びと、`0b 5c` の詰めた書き方を受け付ける。
pub fn parse_command(input: &str) -> std::result::Result<PageCommand, String> {
    let trimmed = input.trim();
    match trimmed {
        "" => return Ok(PageCommand::Redraw),
        "n" | "next" => return Ok(PageCommand::Advance),
        "q" | "Q" | "quit" => return Ok(PageCommand::Quit),
        "?" | "h" | "help" => return Ok(PageCommand::Help),
        _ => {}
    }

    let mut tokens: Vec<String> = Vec::new();
    for token in trimmed.split_whitespace() {
        let digits = token.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 && digits < token.len() {
            tokens.push(token[..digits].to_string());
            tokens.push(token[digits..].to_string());
        } else {
            tokens.push(token.to_string());
        }
    }

    if tokens.len() % 2 != 0 {
        return Err(format!("スロットとカテゴリを組で指定してください: {}", trimmed));
    }

    let mut pairs = Vec::new();
    for pair in tokens.chunks(2) {
        let slot: usize = pair[0]
            .parse()
            .map_err(|_| format!("スロット番号が不正: {}", pair[0]))?;
        let label: Label = pair[1].parse()?;
        pairs.push((slot, label));
    }

    Ok(PageCommand::Toggle(pairs))
}

/// ページをグリッド文字列にする
pub fn render_page(slots: &[SlotView], label_of: impl Fn(usize) -> Option<Label>, page_size: usize) -> String {
    let (_, cols) = grid_shape(page_size);
    let cols = cols.max(1);
    let mut out = String::new();

    for row in slots.chunks(cols) {
        let cells: Vec<String> = row
            .iter()
            .map(|slot| match slot.file_name() {
                Some(name) => {
                    let mark = label_of(slot.index).unwrap_or_default().shortcut();
                    format!("[{:>2}] {:<width$} {}", slot.index, truncate(&name, NAME_WIDTH), mark, width = NAME_WIDTH)
                }
                None => format!("[{:>2}] {:<width$}  ", slot.index, "·", width = NAME_WIDTH),
            })
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }

    out
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let head: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

/// フォルダを開いて対話的に分類する
pub fn run_interactive(folder: &Path, options: SessionOptions) -> Result<Outcome> {
    let mut session = Session::new(options);
    let mut transition = session.open_project(folder)?;

    println!("🎞  {}\n", session.title());

    loop {
        match transition {
            Transition::NothingToOpen => {
                println!("対象のクリップがありません: {}", folder.display());
                return Ok(Outcome::NothingToOpen);
            }
            Transition::Finished => {
                show_progress(&session);
                println!("\n✅ {}", FINISH_MESSAGE);
                return Ok(Outcome::Finished);
            }
            Transition::Page(slots) => {
                show_progress(&session);
                print_page(&session, &slots);

                match run_page(&mut session, &slots)? {
                    PageCommand::Advance => {
                        transition = session.request_advance()?;
                    }
                    _ => {
                        log::info!("quit before committing page at {}", session.progress_index());
                        println!("中断しました（このページのラベルは保存されていません）");
                        return Ok(Outcome::Quit);
                    }
                }
            }
        }
    }
}

/// ページ送りか中断が選ばれるまで入力を受け付ける
fn run_page(session: &mut Session, slots: &[SlotView]) -> Result<PageCommand> {
    loop {
        let input = prompt()?;

        match parse_command(&input) {
            Ok(PageCommand::Toggle(pairs)) => {
                for (slot, label) in pairs {
                    if slots.get(slot).map_or(true, SlotView::is_empty) {
                        println!("  スロット{}は空です", slot);
                        continue;
                    }
                    session.toggle(slot, label);
                }
                print_page(session, slots);
            }
            Ok(PageCommand::Redraw) => print_page(session, slots),
            Ok(PageCommand::Help) => print_help(),
            Ok(command) => return Ok(command),
            Err(message) => println!("  {}（? でヘルプ）", message),
        }
    }
}

fn prompt() -> Result<String> {
    Input::<String>::new()
        .with_prompt("スロット+カテゴリ (例: 0 b 5 c) / n:次へ q:中断 ?:ヘルプ")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ThumbPickerError::Prompt(e.to_string()))
}

fn print_page(session: &Session, slots: &[SlotView]) {
    println!();
    print!("{}", render_page(slots, |slot| session.label_of_slot(slot), session.page_size()));
    println!();
}

fn print_help() {
    println!("---");
    println!("  <スロット> b   border（もう一度で解除）");
    println!("  <スロット> c   sceneCut");
    println!("  <スロット> s   screenContent");
    println!("  n              このページを確定して次へ");
    println!("  q              確定せずに終了");
    println!("  （Enterのみ）  再表示");
    println!("---");
}

fn show_progress(session: &Session) {
    let len = session.catalog_len() as u64;
    let position = (session.progress_index() as u64).min(len);

    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_position(position);
    bar.set_message(format!("{:.2}%", session.progress_percent()));
    bar.abandon();
}
