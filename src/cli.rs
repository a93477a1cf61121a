use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "thumb-picker")]
#[command(about = "ループ動画サムネイルの手動分類ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// フォルダを開いて分類を開始（前回の続きから再開）
    Open {
        /// クリップのあるフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// 1ページのスロット数（設定ファイルより優先）
        #[arg(short, long)]
        page_size: Option<usize>,

        /// 進捗・ログの出力先（省略時は対象フォルダ）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// 進捗とカテゴリ別の件数を表示（何も書き換えない）
    Status {
        /// クリップのあるフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// 進捗・ログの出力先（省略時は対象フォルダ）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 1ページのスロット数を設定
        #[arg(long)]
        set_page_size: Option<usize>,

        /// 対象拡張子を設定（カンマ区切り, 例: gif,webp）
        #[arg(long)]
        set_extensions: Option<String>,

        /// 進捗・ログの出力先を設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// デフォルトに戻す
        #[arg(long)]
        reset: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open() {
        let cli = Cli::try_parse_from(["thumb-picker", "open", "/clips", "-p", "9"]).unwrap();
        match cli.command {
            Commands::Open { folder, page_size, output_dir } => {
                assert_eq!(folder, PathBuf::from("/clips"));
                assert_eq!(page_size, Some(9));
                assert!(output_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_open_requires_folder() {
        assert!(Cli::try_parse_from(["thumb-picker", "open"]).is_err());
    }

    #[test]
    fn test_parse_status_verbose_global() {
        let cli = Cli::try_parse_from(["thumb-picker", "status", "/clips", "--json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status { json: true, .. }));
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(["thumb-picker", "config", "--set-page-size", "25", "--show"]).unwrap();
        match cli.command {
            Commands::Config { set_page_size, show, reset, .. } => {
                assert_eq!(set_page_size, Some(25));
                assert!(show);
                assert!(!reset);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
