use clap::Parser;
use picker_common::Config;
use std::process::ExitCode;
use thumb_picker::cli::{Cli, Commands};
use thumb_picker::error::Result;
use thumb_picker::{picker, status};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_not_found() => {
            println!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Open { folder, page_size, output_dir } => {
            let options = Config::load()?.session_options(page_size, output_dir)?;
            picker::run_interactive(&folder, options)?;
        }

        Commands::Status { folder, output_dir, json } => {
            let options = Config::load()?.session_options(None, output_dir)?;
            let status = status::collect(&folder, &options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                status::print_status(&status);
            }
        }

        Commands::Config { set_page_size, set_extensions, set_output_dir, reset, show } => {
            // 壊れた設定ファイルでも --reset / --set-* で直せるようにする
            let mut config = if reset {
                Config::default()
            } else {
                Config::load().unwrap_or_else(|e| {
                    log::warn!("config not loaded: {}", e);
                    eprintln!("⚠ 設定ファイルを読めません（デフォルト値を使用）: {}", e);
                    Config::default()
                })
            };
            let changed = reset || set_page_size.is_some() || set_extensions.is_some() || set_output_dir.is_some();

            if let Some(page_size) = set_page_size {
                config.set_page_size(page_size)?;
            }
            if let Some(list) = set_extensions {
                config.set_extensions(&list)?;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  ページサイズ: {}", config.page_size);
                println!("  拡張子: {}", config.extensions.join(", "));
                match &config.output_dir {
                    Some(dir) => println!("  出力先: {}", dir.display()),
                    None => println!("  出力先: (対象フォルダ)"),
                }
            }
        }
    }

    Ok(())
}
