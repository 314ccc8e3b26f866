use clap::Parser;
use dialoguer::Confirm;
use regex::Regex;
use reunion_site::{cli, config, error, manifest, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SiteError};
use reunion_common::config::DEFAULT_MANIFEST_NAME;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ログ初期化
///
/// `RUST_LOG` があれば優先し、なければ `--verbose` で debug にする。
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Scan { assets_dir, output, exclude, prefix, yes } => {
            println!("🖼  reunion-site - ギャラリースキャン\n");

            let assets_dir = config.resolve_assets_dir(assets_dir)?;
            let output = output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_NAME));
            let exclude = match exclude.or_else(|| config.exclude_pattern.clone()) {
                Some(pattern) => Some(Regex::new(&pattern)?),
                None => None,
            };

            // 1. 画像スキャン
            println!("[1/3] 画像をスキャン中... {}", assets_dir.display());
            let images = scanner::scan_assets(&assets_dir)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            // 2. 検証・ハッシュ
            println!("[2/3] 画像を検証中...");
            let options = manifest::BuildOptions {
                source_prefix: prefix.unwrap_or_else(|| config.source_prefix.clone()),
                exclude,
                show_progress: std::io::stderr().is_terminal(),
            };
            let (gallery, report) = manifest::build_manifest(&images, &options);
            println!(
                "✔ 追加 {} / 破損 {} / 重複 {} / 除外 {}\n",
                report.added,
                report.corrupt.len(),
                report.duplicates.len(),
                report.excluded.len()
            );

            // 3. 保存
            if output.exists() && !yes && std::io::stdin().is_terminal() {
                let overwrite = Confirm::new()
                    .with_prompt(format!("{} を上書きしますか？", output.display()))
                    .default(true)
                    .interact()
                    .map_err(|e| SiteError::Config(e.to_string()))?;
                if !overwrite {
                    return Err(SiteError::Aborted);
                }
            }
            println!("[3/3] マニフェストを保存中...");
            manifest::write_manifest(&output, &gallery)?;
            println!("✔ 保存: {}", output.display());

            println!("\n✅ 完了");
        }

        Commands::Check { manifest: path, exclude, root } => {
            let gallery = manifest::read_manifest(&path)?;
            let exclude = exclude.or_else(|| config.exclude_pattern.clone());
            let summaries = manifest::check_manifest(&gallery, exclude.as_deref(), root.as_deref())?;

            let mut missing_total = 0;
            for summary in &summaries {
                println!("{:>5}: {}枚", summary.category.title(), summary.visible);
                for source in &summary.missing {
                    println!("       ✗ 見つかりません: {}", source);
                }
                missing_total += summary.missing.len();
            }

            if missing_total > 0 {
                return Err(SiteError::FileNotFound(format!("{}件のsource", missing_total)));
            }
            println!("\n✅ マニフェストは有効です");
        }

        Commands::Config { set_assets_dir, set_exclude, show } => {
            if let Some(dir) = set_assets_dir {
                config.set_assets_dir(dir)?;
                println!("✔ アセットフォルダを保存しました");
            }

            if let Some(pattern) = set_exclude {
                config.set_exclude_pattern(pattern)?;
                println!("✔ 除外パターンを保存しました");
            }

            if show {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "アセットフォルダ: {}",
                    config.assets_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "(未設定)".into())
                );
                println!("出力先: {}", config.output.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| DEFAULT_MANIFEST_NAME.into()));
                println!("除外パターン: {}", config.exclude_pattern.as_deref().unwrap_or("(なし)"));
                println!("URL接頭辞: {}", config.source_prefix);
            }
        }
    }

    Ok(())
}
