//! ギャラリーマニフェスト生成
//!
//! スキャンした画像をデコードして寸法を取得し、SHA-256で同一内容を除外して
//! gallery.json にまとめる。壊れた画像はログに出してスキップする。

use crate::error::{Result, SiteError};
use crate::scanner::ImageInfo;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use regex::Regex;
use reunion_common::{Category, GalleryManifest, ImageLoader, ManifestEntry, label_from_path};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// 生成オプション
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// sourceに付けるURL接頭辞（例: "assets"）
    pub source_prefix: String,
    pub exclude: Option<Regex>,
    pub show_progress: bool,
}

/// 生成結果のサマリ
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub added: usize,
    pub corrupt: Vec<String>,
    pub duplicates: Vec<String>,
    pub excluded: Vec<String>,
}

struct Inspected {
    sha256: String,
    width: u32,
    height: u32,
}

/// 画像を読み込んでハッシュと寸法を得る
fn inspect(info: &ImageInfo) -> Result<Inspected> {
    let bytes = std::fs::read(&info.path)?;
    let sha256 = hex::encode(Sha256::digest(&bytes));
    let image = image::load_from_memory(&bytes)
        .map_err(|e| SiteError::ImageLoad(format!("{}: {}", info.file_name, e)))?;
    Ok(Inspected {
        sha256,
        width: image.width(),
        height: image.height(),
    })
}

fn source_url(prefix: &str, category: Category, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("{}/{}", category.dir_name(), file_name)
    } else {
        format!("{}/{}/{}", prefix, category.dir_name(), file_name)
    }
}

pub fn build_manifest(images: &[ImageInfo], options: &BuildOptions) -> (GalleryManifest, BuildReport) {
    let progress = if options.show_progress {
        let pb = ProgressBar::new(images.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let inspected: Vec<(&ImageInfo, Result<Inspected>)> = images
        .par_iter()
        .map(|info| {
            let result = inspect(info);
            progress.inc(1);
            (info, result)
        })
        .collect();
    progress.finish_and_clear();

    let mut manifest = GalleryManifest {
        generated_at: chrono::Local::now().to_rfc3339(),
        ..Default::default()
    };
    let mut report = BuildReport::default();
    let mut seen = HashSet::new();

    for (info, result) in inspected {
        let inspected = match result {
            Ok(inspected) => inspected,
            Err(e) => {
                tracing::warn!("スキップ: {}", e);
                report.corrupt.push(info.file_name.clone());
                continue;
            }
        };

        let label = label_from_path(&info.file_name);
        if options.exclude.as_ref().is_some_and(|re| re.is_match(&label)) {
            tracing::debug!("除外: {}", info.file_name);
            report.excluded.push(info.file_name.clone());
            continue;
        }

        if !seen.insert(inspected.sha256.clone()) {
            tracing::info!("同一内容の画像をスキップ: {}", info.path.display());
            report.duplicates.push(info.file_name.clone());
            continue;
        }

        manifest.entries_mut(info.category).push(ManifestEntry {
            source: source_url(&options.source_prefix, info.category, &info.file_name),
            label,
            taken: info.date.clone(),
            width: inspected.width,
            height: inspected.height,
            sha256: inspected.sha256,
        });
        report.added += 1;
    }

    (manifest, report)
}

pub fn write_manifest(path: &Path, manifest: &GalleryManifest) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, manifest.to_json()?)?;
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<GalleryManifest> {
    if !path.exists() {
        return Err(SiteError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(GalleryManifest::from_json(&content)?)
}

/// カテゴリ別の確認結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub visible: usize,
    pub missing: Vec<String>,
}

/// マニフェストをWeb側と同じローダーで読み、表示件数と欠損ファイルを確認する
pub fn check_manifest(
    manifest: &GalleryManifest,
    exclude: Option<&str>,
    web_root: Option<&Path>,
) -> Result<Vec<CategorySummary>> {
    let mut loader = ImageLoader::new(manifest);
    if let Some(pattern) = exclude {
        loader = loader.exclude(pattern)?;
    }

    let summaries = Category::ALL
        .into_iter()
        .map(|category| {
            let mut visible = 0;
            let mut missing = Vec::new();
            for item in loader.load(category) {
                visible += 1;
                if let Some(root) = web_root {
                    if !root.join(item.source.trim_start_matches('/')).is_file() {
                        missing.push(item.source);
                    }
                }
            }
            CategorySummary {
                category,
                visible,
                missing,
            }
        })
        .collect();
    Ok(summaries)
}
