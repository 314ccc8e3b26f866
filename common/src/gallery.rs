//! ギャラリー画像カタログ
//!
//! CLIが生成するマニフェスト（gallery.json）の型と、
//! Web側がカテゴリ単位で表示用アイテムを取り出すローダー。

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 現在のマニフェスト形式バージョン
pub const MANIFEST_VERSION: u32 = 1;

/// 画像カテゴリ（当時 / 現在）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Then,
    Now,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Then, Category::Now];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Then => "then",
            Category::Now => "now",
        }
    }

    /// アセットフォルダ名
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Then => "Then",
            Category::Now => "Now",
        }
    }

    /// 見出し表示用
    pub fn title(&self) -> &'static str {
        self.dir_name()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 表示用画像アイテム（読み込み後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    pub source: String,
    pub label: String,
}

/// マニフェストの1エントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestEntry {
    pub source: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken: Option<String>,
    pub width: u32,
    pub height: u32,
    pub sha256: String,
}

/// カテゴリ別のエントリ一覧
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestCategories {
    pub then: Vec<ManifestEntry>,
    pub now: Vec<ManifestEntry>,
}

/// gallery.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryManifest {
    pub version: u32,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub categories: ManifestCategories,
}

impl Default for GalleryManifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            generated_at: String::new(),
            categories: ManifestCategories::default(),
        }
    }
}

impl GalleryManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: GalleryManifest = serde_json::from_str(json)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(Error::ManifestVersion(manifest.version));
        }
        Ok(manifest)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn entries(&self, category: Category) -> &[ManifestEntry] {
        match category {
            Category::Then => &self.categories.then,
            Category::Now => &self.categories.now,
        }
    }

    pub fn entries_mut(&mut self, category: Category) -> &mut Vec<ManifestEntry> {
        match category {
            Category::Then => &mut self.categories.then,
            Category::Now => &mut self.categories.now,
        }
    }
}

/// パスから表示ラベルを作る（ファイル名から拡張子を除いたもの）
pub fn label_from_path(path: &str) -> String {
    let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[..idx].to_string(),
        _ => file_name.to_string(),
    }
}

/// マニフェストからカテゴリ別に画像を取り出すローダー
pub struct ImageLoader<'a> {
    manifest: &'a GalleryManifest,
    exclude: Option<Regex>,
}

impl<'a> ImageLoader<'a> {
    pub fn new(manifest: &'a GalleryManifest) -> Self {
        Self {
            manifest,
            exclude: None,
        }
    }

    /// ラベルが一致するアイテムを除外する
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// カテゴリの画像を順序通りに遅延評価で返す
    ///
    /// sourceで重複排除し、不正なエントリはログを出してスキップする。
    pub fn load(&self, category: Category) -> impl Iterator<Item = ImageItem> + '_ {
        let mut seen = HashSet::new();
        self.manifest
            .entries(category)
            .iter()
            .filter_map(move |entry| {
                let source = entry.source.trim();
                if source.is_empty() {
                    log::warn!("{}: source が空のエントリをスキップ", category);
                    return None;
                }
                if !seen.insert(source.to_string()) {
                    log::debug!("{}: 重複エントリをスキップ: {}", category, source);
                    return None;
                }
                let label = if entry.label.trim().is_empty() {
                    label_from_path(source)
                } else {
                    entry.label.clone()
                };
                if self.exclude.as_ref().is_some_and(|re| re.is_match(&label)) {
                    return None;
                }
                Some(ImageItem {
                    source: source.to_string(),
                    label,
                })
            })
    }
}
