//! サイト設定（ビルド時の既定値）

use crate::carousel::CarouselConfig;
use crate::countdown::EventSchedule;
use crate::error::Result;
use crate::lightbox::ZoomBounds;
use serde::{Deserialize, Serialize};

/// マニフェストの既定ファイル名
pub const DEFAULT_MANIFEST_NAME: &str = "gallery.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// 開催開始日時（RFC 3339）
    pub event_start: String,
    /// Webから取得するマニフェストのパス
    pub manifest_url: String,
    /// ラベルがこの正規表現に一致する画像は表示しない
    pub exclude_pattern: Option<String>,
    pub carousel: CarouselConfig,
    pub zoom: ZoomBounds,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            event_start: "2025-12-26T00:00:00+05:30".into(),
            manifest_url: DEFAULT_MANIFEST_NAME.into(),
            exclude_pattern: None,
            carousel: CarouselConfig::default(),
            zoom: ZoomBounds::default(),
        }
    }
}

impl SiteConfig {
    /// JSONから読み込み、値を検証する
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.carousel.validate()?;
        self.zoom.validate()?;
        self.schedule().map(|_| ())
    }

    pub fn schedule(&self) -> Result<EventSchedule> {
        EventSchedule::parse(&self.event_start)
    }
}
