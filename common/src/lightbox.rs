//! ライトボックス（拡大表示オーバーレイ）の状態

use crate::error::{Error, Result};
use crate::gallery::ImageItem;
use serde::{Deserialize, Serialize};

/// ズーム倍率の範囲
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 3.0,
            step: 0.25,
            default: 1.0,
        }
    }
}

impl ZoomBounds {
    /// `0 < min <= default <= max`、`step > 0`、すべて有限値
    pub fn validate(&self) -> Result<()> {
        let values = [self.min, self.max, self.step, self.default];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!("zoom bounds must be finite: {:?}", self)));
        }
        if self.min <= 0.0 || self.min > self.max {
            return Err(Error::InvalidConfig(format!(
                "zoom range {}..={} is empty or not positive",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(Error::InvalidConfig(format!("zoom step must be positive, got {}", self.step)));
        }
        if !(self.min..=self.max).contains(&self.default) {
            return Err(Error::InvalidConfig(format!(
                "default zoom {} is outside {}..={}",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.default;
        }
        // f64::clamp は min > max で panic するので使わない
        zoom.max(self.min).min(self.max)
    }
}

/// 選択中の画像は全体で高々1つ
#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    selected: Option<ImageItem>,
    zoom: f64,
    bounds: ZoomBounds,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl Lightbox {
    pub fn new(bounds: ZoomBounds) -> Self {
        Self {
            selected: None,
            zoom: bounds.default,
            bounds,
        }
    }

    pub fn selected(&self) -> Option<&ImageItem> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// サムネイルクリック。新しい画像を開くとズームは既定値に戻る
    pub fn open(&mut self, item: ImageItem) {
        self.selected = Some(item);
        self.zoom = self.bounds.default;
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// 背景クリックで閉じる
    pub fn close_on_backdrop(&mut self) {
        self.close();
    }

    /// キー入力。処理した場合は true
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            "Escape" | "Esc" => {
                self.close();
                true
            }
            "+" | "=" => {
                self.zoom_in();
                true
            }
            "-" => {
                self.zoom_out();
                true
            }
            _ => false,
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = self.bounds.clamp(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.bounds.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.bounds.step);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < self.bounds.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > self.bounds.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str) -> ImageItem {
        ImageItem {
            source: format!("assets/Then/{}.jpg", label),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_open_and_escape() {
        let mut lightbox = Lightbox::default();
        assert!(!lightbox.handle_key("Escape"));

        lightbox.open(item("hostel"));
        assert_eq!(lightbox.selected().unwrap().label, "hostel");

        assert!(lightbox.handle_key("Escape"));
        assert!(lightbox.selected().is_none());
    }

    #[test]
    fn test_zoom_clamped() {
        let mut lightbox = Lightbox::default();
        lightbox.open(item("a"));
        for _ in 0..20 {
            lightbox.zoom_in();
        }
        assert_eq!(lightbox.zoom(), 3.0);
        assert!(!lightbox.can_zoom_in());

        for _ in 0..20 {
            lightbox.zoom_out();
        }
        assert_eq!(lightbox.zoom(), 1.0);
        assert!(!lightbox.can_zoom_out());

        lightbox.set_zoom(f64::NAN);
        assert_eq!(lightbox.zoom(), 1.0);
    }

    #[test]
    fn test_open_new_image_resets_zoom() {
        let mut lightbox = Lightbox::default();
        lightbox.open(item("a"));
        lightbox.set_zoom(2.5);
        lightbox.open(item("b"));
        assert_eq!(lightbox.zoom(), 1.0);
        assert_eq!(lightbox.selected().unwrap().label, "b");
    }

    #[test]
    fn test_bounds_validate() {
        assert!(ZoomBounds::default().validate().is_ok());
        let bad = [
            ZoomBounds { min: 3.0, max: 1.0, ..Default::default() },
            ZoomBounds { step: 0.0, ..Default::default() },
            ZoomBounds { default: 5.0, ..Default::default() },
            ZoomBounds { max: f64::NAN, ..Default::default() },
            ZoomBounds { min: 0.0, ..Default::default() },
        ];
        for bounds in bad {
            assert!(bounds.validate().is_err(), "{:?}", bounds);
        }
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let mut lightbox = Lightbox::new(ZoomBounds {
            min: 3.0,
            max: 1.0,
            step: 0.25,
            default: 1.0,
        });
        lightbox.open(item("a"));
        lightbox.zoom_in();
        lightbox.zoom_out();
        assert!(lightbox.zoom().is_finite());
    }

    #[test]
    fn test_bounds_camel_case_with_defaults() {
        let bounds: ZoomBounds = serde_json::from_str(r#"{"max": 4.0}"#).unwrap();
        assert_eq!(bounds.max, 4.0);
        assert_eq!(bounds.min, 1.0);
    }

    #[test]
    fn test_backdrop_and_other_keys() {
        let mut lightbox = Lightbox::default();
        lightbox.open(item("a"));
        assert!(!lightbox.handle_key("Enter"));
        assert!(lightbox.is_open());
        assert!(lightbox.handle_key("+"));
        assert_eq!(lightbox.zoom(), 1.25);
        lightbox.close_on_backdrop();
        assert!(!lightbox.is_open());
    }
}
