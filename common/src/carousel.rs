//! カルーセルのスクロール状態
//!
//! 自動スクロール（毎フレーム一定量進める）とドラッグ操作が
//! 同じ `scroll_offset` を取り合う。所有権は `is_paused` とドラッグ状態で決まり、
//! ドラッグ中は自動スクロールが書き込まない。
//!
//! ```text
//!   Idle ──pointer_down──► Dragging
//!    ▲                        │
//!    └──pointer_up / leave────┘
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// これ以上動いたらクリックではなくドラッグとみなす(px)
pub const CLICK_SLOP: f64 = 5.0;

/// スクロール速度などの設定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    /// 1フレームあたりの自動スクロール量(px)
    pub step: f64,
    /// ポインタ移動量に対するスクロール倍率
    pub drag_sensitivity: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            step: 1.0,
            drag_sensitivity: 2.0,
        }
    }
}

impl CarouselConfig {
    /// 速度・倍率はどちらも正の有限値
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "carousel step must be a positive number, got {}",
                self.step
            )));
        }
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "drag sensitivity must be a positive number, got {}",
                self.drag_sensitivity
            )));
        }
        Ok(())
    }
}

/// トラックの寸法（DOMから毎フレーム計測）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackMetrics {
    pub track_width: f64,
    pub viewport_width: f64,
}

impl TrackMetrics {
    pub fn new(track_width: f64, viewport_width: f64) -> Self {
        Self {
            track_width,
            viewport_width,
        }
    }

    /// スクロール可能な最大オフセット（内容がビューポートより狭ければ0）
    pub fn max_offset(&self) -> f64 {
        (self.track_width - self.viewport_width).max(0.0)
    }

    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset())
    }
}

/// ドラッグ状態
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        /// pointer_down時のポインタX座標
        anchor_x: f64,
        /// pointer_down時のオフセット
        origin_offset: f64,
    },
}

/// カルーセル1トラック分の状態
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarouselState {
    pub scroll_offset: f64,
    /// ホバー中は自動スクロールを止める
    pub is_paused: bool,
    pub phase: DragPhase,
    /// 直前の押下が CLICK_SLOP を超えて動いたか（次の押下まで保持）
    pub drag_moved: bool,
    pub config: CarouselConfig,
}

impl CarouselState {
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn drag_anchor(&self) -> Option<f64> {
        match self.phase {
            DragPhase::Dragging { anchor_x, .. } => Some(anchor_x),
            DragPhase::Idle => None,
        }
    }

    /// 自動スクロールが進んでよい状態か
    pub fn is_auto_scrolling(&self) -> bool {
        !self.is_paused && !self.is_dragging()
    }

    /// 1フレーム分の自動スクロール
    ///
    /// 書き込んだ場合は true。上限に達したら0に戻す（イージングなし）。
    pub fn tick(&mut self, metrics: TrackMetrics) -> bool {
        if !self.is_auto_scrolling() {
            return false;
        }
        let max = metrics.max_offset();
        let next = self.scroll_offset + self.config.step;
        // 上限到達と範囲外（負数・NaN）はどちらも先頭へ
        self.scroll_offset = if next > 0.0 && next < max { next } else { 0.0 };
        true
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.phase = DragPhase::Dragging {
            anchor_x: x,
            origin_offset: self.scroll_offset,
        };
        self.drag_moved = false;
    }

    /// ドラッグ中のポインタ移動。オフセットを更新した場合は true
    pub fn pointer_move(&mut self, x: f64, metrics: TrackMetrics) -> bool {
        let DragPhase::Dragging {
            anchor_x,
            origin_offset,
        } = self.phase
        else {
            return false;
        };
        if (x - anchor_x).abs() > CLICK_SLOP {
            self.drag_moved = true;
        }
        let walk = (x - anchor_x) * self.config.drag_sensitivity;
        self.scroll_offset = metrics.clamp(origin_offset - walk);
        true
    }

    /// 押下からのクリックを「サムネイルを開く」として扱ってよいか
    pub fn accepts_click(&self) -> bool {
        !self.drag_moved
    }

    pub fn pointer_up(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// トラック外にポインタが出たらドラッグもホバーも終了
    pub fn pointer_leave(&mut self) {
        self.phase = DragPhase::Idle;
        self.is_paused = false;
    }

    pub fn hover_enter(&mut self) {
        self.is_paused = true;
    }

    pub fn hover_leave(&mut self) {
        self.is_paused = false;
    }

    pub fn set_offset(&mut self, offset: f64, metrics: TrackMetrics) {
        self.scroll_offset = metrics.clamp(offset);
    }

    /// レイアウト変更後に範囲内へ戻す
    pub fn resize(&mut self, metrics: TrackMetrics) {
        self.scroll_offset = metrics.clamp(self.scroll_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: TrackMetrics = TrackMetrics {
        track_width: 1850.0,
        viewport_width: 1200.0,
    };

    #[test]
    fn test_max_offset() {
        assert_eq!(METRICS.max_offset(), 650.0);
        assert_eq!(TrackMetrics::new(300.0, 1200.0).max_offset(), 0.0);
    }

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut state = CarouselState::default();
        assert!(state.tick(METRICS));
        assert_eq!(state.scroll_offset, 1.0);

        state.scroll_offset = 649.0;
        assert!(state.tick(METRICS));
        assert_eq!(state.scroll_offset, 0.0);
    }

    #[test]
    fn test_tick_with_narrow_content_stays_at_zero() {
        let mut state = CarouselState::default();
        let narrow = TrackMetrics::new(370.0, 1200.0);
        for _ in 0..10 {
            state.tick(narrow);
            assert_eq!(state.scroll_offset, 0.0);
        }
    }

    #[test]
    fn test_tick_does_not_write_while_paused_or_dragging() {
        let mut state = CarouselState {
            scroll_offset: 120.0,
            ..Default::default()
        };
        state.hover_enter();
        assert!(!state.tick(METRICS));
        assert_eq!(state.scroll_offset, 120.0);

        state.hover_leave();
        state.pointer_down(500.0);
        assert!(!state.tick(METRICS));
        assert_eq!(state.scroll_offset, 120.0);

        // ホバー中に離しても再開しない
        state.hover_enter();
        state.pointer_up();
        assert!(!state.tick(METRICS));

        state.hover_leave();
        assert!(state.tick(METRICS));
        assert_eq!(state.scroll_offset, 121.0);
    }

    #[test]
    fn test_drag_moves_offset_proportionally() {
        let mut state = CarouselState {
            scroll_offset: 300.0,
            ..Default::default()
        };
        state.pointer_down(400.0);
        assert_eq!(state.drag_anchor(), Some(400.0));

        // 左に50pxドラッグ → 倍率2で100px進む
        assert!(state.pointer_move(350.0, METRICS));
        assert_eq!(state.scroll_offset, 400.0);

        // 右に30px → 基準オフセットから60px戻る
        assert!(state.pointer_move(430.0, METRICS));
        assert_eq!(state.scroll_offset, 240.0);
    }

    #[test]
    fn test_drag_clamps_into_range() {
        let mut state = CarouselState::default();
        state.pointer_down(100.0);
        state.pointer_move(900.0, METRICS);
        assert_eq!(state.scroll_offset, 0.0);
        state.pointer_move(-2000.0, METRICS);
        assert_eq!(state.scroll_offset, METRICS.max_offset());
    }

    #[test]
    fn test_drag_sequences_stay_in_range() {
        let positions = [0.0, 13.5, -400.0, 1200.0, 77.0, -3.0, 640.0, 5000.0, -5000.0];
        for &start in &positions {
            let mut state = CarouselState::default();
            state.set_offset(start, METRICS);
            state.pointer_down(start);
            for &x in &positions {
                state.pointer_move(x, METRICS);
                assert!(state.scroll_offset >= 0.0);
                assert!(state.scroll_offset <= METRICS.max_offset());
            }
            state.pointer_up();
        }
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut state = CarouselState::default();
        assert!(!state.pointer_move(50.0, METRICS));
        assert_eq!(state.scroll_offset, 0.0);
    }

    #[test]
    fn test_pointer_leave_ends_drag_and_hover() {
        let mut state = CarouselState::default();
        state.hover_enter();
        state.pointer_down(10.0);
        state.pointer_leave();
        assert!(!state.is_dragging());
        assert!(!state.is_paused);
        assert!(state.is_auto_scrolling());
    }

    #[test]
    fn test_drag_is_reentrant() {
        let mut state = CarouselState::default();
        state.pointer_down(200.0);
        state.pointer_move(150.0, METRICS);
        state.pointer_up();
        assert_eq!(state.scroll_offset, 100.0);

        state.pointer_down(600.0);
        state.pointer_move(550.0, METRICS);
        assert_eq!(state.scroll_offset, 200.0);
    }

    #[test]
    fn test_click_after_drag_is_rejected() {
        let mut state = CarouselState::default();
        state.pointer_down(300.0);
        state.pointer_move(300.0 - CLICK_SLOP - 1.0, METRICS);
        state.pointer_up();
        assert!(!state.accepts_click());

        // 小さな揺れはクリック扱い
        state.pointer_down(300.0);
        state.pointer_move(300.0 + CLICK_SLOP, METRICS);
        state.pointer_up();
        assert!(state.accepts_click());
    }

    #[test]
    fn test_tick_never_leaves_range_with_bad_step() {
        let metrics = TrackMetrics::new(2000.0, 1200.0);
        for step in [-1.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let mut state = CarouselState::new(CarouselConfig {
                step,
                drag_sensitivity: 2.0,
            });
            state.scroll_offset = 40.0;
            state.tick(metrics);
            assert!(state.scroll_offset >= 0.0, "step {}", step);
            assert!(state.scroll_offset <= metrics.max_offset(), "step {}", step);
        }
    }

    #[test]
    fn test_config_validate() {
        assert!(CarouselConfig::default().validate().is_ok());
        for (step, sensitivity) in [(-1.0, 2.0), (0.0, 2.0), (f64::NAN, 2.0), (1.0, f64::INFINITY), (1.0, 0.0)] {
            let config = CarouselConfig {
                step,
                drag_sensitivity: sensitivity,
            };
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_config_camel_case_with_defaults() {
        let config: CarouselConfig = serde_json::from_str(r#"{"dragSensitivity": 3.0}"#).unwrap();
        assert_eq!(config.drag_sensitivity, 3.0);
        assert_eq!(config.step, 1.0);
    }

    #[test]
    fn test_resize_reclamps() {
        let mut state = CarouselState {
            scroll_offset: 600.0,
            ..Default::default()
        };
        state.resize(TrackMetrics::new(1500.0, 1200.0));
        assert_eq!(state.scroll_offset, 300.0);
    }
}
