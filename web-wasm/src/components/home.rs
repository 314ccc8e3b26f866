//! トップ（タイトルとカウントダウン）

use leptos::prelude::*;
use reunion_common::content::{SITE_SUBTITLE, SITE_TITLE};
use reunion_common::{SiteConfig, TimeLeft};
use std::time::Duration;

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

#[component]
pub fn Home() -> impl IntoView {
    let config = expect_context::<SiteConfig>();
    let schedule = match config.schedule() {
        Ok(schedule) => Some(schedule),
        Err(e) => {
            log::error!("開催日時が不正: {}", e);
            None
        }
    };

    let (time_left, set_time_left) = signal(
        schedule
            .map(|s| s.time_left(now_ms()))
            .unwrap_or_default(),
    );

    // 1秒ごとに更新し、アンマウント時に止める
    if let Some(schedule) = schedule {
        match set_interval_with_handle(
            move || set_time_left.set(schedule.time_left(now_ms())),
            Duration::from_secs(1),
        ) {
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(e) => log::error!("タイマー開始に失敗: {:?}", e),
        }
    }

    let units: [(&'static str, fn(&TimeLeft) -> i64); 4] = [
        ("Days", |t| t.days),
        ("Hours", |t| t.hours),
        ("Minutes", |t| t.minutes),
        ("Seconds", |t| t.seconds),
    ];

    view! {
        <section id="home" class="home">
            <div class="hero">
                <h1 class="hero-title">{SITE_TITLE}</h1>
                <div class="hero-subtitle">{SITE_SUBTITLE}</div>
                <div class="countdown">
                    {units
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <div class="countdown-item">
                                    <div class="countdown-value">
                                        {move || value(&time_left.get())}
                                    </div>
                                    <div class="countdown-label">{label}</div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
