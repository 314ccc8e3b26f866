//! ギャラリー（Then / Now のカルーセルとライトボックス）
//!
//! スクロール位置は `CarouselState` が持ち、DOMの scrollLeft へは書き出すだけ。
//! 自動スクロールは requestAnimationFrame で毎フレーム `tick` を呼ぶ。

use crate::api::assets::load_gallery;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use leptos::ev::MouseEvent;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reunion_common::{CarouselState, Category, ImageItem, Lightbox, SiteConfig, TrackMetrics};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDivElement, KeyboardEvent};

fn measure(el: &HtmlDivElement) -> TrackMetrics {
    TrackMetrics::new(el.scroll_width() as f64, el.client_width() as f64)
}

#[component]
pub fn Gallery() -> impl IntoView {
    let config = expect_context::<SiteConfig>();
    let then_items = RwSignal::new(Vec::<ImageItem>::new());
    let now_items = RwSignal::new(Vec::<ImageItem>::new());
    let lightbox = RwSignal::new(Lightbox::new(config.zoom));

    {
        let manifest_url = config.manifest_url.clone();
        let exclude = config.exclude_pattern.clone();
        spawn_local(async move {
            for (category, items) in load_gallery(&manifest_url, exclude.as_deref()).await {
                let target = match category {
                    Category::Then => then_items,
                    Category::Now => now_items,
                };
                // アンマウント後に届いた結果は捨てる
                let _ = target.try_set(items);
            }
        });
    }

    let carousel = config.carousel;

    view! {
        <section id="gallery" class="section gallery">
            <h2 class="section-title">"Gallery"</h2>
            {Category::ALL
                .into_iter()
                .map(|category| {
                    let items = match category {
                        Category::Then => then_items,
                        Category::Now => now_items,
                    };
                    let state = StoredValue::new(CarouselState::new(carousel));
                    view! {
                        <h3 class="gallery-subtitle">{category.title()}</h3>
                        <CarouselTrack category=category items=items state=state lightbox=lightbox />
                    }
                })
                .collect_view()}
            <LightboxOverlay lightbox=lightbox />
        </section>
    }
}

/// 毎フレーム `frame` を呼ぶループを開始する
///
/// 現在のオーナーが破棄されたら次のフレームを予約しない。
fn frame_loop(frame: impl FnMut() + 'static) {
    let alive = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&alive);
    on_cleanup(move || flag.store(false, Ordering::Relaxed));
    schedule_frame(Rc::new(RefCell::new(None)), Rc::new(RefCell::new(frame)), alive);
}

fn schedule_frame(
    slot: Rc<RefCell<Option<AnimationFrame>>>,
    frame: Rc<RefCell<dyn FnMut()>>,
    alive: Arc<AtomicBool>,
) {
    let next = Rc::clone(&slot);
    let handle = request_animation_frame(move |_| {
        next.borrow_mut().take();
        if !alive.load(Ordering::Relaxed) {
            return;
        }
        (frame.borrow_mut())();
        schedule_frame(next, frame, alive);
    });
    *slot.borrow_mut() = Some(handle);
}

#[component]
fn CarouselTrack(
    category: Category,
    items: RwSignal<Vec<ImageItem>>,
    state: StoredValue<CarouselState>,
    lightbox: RwSignal<Lightbox>,
) -> impl IntoView {
    let viewport_ref = NodeRef::<html::Div>::new();

    let write_offset = move |el: &HtmlDivElement| {
        let offset = state.with_value(|s| s.scroll_offset);
        el.set_scroll_left(offset.round() as i32);
    };

    // 判定と書き込みは同じフレーム内で行う
    frame_loop(move || {
        let Some(el) = viewport_ref.get_untracked() else {
            return;
        };
        let metrics = measure(&el);
        if state.try_update_value(|s| s.tick(metrics)).unwrap_or(false) {
            write_offset(&el);
        }
    });

    // ウィンドウ幅が変わったら範囲内へ戻す
    let resize_listener = web_sys::window().map(|window| {
        EventListener::new(&window, "resize", move |_| {
            if let Some(el) = viewport_ref.get_untracked() {
                let metrics = measure(&el);
                state.update_value(|s| s.resize(metrics));
                write_offset(&el);
            }
        })
    });
    StoredValue::new_local(resize_listener);

    let on_mousedown = move |ev: MouseEvent| {
        state.update_value(|s| s.pointer_down(ev.page_x() as f64));
    };

    let on_mousemove = move |ev: MouseEvent| {
        let Some(el) = viewport_ref.get_untracked() else {
            return;
        };
        let metrics = measure(&el);
        let moved = state
            .try_update_value(|s| s.pointer_move(ev.page_x() as f64, metrics))
            .unwrap_or(false);
        if moved {
            ev.prevent_default();
            write_offset(&el);
        }
    };

    let on_mouseup = move |_: MouseEvent| state.update_value(|s| s.pointer_up());
    let on_mouseenter = move |_: MouseEvent| state.update_value(|s| s.hover_enter());
    let on_mouseleave = move |_: MouseEvent| state.update_value(|s| s.pointer_leave());

    view! {
        <div
            class="carousel"
            data-category=category.as_str()
            node_ref=viewport_ref
            on:mousedown=on_mousedown
            on:mousemove=on_mousemove
            on:mouseup=on_mouseup
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="carousel-track">
                <For
                    each=move || items.get()
                    key=|item| item.source.clone()
                    children=move |item| {
                        view! { <ImageCard item=item lightbox=lightbox state=state /> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn ImageCard(
    item: ImageItem,
    lightbox: RwSignal<Lightbox>,
    state: StoredValue<CarouselState>,
) -> impl IntoView {
    let (failed, set_failed) = signal(false);
    let source = item.source.clone();
    let label = item.label.clone();

    let on_click = move |_| {
        // ドラッグ直後のクリックは無視
        if !state.with_value(|s| s.accepts_click()) {
            return;
        }
        lightbox.update(|lb| lb.open(item.clone()));
    };

    view! {
        <Show when=move || !failed.get()>
            <div class="image-card" on:click=on_click.clone()>
                <img
                    src=source.clone()
                    alt=label.clone()
                    loading="lazy"
                    draggable="false"
                    on:error={
                        let source = source.clone();
                        move |_| {
                            log::warn!("画像の読み込みに失敗: {}", source);
                            set_failed.set(true);
                        }
                    }
                />
            </div>
        </Show>
    }
}

/// ライトボックスが開いている間だけ keydown リスナーを保持する
fn install_key_listener(
    lightbox: RwSignal<Lightbox>,
) -> StoredValue<Option<EventListener>, LocalStorage> {
    let slot = StoredValue::new_local(None);
    let is_open = Memo::new(move |_| lightbox.with(Lightbox::is_open));

    Effect::new(move |_| {
        // 古いリスナーは置き換え時に外れる
        let listener = if is_open.get() {
            web_sys::window().map(|window| {
                EventListener::new(&window, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    let key = event.key();
                    if lightbox.try_update(|lb| lb.handle_key(&key)).unwrap_or(false) {
                        event.prevent_default();
                    }
                })
            })
        } else {
            None
        };
        slot.set_value(listener);
    });
    slot
}

#[component]
fn LightboxOverlay(lightbox: RwSignal<Lightbox>) -> impl IntoView {
    install_key_listener(lightbox);
    let is_open = move || lightbox.with(Lightbox::is_open);
    let zoom_percent = move || format!("{:.0}%", lightbox.with(|lb| lb.zoom()) * 100.0);

    view! {
        <Show when=is_open>
            <div class="lightbox" on:click=move |_| lightbox.update(|lb| lb.close_on_backdrop())>
                <div class="lightbox-content" on:click=|ev: MouseEvent| ev.stop_propagation()>
                    <button
                        class="lightbox-close"
                        aria-label="Close"
                        on:click=move |_| lightbox.update(|lb| lb.close())
                    >
                        "✕"
                    </button>
                    {move || {
                        lightbox
                            .with(|lb| lb.selected().cloned())
                            .map(|item| {
                                let caption = item.label.clone();
                                view! {
                                    <img
                                        class="lightbox-image"
                                        src=item.source
                                        alt=caption
                                        style=move || {
                                            format!("transform: scale({})", lightbox.with(|lb| lb.zoom()))
                                        }
                                    />
                                    <p class="lightbox-caption">{item.label}</p>
                                }
                            })
                    }}
                    <div class="lightbox-zoom">
                        <button
                            aria-label="Zoom out"
                            disabled=move || !lightbox.with(|lb| lb.can_zoom_out())
                            on:click=move |_| lightbox.update(|lb| lb.zoom_out())
                        >
                            "−"
                        </button>
                        <span>{zoom_percent}</span>
                        <button
                            aria-label="Zoom in"
                            disabled=move || !lightbox.with(|lb| lb.can_zoom_in())
                            on:click=move |_| lightbox.update(|lb| lb.zoom_in())
                        >
                            "+"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use leptos::task::Executor;
    use std::cell::Cell;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, KeyboardEventInit, MouseEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn item(label: &str) -> ImageItem {
        ImageItem {
            source: format!("assets/Then/{}.jpg", label),
            label: label.to_string(),
        }
    }

    /// 次の描画フレームまで待つ（その間にエフェクトとrAFが進む）
    async fn next_frame() {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            let window = web_sys::window().expect("window");
            window.request_animation_frame(&resolve).expect("rAF");
        });
        JsFuture::from(promise).await.expect("frame");
    }

    fn press_key(key: &str) {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        init.set_bubbles(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("event");
        web_sys::window().expect("window").dispatch_event(&event).expect("dispatch");
    }

    fn mouse(target: &web_sys::Element, kind: &str, x: i32) {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(x);
        let event = MouseEvent::new_with_mouse_event_init_dict(kind, &init).expect("event");
        target.dispatch_event(&event).expect("dispatch");
    }

    fn container() -> HtmlElement {
        let document = web_sys::window().and_then(|w| w.document()).expect("document");
        let div: HtmlElement = document.create_element("div").expect("div").unchecked_into();
        document.body().expect("body").append_child(&div).expect("append");
        div
    }

    #[wasm_bindgen_test]
    async fn key_listener_exists_only_while_open() {
        let _ = Executor::init_wasm_bindgen();
        let owner = Owner::new();
        let (lightbox, slot) = owner.with(|| {
            let lightbox = RwSignal::new(Lightbox::default());
            (lightbox, install_key_listener(lightbox))
        });

        next_frame().await;
        assert!(slot.with_value(Option::is_none));

        lightbox.update(|lb| lb.open(item("hostel")));
        next_frame().await;
        assert!(slot.with_value(Option::is_some));

        press_key("Escape");
        assert!(!lightbox.with_untracked(Lightbox::is_open));
        next_frame().await;
        assert!(slot.with_value(Option::is_none));
    }

    #[wasm_bindgen_test]
    async fn frame_loop_stops_when_owner_is_cleaned_up() {
        let _ = Executor::init_wasm_bindgen();
        let frames = Rc::new(Cell::new(0u32));
        let owner = Owner::new();
        {
            let frames = Rc::clone(&frames);
            owner.with(|| frame_loop(move || frames.set(frames.get() + 1)));
        }

        for _ in 0..3 {
            next_frame().await;
        }
        assert!(frames.get() > 0);

        owner.cleanup();
        let stopped_at = frames.get();
        for _ in 0..3 {
            next_frame().await;
        }
        assert_eq!(frames.get(), stopped_at);
    }

    #[wasm_bindgen_test]
    async fn drag_does_not_open_lightbox_and_escape_keeps_carousel() {
        let _ = Executor::init_wasm_bindgen();
        let items = RwSignal::new(vec![item("convocation")]);
        let lightbox = RwSignal::new(Lightbox::default());
        let state = StoredValue::new(CarouselState::default());

        let parent = container();
        let _mounted = leptos::mount::mount_to(parent.clone(), move || {
            view! {
                <CarouselTrack category=Category::Then items=items state=state lightbox=lightbox />
                <LightboxOverlay lightbox=lightbox />
            }
        });

        let viewport = parent.query_selector(".carousel").expect("query").expect("carousel");
        let card = parent.query_selector(".image-card").expect("query").expect("card");

        // 押したまま20px動かしてから離す → クリックしても開かない
        mouse(&card, "mousedown", 100);
        mouse(&card, "mousemove", 80);
        mouse(&card, "mouseup", 80);
        mouse(&card, "click", 80);
        assert!(!lightbox.with_untracked(Lightbox::is_open));

        // その場でクリック → 開く
        mouse(&card, "mousedown", 100);
        mouse(&card, "mouseup", 100);
        mouse(&card, "click", 100);
        assert!(lightbox.with_untracked(Lightbox::is_open));

        // ホバー中のカルーセルは Escape の前後で変わらない
        viewport
            .dispatch_event(&MouseEvent::new("mouseenter").expect("event"))
            .expect("dispatch");
        next_frame().await;
        let before = state.get_value();
        assert!(before.is_paused);

        press_key("Escape");
        next_frame().await;
        assert!(!lightbox.with_untracked(Lightbox::is_open));
        assert_eq!(state.get_value(), before);

        parent.remove();
    }
}
