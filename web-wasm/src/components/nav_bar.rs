//! 固定ナビゲーションバー

use crate::auth::AuthContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reunion_common::content::{SECTIONS, SITE_TITLE};
use reunion_common::AuthService;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

/// セクションまでスムーズスクロール
pub fn scroll_to_section(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        log::warn!("セクションが見つかりません: {}", id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[component]
pub fn NavBar(login_open: RwSignal<bool>) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let (menu_open, set_menu_open) = signal(false);

    let is_signed_in = {
        let auth = auth.clone();
        move || auth.user().is_some()
    };
    // セッション確認中はログインボタンを押せないようにする
    let checking = {
        let auth = auth.clone();
        move || auth.is_loading()
    };

    let on_logout = {
        let auth = auth.clone();
        move |_| {
            let auth = auth.clone();
            spawn_local(async move {
                if let Err(e) = auth.sign_out().await {
                    log::warn!("ログアウトエラー: {}", e);
                }
            });
        }
    };

    view! {
        <nav class="nav-bar">
            <a
                href="#home"
                class="logo"
                on:click=move |ev| {
                    ev.prevent_default();
                    scroll_to_section("home");
                }
            >
                {SITE_TITLE}
            </a>
            <button
                class="menu-button"
                aria-label="Toggle menu"
                on:click=move |_| set_menu_open.update(|open| *open = !*open)
            >
                {move || if menu_open.get() { "✕" } else { "☰" }}
            </button>
            <div class="nav-links" class:open=move || menu_open.get()>
                {SECTIONS
                    .iter()
                    .map(|section| {
                        let id = section.id;
                        view! {
                            <a
                                href=format!("#{}", id)
                                class="nav-link"
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    scroll_to_section(id);
                                    set_menu_open.set(false);
                                }
                            >
                                {section.title}
                            </a>
                        }
                    })
                    .collect_view()}
                <Show
                    when=is_signed_in
                    fallback=move || view! {
                        <button
                            class="btn btn-login"
                            disabled=checking.clone()
                            on:click=move |_| {
                                set_menu_open.set(false);
                                login_open.set(true);
                            }
                        >
                            "Login / Signup"
                        </button>
                    }
                >
                    <button class="btn btn-login" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
