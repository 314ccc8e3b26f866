//! ログイン / 新規登録モーダル

use crate::auth::AuthContext;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reunion_common::{authenticate, AuthMode, Credentials};

#[component]
pub fn LoginModal(open: RwSignal<bool>) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let mode = RwSignal::new(AuthMode::Login);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let reset = move || {
        set_error.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
    };

    let on_close = move |_| {
        open.set(false);
        reset();
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_error.set(String::new());

        let credentials = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let mode = mode.get_untracked();
        let auth = auth.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match authenticate(&auth, mode, &credentials).await {
                Ok(_) => {
                    open.set(false);
                    reset();
                }
                Err(e) => set_error.set(e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    let on_toggle = move |_| {
        mode.update(|m| *m = m.toggle());
        set_error.set(String::new());
    };

    view! {
        <div class="login-modal" class:open=move || open.get()>
            <div class="modal-content">
                <button class="close-button" aria-label="Close" on:click=on_close>
                    "✕"
                </button>
                <h2 class="modal-title">{move || mode.get().title()}</h2>
                <form class="modal-form" on:submit=on_submit>
                    <input
                        type="email"
                        name="email"
                        placeholder="Email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        name="password"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <Show when=move || !error.get().is_empty()>
                        <p class="error-message">{move || error.get()}</p>
                    </Show>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || mode.get().submit_label()}
                    </button>
                    <button type="button" class="btn btn-secondary" on:click=on_toggle>
                        {move || mode.get().toggle_label()}
                    </button>
                </form>
            </div>
        </div>
    }
}
