//! RSVPフォーム

use crate::auth::AuthContext;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reunion_common::forms::MAX_GUESTS;
use reunion_common::{submit_rsvp, Attendance, FormStatus, RsvpForm};

#[component]
pub fn Rsvp() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let form = RwSignal::new(RsvpForm::default());
    let status = RwSignal::new(FormStatus::Idle);
    let (submitting, set_submitting) = signal(false);

    // ログイン済みならメール欄を埋める（入力済みなら触らない）
    {
        let auth = auth.clone();
        Effect::new(move |_| {
            let Some(email) = auth.user().and_then(|u| u.email) else {
                return;
            };
            form.update(|f| {
                if f.email.is_empty() {
                    f.email = email;
                }
            });
        });
    }

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let auth = auth.clone();
        let mut current = form.get_untracked();
        set_submitting.set(true);
        status.set(FormStatus::Idle);
        spawn_local(async move {
            let user = auth.user_untracked();
            let result = submit_rsvp(&auth, &mut current, user.as_ref()).await;
            if !result.is_error() {
                form.set(current);
            }
            status.set(result);
            set_submitting.set(false);
        });
    };

    view! {
        <section id="rsvp" class="section rsvp">
            <h2 class="section-title">"RSVP"</h2>
            <form class="rsvp-form" on:submit=on_submit>
                <label>
                    "Full Name"
                    <input
                        type="text"
                        name="name"
                        required
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        name="email"
                        required
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Will you attend?"
                    <select
                        name="attendance"
                        prop:value=move || form.with(|f| f.attendance.as_str())
                        on:change=move |ev| {
                            match event_target_value(&ev).parse::<Attendance>() {
                                Ok(attendance) => form.update(|f| f.attendance = attendance),
                                Err(e) => log::warn!("出欠の値が不正: {}", e),
                            }
                        }
                    >
                        {Attendance::ALL
                            .into_iter()
                            .map(|a| view! { <option value=a.as_str()>{a.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Number of Guests"
                    <select
                        name="guests"
                        prop:value=move || form.with(|f| f.guests.to_string())
                        on:change=move |ev| {
                            if let Ok(guests) = event_target_value(&ev).parse::<u8>() {
                                form.update(|f| f.guests = guests);
                            }
                        }
                    >
                        {(0..=MAX_GUESTS)
                            .map(|n| view! { <option value=n.to_string()>{n}</option> })
                            .collect_view()}
                    </select>
                </label>
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Submitting..." } else { "Submit RSVP" }}
                </button>
                {move || {
                    status
                        .with(|s| s.message().map(|m| (m.to_string(), s.is_error())))
                        .map(|(message, is_error)| {
                            view! {
                                <p class="form-status" class:error=is_error class:success=!is_error>
                                    {message}
                                </p>
                            }
                        })
                }}
            </form>
        </section>
    }
}
