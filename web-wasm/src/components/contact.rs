use leptos::prelude::*;
use reunion_common::content::{COMMITTEE, CONTACT};

#[component]
pub fn Contact() -> impl IntoView {
    view! {
        <section id="contact" class="section contact">
            <h2 class="section-title">"Contact"</h2>
            <div class="card-grid">
                <div class="info-card">
                    <h3>"Get in Touch"</h3>
                    <p>
                        <a href=format!("mailto:{}", CONTACT.email)>{CONTACT.email}</a>
                    </p>
                    <p>{CONTACT.phone}</p>
                    {CONTACT.address_lines.iter().map(|line| view! { <p>{*line}</p> }).collect_view()}
                </div>
                <div class="info-card">
                    <h3>"Organizing Committee"</h3>
                    <ul class="committee">
                        {COMMITTEE
                            .iter()
                            .map(|member| {
                                view! {
                                    <li>
                                        <span class="member-name">{member.name}</span>
                                        <span class="member-role">{member.role}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            </div>
        </section>
    }
}
