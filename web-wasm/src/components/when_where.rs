use leptos::prelude::*;
use reunion_common::content::VENUE;

#[component]
pub fn WhenWhere() -> impl IntoView {
    view! {
        <section id="when-where" class="section when-where">
            <h2 class="section-title">"When & Where"</h2>
            <div class="card-grid">
                <div class="info-card">
                    <h3>"Date & Time"</h3>
                    <p>{VENUE.date}</p>
                    <p>{VENUE.time}</p>
                </div>
                <div class="info-card">
                    <h3>"Venue"</h3>
                    {VENUE.address_lines.iter().map(|line| view! { <p>{*line}</p> }).collect_view()}
                </div>
            </div>
        </section>
    }
}
