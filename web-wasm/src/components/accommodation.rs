use leptos::prelude::*;
use reunion_common::content::ACCOMMODATIONS;

#[component]
pub fn Accommodation() -> impl IntoView {
    view! {
        <section id="accommodation" class="section accommodation">
            <h2 class="section-title">"Accommodation"</h2>
            <div class="card-grid">
                {ACCOMMODATIONS
                    .iter()
                    .enumerate()
                    .map(|(i, place)| {
                        view! {
                            <div
                                class="info-card lodging-card fade-in"
                                style=format!("animation-delay: {:.1}s", i as f64 * 0.1)
                            >
                                <div class="lodging-icon">{place.kind.icon()}</div>
                                <h3>{place.name}</h3>
                                <p>{place.description}</p>
                                <p class="lodging-address">{place.address}</p>
                                <p class="lodging-rate">{place.rate}</p>
                                <p class="lodging-phone">{place.phone}</p>
                                <a
                                    class="btn btn-primary"
                                    href=place.booking_url
                                    target="_blank"
                                    rel="noopener noreferrer"
                                >
                                    "Book Now"
                                </a>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
