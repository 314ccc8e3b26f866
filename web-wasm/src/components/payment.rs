use leptos::prelude::*;
use reunion_common::content::PAYMENT;

/// カードの表示アニメーションを順にずらす
fn stagger(index: usize) -> String {
    format!("animation-delay: {:.1}s", index as f64 * 0.1)
}

#[component]
pub fn Payment() -> impl IntoView {
    view! {
        <section id="payment" class="section payment">
            <h2 class="section-title">"Payment"</h2>
            <p class="section-lead">
                "Please send your payment receipt to "
                <a href=format!("mailto:{}", PAYMENT.receipt_email)>{PAYMENT.receipt_email}</a>
            </p>
            <div class="card-grid">
                <div class="info-card fade-in" style=stagger(0)>
                    <h3>"Bank Transfer"</h3>
                    <dl class="bank-details">
                        {PAYMENT
                            .bank
                            .fields
                            .iter()
                            .map(|(name, value)| {
                                view! {
                                    <dt>{*name}</dt>
                                    <dd>{*value}</dd>
                                }
                            })
                            .collect_view()}
                    </dl>
                </div>
                <div class="info-card fade-in" style=stagger(1)>
                    <h3>"UPI"</h3>
                    <p class="upi-id">{PAYMENT.upi_id}</p>
                    <a href=PAYMENT.upi_qr_url target="_blank" rel="noopener noreferrer">
                        "View QR code"
                    </a>
                </div>
            </div>
            <p class="payment-note">{PAYMENT.note}</p>
        </section>
    }
}
