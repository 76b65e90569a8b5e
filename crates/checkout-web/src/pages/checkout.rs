//! Checkout Page

use leptos::prelude::*;

use crate::components::PaypalButtons;

#[component]
pub fn CheckoutPage() -> impl IntoView {
    view! {
        <div class="checkout">
            <h1>"Upgrade to Pro"</h1>
            <p class="subtitle">"30 days of Pro access, paid once with PayPal"</p>
            <PaypalButtons />
        </div>
    }
}
