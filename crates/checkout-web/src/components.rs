//! UI Components

use std::rc::Rc;

use checkout_core::CheckoutFlow;
use leptos::prelude::*;

use crate::api::HttpOrderApi;
use crate::paypal;

/// Public client id baked in at build time
const PUBLIC_CLIENT_ID: Option<&str> = option_env!("PAYPAL_PUBLIC_CLIENT_ID");
const CURRENCY: &str = "USD";
const CONTAINER_ID: &str = "paypal-buttons";

/// PayPal button stack bound to a fresh checkout flow
#[component]
pub fn PaypalButtons() -> impl IntoView {
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let Some(client_id) = PUBLIC_CLIENT_ID.filter(|id| !id.is_empty()) else {
            set_error.set(Some("Payments are not configured".into()));
            return;
        };

        let flow = Rc::new(CheckoutFlow::new(HttpOrderApi::new()));
        let loaded = paypal::load_sdk(
            client_id,
            CURRENCY,
            move || {
                if let Err(e) = paypal::render_buttons(flow, &format!("#{CONTAINER_ID}")) {
                    leptos::logging::error!("Failed to render PayPal buttons: {:?}", e);
                    set_error.set(Some("Could not display PayPal buttons".into()));
                }
            },
            move || {
                leptos::logging::error!("PayPal SDK script failed to load");
                set_error.set(Some("Could not load PayPal".into()));
            },
        );

        if let Err(e) = loaded {
            leptos::logging::error!("Failed to load PayPal SDK: {:?}", e);
            set_error.set(Some("Could not load PayPal".into()));
        }
    });

    view! {
        <div id=CONTAINER_ID class="paypal-buttons"></div>
        {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
    }
}
