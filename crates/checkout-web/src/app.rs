//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{CancelPaymentPage, CheckoutPage, CompletePaymentPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=CheckoutPage />
                    <Route path=path!("/complete-payment") view=CompletePaymentPage />
                    <Route path=path!("/cancel-payment") view=CancelPaymentPage />
                </Routes>
            </main>
        </Router>
    }
}
