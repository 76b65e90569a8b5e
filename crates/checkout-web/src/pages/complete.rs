use leptos::prelude::*;

#[component]
pub fn CompletePaymentPage() -> impl IntoView {
    view! {
        <div class="result result-complete">
            <h1>"Payment completed"</h1>
            <p>"Thanks! Your Pro plan is active for the next 30 days."</p>
            <a href="/" class="btn">"Back"</a>
        </div>
    }
}
