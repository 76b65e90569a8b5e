use leptos::prelude::*;

#[component]
pub fn CancelPaymentPage() -> impl IntoView {
    view! {
        <div class="result result-cancel">
            <h1>"Payment cancelled"</h1>
            <p>"No charge was made. You can try again at any time."</p>
            <a href="/" class="btn btn-primary">"Try again"</a>
        </div>
    }
}
