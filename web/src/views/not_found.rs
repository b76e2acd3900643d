use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="not-found-container">
            <div class="not-found-code">"404"</div>
            <h1>"Page not found"</h1>
            <p>"The page you are looking for does not exist or was moved."</p>
            <button
                class="not-found-home"
                on:click=move |_| navigate("/", Default::default())
            >
                "Back to barbershops"
            </button>
        </div>
    }
}
