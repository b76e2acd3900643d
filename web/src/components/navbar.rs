use leptos::prelude::*;
use leptos_router::components::A;

use super::auth_guard::{use_api, use_session_state};

#[component]
pub fn Navbar() -> impl IntoView {
    let api = use_api();
    let state = use_session_state();
    // Protected pages fall back to their login redirect once the session is gone.
    let logout = move |_: leptos::ev::MouseEvent| state.sign_out(&api);

    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <div class="navbar__brand">
                    <A href="/" attr:class="navbar__logo">
                        "CortaAI"
                    </A>
                </div>

                <div class="navbar__links">
                    <A href="/" attr:class="navbar__link">
                        "Barbershops"
                    </A>
                    <Show
                        when=move || state.session.with(Option::is_some)
                        fallback=|| view! {
                            <A href="/signup" attr:class="navbar__link">
                                "Sign up"
                            </A>
                            <A href="/login" attr:class="navbar__link navbar__link--cta">
                                "Log in"
                            </A>
                        }
                    >
                        <A href="/appointments" attr:class="navbar__link">
                            "My appointments"
                        </A>
                        <span class="navbar__user">
                            {move || state.session.with(|s| {
                                s.as_ref().and_then(|s| s.user_name.clone()).unwrap_or_default()
                            })}
                        </span>
                    </Show>
                    {move || state.session.with(Option::is_some).then(|| {
                        let logout = logout.clone();
                        view! {
                            <button class="navbar__link" on:click=logout>"Log out"</button>
                        }
                    })}
                </div>
            </div>
        </nav>
    }
}
