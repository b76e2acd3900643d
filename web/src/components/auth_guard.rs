use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::api::ApiClient;
use crate::session::Session;

/// Reactive view of the stored session, shared through context.
///
/// The store is only read once the app is mounted in the browser, so the
/// server and the first client render agree on "not checked yet".
#[derive(Debug, Clone, Copy)]
pub struct SessionState {
    pub session: RwSignal<Option<Session>>,
    pub checked: RwSignal<bool>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(None),
            checked: RwSignal::new(false),
        }
    }

    /// Re-reads the session from the client's store.
    pub fn refresh(&self, api: &ApiClient) {
        self.session.set(api.session().current());
        self.checked.set(true);
    }

    pub fn sign_out(&self, api: &ApiClient) {
        if let Err(e) = api.logout() {
            leptos::logging::error!("failed to clear session: {e}");
        }
        self.session.set(None);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Login page URL that sends the user back to `back_to` afterwards.
pub fn login_path(back_to: &str) -> String {
    format!("/login?redirect={back_to}")
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

pub fn use_session_state() -> SessionState {
    expect_context::<SessionState>()
}

#[component]
pub fn LoadingState() -> impl IntoView {
    view! {
        <div class="auth-guard-container">
            <div class="auth-guard-content">
                <div class="auth-guard-loading-title">"Verifying access..."</div>
            </div>
        </div>
    }
}

/// Sends the visitor to the login page, asking it to come back here.
#[component]
pub fn AccessDeniedState() -> impl IntoView {
    let navigate = use_navigate();
    let location = use_location();

    Effect::new(move |_| {
        navigate(&login_path(&location.pathname.get_untracked()), Default::default());
    });

    view! {
        <div class="auth-guard-container">
            <div class="auth-guard-content">
                <div class="auth-guard-denied-title">"Please log in"</div>
                <div class="auth-guard-denied-subtitle">"Redirecting to login..."</div>
            </div>
        </div>
    }
}

/// Renders `children` only for a logged in user.
#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let state = use_session_state();

    view! {
        <Show
            when=move || state.checked.get()
            fallback=move || view! { <LoadingState/> }
        >
            <Show
                when=move || state.session.with(Option::is_some)
                fallback=move || view! { <AccessDeniedState/> }
                clone:children
            >
                {children()}
            </Show>
        </Show>
    }
}
