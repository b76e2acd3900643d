use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::api::ApiClient;
use crate::components::{AuthGuard, Navbar, SessionState};
use crate::config::ClientConfig;
use crate::session::SessionContext;
use crate::views::{
    AppointmentsPage, BookingPage, HomePage, LoginPage, NotFoundPage, SignupPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

/// The server renders without anyone's session; the browser keeps it in
/// localStorage.
fn build_client() -> ApiClient {
    let config = ClientConfig::from_env();
    let session = if cfg!(feature = "ssr") {
        SessionContext::in_memory()
    } else {
        SessionContext::from_config(&config).unwrap_or_else(|e| {
            leptos::logging::error!("session store unavailable, using memory: {e}");
            SessionContext::in_memory()
        })
    };
    ApiClient::new(&config, session)
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = build_client();
    let session_state = SessionState::new();
    provide_context(api.clone());
    provide_context(session_state);

    // Browser only, after hydration.
    Effect::new(move |_| session_state.refresh(&api));

    view! {
        <Title text="CortaAI"/>

        <ConfigProvider>
            <Router>
                <Navbar/>
                <main>
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("signup") view=SignupPage/>
                        <Route
                            path=(StaticSegment("barbershops"), ParamSegment("id"), StaticSegment("booking"))
                            view=|| view! { <AuthGuard><BookingPage/></AuthGuard> }
                        />
                        <Route
                            path=StaticSegment("appointments")
                            view=|| view! { <AuthGuard><AppointmentsPage/></AuthGuard> }
                        />
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
