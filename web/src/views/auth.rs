use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};
use shared_types::CustomerRegistration;
use thaw::*;

use crate::components::{use_api, use_session_state};
use crate::error::ApiError;

/// Only same-site paths are followed after login.
fn redirect_target(redirect: Option<String>) -> String {
    redirect
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Invalid email or password".to_string(),
        other => format!("Login failed: {}", other.user_message()),
    }
}

/// Values typed into the sign-up form.
#[derive(Debug, Clone, Default)]
struct SignupForm {
    name: String,
    email: String,
    tell: String,
    password: String,
    confirm_password: String,
}

impl SignupForm {
    /// Checks the form locally; nothing is sent unless this succeeds.
    fn into_registration(self) -> Result<CustomerRegistration, &'static str> {
        let name = self.name.trim();
        let email = self.email.trim();
        // The backend stores phone numbers as bare digits.
        let tell: String = self.tell.chars().filter(char::is_ascii_digit).collect();

        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err("Name, email and password are required");
        }
        if tell.is_empty() {
            return Err("Enter a phone number");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        Ok(CustomerRegistration {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password,
            tell,
        })
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let state = use_session_state();
    let query_map = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);

    let is_button_disabled =
        Memo::new(move |_| email.get().trim().is_empty() || password.get().is_empty());
    let just_signed_up =
        Memo::new(move |_| query_map.with(|q| q.get("success").as_deref() == Some("signup")));

    let submit_login = move |_| {
        if loading.get_untracked() {
            return;
        }
        loading.set(true);
        error_message.set(None);

        let api = api.clone();
        let navigate = navigate.clone();
        let target = redirect_target(query_map.get_untracked().get("redirect"));
        let (email, password) = (email.get_untracked(), password.get_untracked());

        spawn_local(async move {
            match api.login(&email, &password).await {
                Ok(_) => {
                    state.refresh(&api);
                    navigate(&target, Default::default());
                }
                Err(e) => {
                    leptos::logging::error!("login failed: {e}");
                    error_message.try_set(Some(login_error_message(&e)));
                }
            }
            loading.try_set(false);
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Welcome back"</h1>
                    <p>"Sign in to your CortaAI account"</p>
                </div>

                <Show when=move || just_signed_up.get()>
                    <MessageBar intent=MessageBarIntent::Success>
                        "Account created. Sign in to continue."
                    </MessageBar>
                </Show>

                <form on:submit=move |ev| {
                    ev.prevent_default();
                    submit_login(());
                }>
                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Email"
                            input_type=InputType::Email
                            value=email
                        />
                    </div>

                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Password"
                            input_type=InputType::Password
                            value=password
                        />
                    </div>

                    {move || error_message.get().map(|msg| view! {
                        <div class="auth-error-message">{msg}</div>
                    })}

                    <Button
                        class="auth-submit-btn"
                        button_type=ButtonType::Submit
                        loading=Signal::from(loading)
                        disabled=Signal::from(is_button_disabled)
                    >
                        "Sign In"
                    </Button>
                </form>

                <div class="auth-footer">
                    <p>
                        "No account yet? "
                        <A href="/signup">"Sign up"</A>
                    </p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let tell = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);

    let is_button_disabled = Memo::new(move |_| {
        name.get().trim().is_empty()
            || email.get().trim().is_empty()
            || password.get().is_empty()
            || confirm_password.get().is_empty()
    });

    let submit_signup = move |_| {
        if loading.get_untracked() {
            return;
        }
        error_message.set(None);

        let form = SignupForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            tell: tell.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let registration = match form.into_registration() {
            Ok(registration) => registration,
            Err(msg) => {
                error_message.set(Some(msg.to_string()));
                return;
            }
        };

        loading.set(true);
        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.register_customer(&registration).await {
                Ok(id) => {
                    leptos::logging::log!("customer {id} registered");
                    navigate("/login?success=signup", Default::default());
                }
                Err(e) => {
                    leptos::logging::error!("sign up failed: {e}");
                    error_message.try_set(Some(format!("Sign up failed: {}", e.user_message())));
                }
            }
            loading.try_set(false);
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Create your account"</h1>
                    <p>"Book your next cut with CortaAI"</p>
                </div>

                <form on:submit=move |ev| {
                    ev.prevent_default();
                    submit_signup(());
                }>
                    <div class="auth-form-group">
                        <Input class="auth-input" placeholder="Full name" value=name />
                    </div>

                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Email"
                            input_type=InputType::Email
                            value=email
                        />
                    </div>

                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Phone"
                            input_type=InputType::Tel
                            value=tell
                        />
                    </div>

                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Password"
                            input_type=InputType::Password
                            value=password
                        />
                    </div>

                    <div class="auth-form-group">
                        <Input
                            class="auth-input"
                            placeholder="Confirm password"
                            input_type=InputType::Password
                            value=confirm_password
                        />
                    </div>

                    {move || error_message.get().map(|msg| view! {
                        <div class="auth-error-message">{msg}</div>
                    })}

                    <Button
                        class="auth-submit-btn"
                        button_type=ButtonType::Submit
                        loading=Signal::from(loading)
                        disabled=Signal::from(is_button_disabled)
                    >
                        "Create account"
                    </Button>
                </form>

                <div class="auth-footer">
                    <p>
                        "Already have an account? "
                        <A href="/login">"Sign in"</A>
                    </p>
                </div>
            </div>
        </div>
    }
}
