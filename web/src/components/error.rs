use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, MessageBar, MessageBarIntent};

#[component]
pub fn ErrorView(
    message: Option<String>,
    /// Shows a retry button when set.
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <MessageBar intent=MessageBarIntent::Error>
            {message.unwrap_or_else(|| "An error occurred. Please try again.".to_string())}
            {on_retry.map(|retry| view! {
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| retry.run(())>
                    "Try again"
                </Button>
            })}
        </MessageBar>
    }
}
