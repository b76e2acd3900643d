use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, Spinner, SpinnerSize};

use super::error::ErrorView;
use crate::booking::AvailabilityState;
use crate::utils::timezone::format_slot_label;

#[component]
pub fn TimeSlotPicker(
    #[prop(into)] state: Signal<AvailabilityState>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: Callback<String>,
    on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="time-slot-picker">
            <div class="time-slot-picker-header">
                <h4>"Available times"</h4>
            </div>

            <div class="time-slot-picker-content">
                {move || match state.get() {
                    AvailabilityState::Idle => view! {
                        <p class="time-slot-picker-subtitle">
                            "Choose a barber, a date and at least one service to see free times."
                        </p>
                    }.into_any(),
                    AvailabilityState::Loading => view! {
                        <div class="time-slot-picker-loading">
                            <Spinner size=SpinnerSize::Small />
                            <p>"Loading available times..."</p>
                        </div>
                    }.into_any(),
                    AvailabilityState::Failed(message) => view! {
                        <ErrorView message=Some(message) on_retry=on_retry />
                    }.into_any(),
                    AvailabilityState::Ready(slots) if slots.is_empty() => view! {
                        <div class="time-slot-picker-empty">
                            <p>"No free times left on this date."</p>
                            <p class="time-slot-picker-suggestion">"Try another date or barber."</p>
                        </div>
                    }.into_any(),
                    AvailabilityState::Ready(slots) => {
                        let chosen = selected.get();
                        view! {
                            <div class="time-slot-picker-grid">
                                {slots.into_iter().map(|slot| {
                                    let appearance = if chosen.as_deref() == Some(slot.as_str()) {
                                        ButtonAppearance::Primary
                                    } else {
                                        ButtonAppearance::Secondary
                                    };
                                    let label = format_slot_label(&slot);

                                    view! {
                                        <Button
                                            class="time-slot-button"
                                            appearance=appearance
                                            on_click=move |_| on_select.run(slot.clone())
                                        >
                                            {label}
                                        </Button>
                                    }
                                }).collect_view()}
                            </div>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
