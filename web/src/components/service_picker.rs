use leptos::prelude::*;
use uuid::Uuid;

use crate::booking::BookingFlow;
use crate::utils::timezone::{format_duration, format_price};

/// Checkbox list of a shop's services with the running totals underneath.
#[component]
pub fn ServicePicker(flow: RwSignal<BookingFlow>, on_toggle: Callback<Uuid>) -> impl IntoView {
    view! {
        <div class="service-picker">
            <h4>"Services"</h4>
            <ul class="service-picker-list">
                {move || flow.with(|f| {
                    f.catalog()
                        .iter()
                        .map(|service| {
                            let id = service.id;
                            let price = format_price(service.price);
                            let duration = format_duration(service.duration_minutes);
                            view! {
                                <li class="service-picker-item">
                                    <label>
                                        <input
                                            type="checkbox"
                                            prop:checked=move || flow.with(|f| f.is_selected(&id))
                                            on:change=move |_| on_toggle.run(id)
                                        />
                                        <span class="service-name">{service.activity_name.clone()}</span>
                                        <span class="service-duration">{duration}</span>
                                        <span class="service-price">{price}</span>
                                    </label>
                                </li>
                            }
                        })
                        .collect_view()
                })}
            </ul>
            <div class="service-picker-totals">
                <span>"Total: "</span>
                <strong>{move || format_price(flow.with(|f| f.total_price()))}</strong>
                <span>" · "</span>
                <span>{move || format_duration(flow.with(|f| f.total_duration()))}</span>
            </div>
        </div>
    }
}
