use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::{use_location, use_navigate, use_params_map};
use thaw::{Button, ButtonAppearance, ButtonType};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::booking::{submit_booking, BookingBackend, BookingFlow, QueryTicket};
use crate::components::{
    login_path, use_api, use_session_state, ErrorView, LoadingView, ServicePicker,
    TimeSlotPicker,
};
use crate::error::{ApiError, BookingError};
use crate::utils::timezone::today_iso;

/// Runs the availability lookup for `ticket` and hands the answer back to
/// the flow, which drops it if a newer lookup was issued meanwhile.
fn dispatch_query(
    api: ApiClient,
    flow: RwSignal<BookingFlow>,
    needs_login: RwSignal<bool>,
    ticket: Option<QueryTicket>,
) {
    let Some(ticket) = ticket else {
        return;
    };
    spawn_local(async move {
        let result = api.availability(&ticket.query).await;
        if matches!(&result, Err(e) if e.is_unauthorized()) {
            needs_login.try_set(true);
        }
        flow.try_update(|f| f.apply_availability(&ticket, result));
    });
}

/// Message for a failed submission and whether sending it again can help.
fn submission_failure(error: &BookingError) -> (String, bool) {
    (error.user_message(), error.is_retryable())
}

#[component]
pub fn BookingPage() -> impl IntoView {
    let api = use_api();
    let state = use_session_state();
    let params = use_params_map();
    let navigate = use_navigate();
    let location = use_location();

    let shop_id = Memo::new(move |_| {
        params
            .read()
            .get("id")
            .and_then(|id| Uuid::parse_str(&id).ok())
    });

    let flow = RwSignal::new(BookingFlow::new(Uuid::nil()));
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);
    let action_error = RwSignal::new(Option::<String>::None);
    let submit_retryable = RwSignal::new(false);
    let submitting = RwSignal::new(false);
    let needs_login = RwSignal::new(false);
    let booked = RwSignal::new(Option::<i64>::None);

    // Catalog and roster for the shop in the URL.
    Effect::new({
        let api = api.clone();
        move |_| {
            let Some(id) = shop_id.get() else {
                load_error.set(Some("Unknown barbershop".to_string()));
                loading.set(false);
                return;
            };
            flow.set(BookingFlow::new(id));
            loading.set(true);
            load_error.set(None);

            let api = api.clone();
            spawn_local(async move {
                let still_here = move || flow.try_with_untracked(|f| f.shop_id() == id) == Some(true);

                let report = move |e: ApiError| {
                    if e.is_unauthorized() {
                        needs_login.try_set(true);
                    } else {
                        leptos::logging::error!("failed to load barbershop {id}: {e}");
                        load_error.try_set(Some(e.user_message()));
                    }
                };

                match api.shop_activities(id).await {
                    Ok(catalog) if still_here() => {
                        let ticket = flow.try_update(|f| f.set_catalog(catalog)).flatten();
                        dispatch_query(api.clone(), flow, needs_login, ticket);
                    }
                    Ok(_) => return,
                    Err(e) => report(e),
                }
                match api.shop_barbers(id).await {
                    Ok(barbers) if still_here() => {
                        let ticket = flow.try_update(|f| f.set_barbers(barbers)).flatten();
                        dispatch_query(api.clone(), flow, needs_login, ticket);
                    }
                    Ok(_) => return,
                    Err(e) => report(e),
                }
                loading.try_set(false);
            });
        }
    });

    Effect::new({
        let api = api.clone();
        let navigate = navigate.clone();
        move |_| {
            if needs_login.get() {
                state.sign_out(&api);
                navigate(&login_path(&location.pathname.get_untracked()), Default::default());
            }
        }
    });

    Effect::new(move |_| {
        if let Some(id) = booked.get() {
            leptos::logging::log!("appointment {id} booked");
            navigate("/", Default::default());
        }
    });

    let show_input_error = move |e: BookingError| {
        submit_retryable.set(false);
        action_error.set(Some(e.user_message()));
    };

    // Each change either starts a new lookup or resets the slot list.
    let on_toggle = Callback::new({
        let api = api.clone();
        move |service_id: Uuid| match flow.try_update(|f| f.toggle_service(service_id)) {
            Some(Ok(ticket)) => dispatch_query(api.clone(), flow, needs_login, ticket),
            Some(Err(e)) => show_input_error(e),
            None => {}
        }
    });

    let on_barber = Callback::new({
        let api = api.clone();
        move |value: String| {
            let Ok(barber_id) = Uuid::parse_str(&value) else {
                return;
            };
            match flow.try_update(|f| f.select_barber(barber_id)) {
                Some(Ok(ticket)) => dispatch_query(api.clone(), flow, needs_login, ticket),
                Some(Err(e)) => show_input_error(e),
                None => {}
            }
        }
    });

    let on_date = Callback::new({
        let api = api.clone();
        move |date: String| {
            let ticket = flow.try_update(|f| f.set_date(date)).flatten();
            dispatch_query(api.clone(), flow, needs_login, ticket);
        }
    });

    let on_slot = Callback::new(move |slot: String| {
        if let Some(Err(e)) = flow.try_update(|f| f.choose_slot(&slot)) {
            show_input_error(e);
        }
    });

    let on_retry = Callback::new({
        let api = api.clone();
        move |_: ()| {
            let ticket = flow.try_update(|f| f.retry_availability()).flatten();
            dispatch_query(api.clone(), flow, needs_login, ticket);
        }
    });

    let can_submit = Memo::new(move |_| flow.with(|f| f.can_submit()));
    let submit_disabled = Memo::new(move |_| !can_submit.get() || submitting.get());

    let on_submit = Callback::new(move |_: ()| {
        if submitting.get_untracked() {
            return;
        }
        let snapshot = flow.get_untracked();
        submitting.set(true);
        action_error.set(None);
        submit_retryable.set(false);

        let api = api.clone();
        spawn_local(async move {
            match submit_booking(&api, &snapshot).await {
                Ok(id) => {
                    booked.try_set(Some(id));
                }
                Err(BookingError::Api(e)) if e.is_unauthorized() => {
                    needs_login.try_set(true);
                }
                Err(e) => {
                    leptos::logging::error!("booking failed: {e}");
                    let (message, retryable) = submission_failure(&e);
                    action_error.try_set(Some(message));
                    submit_retryable.try_set(retryable);
                }
            }
            submitting.try_set(false);
        });
    });

    view! {
        <div class="booking-container">
            <h1 class="booking-title">"Book an appointment"</h1>

            {move || load_error.get().map(|msg| view! { <ErrorView message=Some(msg) /> })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <LoadingView message=Some("Loading services and barbers...".to_string()) /> }
            >
                <ServicePicker flow=flow on_toggle=on_toggle />

                <div class="booking-field">
                    <label for="booking-barber">"Barber"</label>
                    <select id="booking-barber" on:change=move |ev| on_barber.run(event_target_value(&ev))>
                        <option value="" disabled=true selected=move || flow.with(|f| f.draft().barber_id.is_none())>
                            "Choose a barber"
                        </option>
                        {move || flow.with(|f| {
                            let chosen = f.draft().barber_id;
                            f.barbers()
                                .iter()
                                .map(|barber| view! {
                                    <option value={barber.id.to_string()} selected={chosen == Some(barber.id)}>
                                        {barber.name.clone()}
                                    </option>
                                })
                                .collect_view()
                        })}
                    </select>
                </div>

                <div class="booking-field">
                    <label for="booking-date">"Date"</label>
                    <input
                        id="booking-date"
                        type="date"
                        min=today_iso()
                        prop:value=move || flow.with(|f| f.draft().date.clone())
                        on:input=move |ev| on_date.run(event_target_value(&ev))
                    />
                </div>

                <TimeSlotPicker
                    state=Signal::derive(move || flow.with(|f| f.availability().clone()))
                    selected=Signal::derive(move || flow.with(|f| f.selected_slot().map(str::to_string)))
                    on_select=on_slot
                    on_retry=on_retry
                />

                {move || action_error.get().map(|msg| {
                    if submit_retryable.get() {
                        view! { <ErrorView message=Some(msg) on_retry=on_submit /> }.into_any()
                    } else {
                        view! { <ErrorView message=Some(msg) /> }.into_any()
                    }
                })}

                <form on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.run(());
                }>
                    <Button
                        class="booking-submit-btn"
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        loading=Signal::from(submitting)
                        disabled=Signal::from(submit_disabled)
                    >
                        "Confirm booking"
                    </Button>
                </form>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MissingField;
    use http::StatusCode;

    #[test]
    fn taken_slot_can_be_sent_again() {
        let taken = BookingError::Api(ApiError::Status {
            status: StatusCode::CONFLICT,
            message: "Horário já ocupado".to_string(),
        });
        assert_eq!(
            submission_failure(&taken),
            ("Horário já ocupado".to_string(), true)
        );
    }

    #[test]
    fn incomplete_draft_needs_input_first() {
        let incomplete = BookingError::Incomplete {
            missing: vec![MissingField::Slot],
        };
        assert_eq!(
            submission_failure(&incomplete),
            ("Please choose: time".to_string(), false)
        );
    }
}
