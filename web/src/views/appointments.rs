use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_navigate;
use shared_types::{Appointment, AppointmentStatus, Role};
use thaw::{Button, ButtonAppearance};

use crate::components::{login_path, use_api, use_session_state, ErrorView, LoadingView};
use crate::error::ApiError;
use crate::utils::timezone::format_appointment_time;

/// Who the appointment is with, from the viewer's side.
fn counterpart(appointment: &Appointment, role: Option<Role>) -> String {
    let unknown = || "-".to_string();
    if role.is_some_and(|r| r.is_staff()) {
        return appointment.customer_name.clone().unwrap_or_else(unknown);
    }
    match (&appointment.barber_name, &appointment.barbershop_name) {
        (Some(barber), Some(shop)) => format!("{barber} at {shop}"),
        (Some(name), None) | (None, Some(name)) => name.clone(),
        (None, None) => unknown(),
    }
}

/// What the page does with a failed backend call.
#[derive(Debug, PartialEq)]
enum Failure {
    /// The token was rejected: sign out and log in again.
    Relogin,
    Show(String),
}

impl Failure {
    fn from_error(error: &ApiError) -> Self {
        if error.is_unauthorized() {
            Failure::Relogin
        } else {
            Failure::Show(error.user_message())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Change {
    Cancel,
    Conclude,
}

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let api = use_api();
    let state = use_session_state();
    let role = Memo::new(move |_| state.session.with(|s| s.as_ref().and_then(|s| s.role)));

    let appointments = RwSignal::new(Vec::<Appointment>::new());
    let loading = RwSignal::new(true);
    let error_message = RwSignal::new(Option::<String>::None);
    let reload = RwSignal::new(0u32);
    let needs_login = RwSignal::new(false);

    let fail = move |error: ApiError| match Failure::from_error(&error) {
        Failure::Relogin => {
            needs_login.try_set(true);
        }
        Failure::Show(message) => {
            error_message.try_set(Some(message));
        }
    };

    Effect::new({
        let api = api.clone();
        let navigate = use_navigate();
        move |_| {
            if needs_login.get() {
                state.sign_out(&api);
                navigate(&login_path("/appointments"), Default::default());
            }
        }
    });

    Effect::new({
        let api = api.clone();
        move |_| {
            reload.track();
            loading.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api.my_appointments().await {
                    Ok(list) => {
                        appointments.try_set(list);
                        error_message.try_set(None);
                    }
                    Err(e) => {
                        leptos::logging::error!("failed to load appointments: {e}");
                        fail(e);
                    }
                }
                loading.try_set(false);
            });
        }
    });

    let apply_change = Callback::new(move |(id, change): (i64, Change)| {
        let api = api.clone();
        spawn_local(async move {
            let result = match change {
                Change::Cancel => api.cancel_appointment(id).await,
                Change::Conclude => api.conclude_appointment(id).await,
            };
            match result {
                Ok(()) => {
                    reload.try_update(|n| *n += 1);
                }
                Err(e) => {
                    leptos::logging::error!("failed to update appointment {id}: {e}");
                    fail(e);
                }
            }
        });
    });

    view! {
        <div class="appointments-container">
            <h1>"My appointments"</h1>

            {move || error_message.get().map(|msg| view! { <ErrorView message=Some(msg) /> })}

            {move || {
                if loading.get() {
                    return view! { <LoadingView message=Some("Loading appointments...".to_string()) /> }.into_any();
                }
                let list = appointments.get();
                if list.is_empty() {
                    return view! { <p class="appointments-empty">"No appointments yet."</p> }.into_any();
                }

                let role = role.get();
                let is_staff = role.is_some_and(|r| r.is_staff());
                view! {
                    <ul class="appointment-list">
                        {list.into_iter().map(|appointment| {
                            let id = appointment.id;
                            let scheduled = appointment.status == AppointmentStatus::Scheduled;
                            let with = counterpart(&appointment, role);
                            let services = appointment.activity_names.join(", ");
                            view! {
                                <li class="appointment-card">
                                    <div class="appointment-card__when">
                                        {format_appointment_time(&appointment.start_time)}
                                    </div>
                                    <div class="appointment-card__with">{with}</div>
                                    <div class="appointment-card__services">{services}</div>
                                    <div class="appointment-card__status">{appointment.status.label()}</div>
                                    {scheduled.then(|| view! {
                                        <div class="appointment-card__actions">
                                            <Button
                                                appearance=ButtonAppearance::Secondary
                                                on_click=move |_| apply_change.run((id, Change::Cancel))
                                            >
                                                "Cancel"
                                            </Button>
                                            {is_staff.then(|| view! {
                                                <Button
                                                    appearance=ButtonAppearance::Primary
                                                    on_click=move |_| apply_change.run((id, Change::Conclude))
                                                >
                                                    "Mark as done"
                                                </Button>
                                            })}
                                        </div>
                                    })}
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any()
            }}
        </div>
    }
}
