use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::A;
use shared_types::Barbershop;
use thaw::*;

use crate::api::barbershops::filter_barbershops;
use crate::components::{use_api, ErrorView, LoadingView};

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let shops = RwSignal::new(Vec::<Barbershop>::new());
    let loading = RwSignal::new(true);
    let error_message = RwSignal::new(Option::<String>::None);
    let search = RwSignal::new(String::new());

    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            match api.list_barbershops().await {
                Ok(list) => {
                    shops.try_set(list);
                }
                Err(e) => {
                    leptos::logging::error!("failed to load barbershops: {e}");
                    error_message.try_set(Some(e.user_message()));
                }
            }
            loading.try_set(false);
        });
    });

    let visible = move || {
        let query = search.get();
        shops.with(|all| {
            filter_barbershops(all, &query)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="homepage-container">
            <div class="homepage-header">
                <h1>"CortaAI"</h1>
                <p>"Find a barbershop and book your next cut"</p>
            </div>

            <Input class="homepage-search" placeholder="Search by name or address" value=search />

            {move || {
                if loading.get() {
                    return view! { <LoadingView message=Some("Loading barbershops...".to_string()) /> }.into_any();
                }
                if let Some(msg) = error_message.get() {
                    return view! { <ErrorView message=Some(msg) /> }.into_any();
                }

                let list = visible();
                if list.is_empty() {
                    return view! { <p class="homepage-empty">"No barbershops found."</p> }.into_any();
                }

                view! {
                    <ul class="shop-list">
                        {list.into_iter().map(|shop| view! {
                            <li class="shop-card">
                                <div class="shop-card__info">
                                    <h3>{shop.name}</h3>
                                    <p>{shop.address.unwrap_or_default()}</p>
                                </div>
                                <A href={format!("/barbershops/{}/booking", shop.id)}>
                                    <Button appearance=ButtonAppearance::Primary>"Book"</Button>
                                </A>
                            </li>
                        }).collect_view()}
                    </ul>
                }.into_any()
            }}
        </div>
    }
}
