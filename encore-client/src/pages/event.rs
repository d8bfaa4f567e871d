use leptos::*;
use leptos_router::{use_params_map, A};

use encore_common::event::Event;

use crate::{
    components::loading::Loading,
    fetch::{redirect_to_login_on_expiry, use_resource, FetchState},
    pages::contract_path,
    session::require_api,
};

/// Event detail page, keyed by the `:id` route parameter.
#[component]
pub fn Event(cx: Scope) -> impl IntoView {
    let params = use_params_map(cx);
    let id = Signal::derive(cx, move || {
        params.with(|params| params.get("id").and_then(|id| id.parse::<i64>().ok()))
    });
    let event = use_resource(cx, id, move |id| async move {
        require_api()?.event(id).await
    });
    redirect_to_login_on_expiry(cx, event);

    view! { cx,
        <main class="container py-4">
            {move || event.with(|state| match state {
                FetchState::Idle | FetchState::Loading => view! { cx, <Loading/> }.into_view(cx),
                FetchState::Failed(error) => view! { cx,
                    <p class="text-danger">{error.message.clone()}</p>
                }
                .into_view(cx),
                FetchState::Loaded(event) => event_view(cx, event),
            })}
        </main>
    }
}

fn event_view(cx: Scope, event: &Event) -> View {
    let event = event.clone();
    view! { cx,
        <h3>{event.name.clone()}</h3>
        <p>
            {event.venue.clone()}
            ", "
            {event.starts_on.format("%-d %B %Y").to_string()}
        </p>
        {event.description.clone().map(|description| view! { cx, <p>{description}</p> })}
        <A class="btn btn-outline-primary" href=contract_path(event.contract_id)>
            "View the contract"
        </A>
    }
    .into_view(cx)
}
