use leptos::*;
use leptos_router::{use_params_map, A};

use encore_common::contract::ContractRole;

use crate::{
    api::ContractDetail,
    components::loading::Loading,
    fetch::{redirect_to_login_on_expiry, use_resource, FetchState},
    pages::new_event_path,
    session::{require_api, use_session},
};

/// Contract detail: the record plus both parties, loaded as one
/// aggregate, with the viewer's role derived once everything is present.
#[component]
pub fn Contract(cx: Scope) -> impl IntoView {
    let params = use_params_map(cx);
    let session = use_session(cx);
    let id = Signal::derive(cx, move || {
        params.with(|params| params.get("id").and_then(|id| id.parse::<i64>().ok()))
    });
    let detail = use_resource(cx, id, move |id| async move {
        require_api()?.contract_detail(id).await
    });
    redirect_to_login_on_expiry(cx, detail);

    // Role needs the session user and all three fetched records; until
    // then it stays unset and nothing role-specific renders.
    let role = Signal::derive(cx, move || {
        let user = session.user()?;
        detail.with(|state| state.data().map(|detail| detail.contract.role_of(user.id)))
    });

    view! { cx,
        <main class="container py-4">
            {move || detail.with(|state| match state {
                FetchState::Idle | FetchState::Loading => view! { cx, <Loading/> }.into_view(cx),
                FetchState::Failed(error) => view! { cx,
                    <p class="text-danger">{error.message.clone()}</p>
                }
                .into_view(cx),
                FetchState::Loaded(detail) => contract_view(cx, detail, role),
            })}
        </main>
    }
}

fn contract_view(cx: Scope, detail: &ContractDetail, role: Signal<Option<ContractRole>>) -> View {
    let contract = detail.contract.clone();
    let currency = contract.currency_code.clone();
    let fee_rows = [
        ("Performance fee", contract.performance_fee),
        ("Travel expenses", contract.travel_expenses),
        ("Accommodation expenses", contract.accommodation_expenses),
        ("Other expenses", contract.other_expenses),
    ]
    .into_iter()
    .map(|(label, amount)| {
        let currency = currency.clone();
        view! { cx,
            <tr>
                <td>{label}</td>
                <td class="text-end">{currency} " " {format!("{amount:.2}")}</td>
            </tr>
        }
    })
    .collect::<Vec<_>>();

    view! { cx,
        <h3>{contract.title.clone()}</h3>
        {move || role.get().map(|role| view! { cx,
            <span class="badge text-bg-secondary">{role.as_str()}</span>
        })}
        <p class="mt-2">
            "Offered by " <strong>{detail.offeror.full_name()}</strong>
            " to " <strong>{detail.offeree.full_name()}</strong>
        </p>
        {contract.description.clone().map(|description| view! { cx, <p>{description}</p> })}
        <table class="table w-auto">
            <tbody>
                {fee_rows}
                <tr class="table-group-divider">
                    <td><strong>"Total fee"</strong></td>
                    <td class="text-end"><strong>
                        {contract.currency_code.clone()} " " {format!("{:.2}", contract.total_fee)}
                    </strong></td>
                </tr>
            </tbody>
        </table>
        <p>
            {format!(
                "{}% due upon signing, {}% upon completion.",
                contract.upon_signing, contract.upon_completion
            )}
        </p>
        {move || {
            let is_party = matches!(
                role.get(),
                Some(ContractRole::Offeror | ContractRole::Offeree)
            );
            is_party.then(|| view! { cx,
                <A class="btn btn-outline-primary" href=new_event_path(contract.id)>
                    "Schedule an event"
                </A>
            })
        }}
    }
    .into_view(cx)
}
