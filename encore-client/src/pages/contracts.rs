use leptos::*;
use leptos_router::A;

use encore_common::contract::Contract;

use crate::{
    components::loading::Loading,
    fetch::{redirect_to_login_on_expiry, use_resource, FetchState},
    pages::{contract_path, Page},
    session::{require_api, use_session},
};

/// The session user's contracts. The fetch is keyed on the session user
/// id, so nothing is requested until the session has settled.
#[component]
pub fn Contracts(cx: Scope) -> impl IntoView {
    let session = use_session(cx);
    let key = Signal::derive(cx, move || session.user().map(|user| user.id));
    let contracts = use_resource(cx, key, move |user_id| async move {
        require_api()?.user_contracts(user_id).await
    });
    redirect_to_login_on_expiry(cx, contracts);

    view! { cx,
        <main class="container py-4">
            <div class="d-flex justify-content-between align-items-center">
                <h3>"Your contracts"</h3>
                <A class="btn btn-primary" href=Page::NewContract.path()>"New contract"</A>
            </div>
            {move || contracts.with(|state| match state {
                FetchState::Idle | FetchState::Loading => view! { cx, <Loading/> }.into_view(cx),
                FetchState::Failed(error) => view! { cx,
                    <p class="text-danger">{error.message.clone()}</p>
                }
                .into_view(cx),
                FetchState::Loaded(contracts) if contracts.is_empty() => view! { cx,
                    <p>"No contracts yet."</p>
                }
                .into_view(cx),
                FetchState::Loaded(contracts) => contracts_table(cx, contracts),
            })}
        </main>
    }
}

fn contracts_table(cx: Scope, contracts: &[Contract]) -> View {
    let rows = contracts
        .iter()
        .map(|contract| {
            let path = contract_path(contract.id);
            let title = contract.title.clone();
            let currency_code = contract.currency_code.clone();
            let total_fee = contract.total_fee;
            let upon_signing = contract.upon_signing;
            let upon_completion = contract.upon_completion;
            view! { cx,
                <tr>
                    <td><A href=path>{title}</A></td>
                    <td>{currency_code} " " {format!("{:.2}", total_fee)}</td>
                    <td>{format!("{}% / {}%", upon_signing, upon_completion)}</td>
                </tr>
            }
        })
        .collect::<Vec<_>>();
    view! { cx,
        <table class="table table-hover">
            <thead>
                <tr>
                    <th>"Title"</th>
                    <th>"Total fee"</th>
                    <th>"Signing / completion split"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
    .into_view(cx)
}
