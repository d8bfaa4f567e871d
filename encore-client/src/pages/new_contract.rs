use leptos::*;
use leptos_router::use_navigate;

use encore_common::{
    contract::{self, CreateContractRequest},
    validate::{ContractValidator, RequestValidator},
};

use crate::{
    components::{error::ErrorText, modal::AlertModal},
    forms,
    pages::contract_path,
    session::require_api,
};

/// Raw form state before coercion and validation.
#[derive(Clone, Debug, Default)]
struct ContractInput {
    offeree_id: String,
    title: String,
    description: String,
    currency_code: String,
    performance_fee: String,
    travel_expenses: String,
    accommodation_expenses: String,
    other_expenses: String,
    upon_signing: String,
}

/// Coerce the raw input into a contract payload: blank fees become 0, the
/// total is summed, and the completion share is the remainder of the
/// signing share. Validation runs on the finished payload.
fn build_request(input: &ContractInput) -> Result<CreateContractRequest, String> {
    let offeree_id = forms::parse_id(&input.offeree_id)?;
    let performance_fee = forms::parse_fee(&input.performance_fee)?;
    let travel_expenses = forms::parse_fee(&input.travel_expenses)?;
    let accommodation_expenses = forms::parse_fee(&input.accommodation_expenses)?;
    let other_expenses = forms::parse_fee(&input.other_expenses)?;
    let upon_signing = forms::parse_percentage(&input.upon_signing)?;
    let request = CreateContractRequest {
        offeree_id,
        title: input.title.trim().to_owned(),
        description: forms::optional_text(&input.description),
        currency_code: input.currency_code.trim().to_owned(),
        performance_fee: performance_fee.unwrap_or(0.0),
        travel_expenses: travel_expenses.unwrap_or(0.0),
        accommodation_expenses: accommodation_expenses.unwrap_or(0.0),
        other_expenses: other_expenses.unwrap_or(0.0),
        total_fee: contract::total_fee(
            performance_fee,
            travel_expenses,
            accommodation_expenses,
            other_expenses,
        ),
        upon_signing,
        upon_completion: contract::upon_completion(upon_signing),
    };
    ContractValidator::validate(&request)?;
    Ok(request)
}

#[component]
pub fn NewContract(cx: Scope) -> impl IntoView {
    let input = create_rw_signal(cx, ContractInput::default());
    let (page_error, set_page_error) = create_signal(cx, None::<String>);
    let (failure, set_failure) = create_signal(cx, None::<String>);
    let (created_id, set_created_id) = create_signal(cx, None::<i64>);

    // Live mirrors of the two derived figures the form displays.
    let total_fee = Signal::derive(cx, move || {
        input.with(|input| {
            contract::total_fee(
                forms::parse_fee(&input.performance_fee).ok().flatten(),
                forms::parse_fee(&input.travel_expenses).ok().flatten(),
                forms::parse_fee(&input.accommodation_expenses).ok().flatten(),
                forms::parse_fee(&input.other_expenses).ok().flatten(),
            )
        })
    });
    let upon_completion = Signal::derive(cx, move || {
        input.with(|input| {
            forms::parse_percentage(&input.upon_signing)
                .map(contract::upon_completion)
                .ok()
        })
    });

    let create_action = create_action(cx, move |request: &CreateContractRequest| {
        let request = request.clone();
        async move {
            let result = async { require_api()?.create_contract(&request).await }.await;
            match result {
                Ok(id) => {
                    set_page_error.update(|error| *error = None);
                    set_created_id.update(|created| *created = Some(id));
                }
                Err(error) => set_failure.update(|message| *message = Some(error.to_string())),
            }
        }
    });

    let submit = move |_| match build_request(&input.get_untracked()) {
        Ok(request) => create_action.dispatch(request),
        Err(message) => set_page_error.update(|error| *error = Some(message)),
    };

    // Success is acknowledged by landing on the contract just created.
    create_effect(cx, move |_| {
        if let Some(id) = created_id.get() {
            let navigate = use_navigate(cx);
            if let Err(error) = navigate(&contract_path(id), Default::default()) {
                log::error!("{error}");
            }
        }
    });

    let close_failure = move || set_failure.update(|message| *message = None);

    let fee_field = move |label: &'static str,
                          id: &'static str,
                          apply: fn(&mut ContractInput, String)| {
        view! { cx,
            <div class="col-md-3">
                <label for=id class="form-label">{label}</label>
                <input
                    class="form-control"
                    type="number"
                    min="0"
                    step="0.01"
                    id=id
                    name=id
                    on:input=move |ev| input.update(|input| apply(input, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! { cx,
        <main class="container py-4">
            <h3>"New contract"</h3>
            <form on:submit=|ev| ev.prevent_default()>
                <div class="form-group mb-3">
                    <label for="offeree-id">"Offeree user id"</label>
                    <input
                        class="form-control"
                        type="number"
                        min="1"
                        id="offeree-id"
                        name="offeree-id"
                        on:input=move |ev| {
                            input.update(|input| input.offeree_id = event_target_value(&ev));
                        }
                    />
                </div>
                <div class="form-group mb-3">
                    <label for="title">"Title"</label>
                    <input
                        class="form-control"
                        type="text"
                        id="title"
                        name="title"
                        on:input=move |ev| {
                            input.update(|input| input.title = event_target_value(&ev));
                        }
                    />
                </div>
                <div class="form-group mb-3">
                    <label for="description">"Description"</label>
                    <textarea
                        class="form-control"
                        id="description"
                        name="description"
                        rows="3"
                        on:input=move |ev| {
                            input.update(|input| input.description = event_target_value(&ev));
                        }
                    ></textarea>
                </div>
                <div class="form-group mb-3">
                    <label for="currency-code">"Currency code"</label>
                    <input
                        class="form-control"
                        type="text"
                        id="currency-code"
                        name="currency-code"
                        maxlength="3"
                        placeholder="EUR"
                        on:input=move |ev| {
                            input.update(|input| input.currency_code = event_target_value(&ev));
                        }
                    />
                </div>
                <div class="row mb-3">
                    {fee_field("Performance fee", "performance-fee", |input, value| {
                        input.performance_fee = value;
                    })}
                    {fee_field("Travel expenses", "travel-expenses", |input, value| {
                        input.travel_expenses = value;
                    })}
                    {fee_field("Accommodation", "accommodation-expenses", |input, value| {
                        input.accommodation_expenses = value;
                    })}
                    {fee_field("Other expenses", "other-expenses", |input, value| {
                        input.other_expenses = value;
                    })}
                </div>
                <p>
                    "Total fee: "
                    <strong>{move || format!("{:.2}", total_fee.get())}</strong>
                </p>
                <div class="form-group mb-3">
                    <label for="upon-signing">"Share due upon signing (%)"</label>
                    <input
                        class="form-control"
                        type="number"
                        min="0"
                        max="100"
                        id="upon-signing"
                        name="upon-signing"
                        on:input=move |ev| {
                            input.update(|input| input.upon_signing = event_target_value(&ev));
                        }
                    />
                </div>
                <p>
                    "Due upon completion: "
                    <strong>{move || match upon_completion.get() {
                        Some(share) => format!("{share}%"),
                        None => "-".to_owned(),
                    }}</strong>
                </p>
                <ErrorText error=page_error.into()/>
                <button class="btn btn-primary" type="submit" on:click=submit>
                    "Create contract"
                </button>
            </form>
            <AlertModal message=failure on_close=close_failure/>
        </main>
    }
}

#[cfg(test)]
mod test {
    use super::{build_request, ContractInput};

    fn valid_input() -> ContractInput {
        ContractInput {
            offeree_id: "2".to_owned(),
            title: "Festival booking".to_owned(),
            description: String::new(),
            currency_code: "EUR".to_owned(),
            performance_fee: "1000".to_owned(),
            travel_expenses: "150".to_owned(),
            accommodation_expenses: String::new(),
            other_expenses: String::new(),
            upon_signing: "70".to_owned(),
        }
    }

    #[test]
    fn build_request_should_derive_completion_share_and_total() {
        let request = build_request(&valid_input()).unwrap();
        assert_eq!(request.upon_signing, 70);
        assert_eq!(request.upon_completion, 30);
        assert_eq!(request.total_fee, 1150.0);
        assert_eq!(request.accommodation_expenses, 0.0);
        assert_eq!(request.other_expenses, 0.0);
    }

    #[test]
    fn build_request_should_reject_lowercase_currency() {
        let mut input = valid_input();
        input.currency_code = "eur".to_owned();
        assert!(build_request(&input).is_err());
    }

    #[test]
    fn build_request_should_reject_missing_offeree() {
        let mut input = valid_input();
        input.offeree_id = String::new();
        assert!(build_request(&input).is_err());
    }
}
