use leptos::*;
use leptos_router::{use_navigate, use_params_map};

use encore_common::{
    event::CreateEventRequest,
    validate::{EventValidator, RequestValidator},
};

use crate::{
    components::{error::ErrorText, modal::AlertModal},
    forms,
    pages::event_path,
    session::require_api,
};

/// Raw form state before coercion and validation.
#[derive(Clone, Debug, Default)]
struct EventInput {
    name: String,
    venue: String,
    starts_on: String,
    description: String,
}

/// Coerce the raw input into an event payload for the given contract, or
/// explain why it cannot be submitted yet.
fn build_request(contract_id: i64, input: &EventInput) -> Result<CreateEventRequest, String> {
    let request = CreateEventRequest {
        contract_id,
        name: input.name.trim().to_owned(),
        venue: input.venue.trim().to_owned(),
        starts_on: forms::parse_date(&input.starts_on)?,
        description: forms::optional_text(&input.description),
    };
    EventValidator::validate(&request)?;
    Ok(request)
}

/// Schedule an event under the contract named by the `:id` route
/// parameter.
#[component]
pub fn NewEvent(cx: Scope) -> impl IntoView {
    let params = use_params_map(cx);
    let contract_id = Signal::derive(cx, move || {
        params.with(|params| params.get("id").and_then(|id| id.parse::<i64>().ok()))
    });
    let input = create_rw_signal(cx, EventInput::default());
    let (page_error, set_page_error) = create_signal(cx, None::<String>);
    let (failure, set_failure) = create_signal(cx, None::<String>);

    let create_action = create_action(cx, move |request: &CreateEventRequest| {
        let request = request.clone();
        async move {
            let result = async { require_api()?.create_event(&request).await }.await;
            match result {
                Ok(id) => {
                    set_page_error.update(|error| *error = None);
                    let navigate = use_navigate(cx);
                    if let Err(error) = navigate(&event_path(id), Default::default()) {
                        log::error!("{error}");
                    }
                }
                Err(error) => set_failure.update(|message| *message = Some(error.to_string())),
            }
        }
    });

    let submit = move |_| {
        let Some(contract_id) = contract_id.get_untracked() else {
            set_page_error.update(|error| *error = Some("No contract selected".to_owned()));
            return;
        };
        match build_request(contract_id, &input.get_untracked()) {
            Ok(request) => create_action.dispatch(request),
            Err(message) => set_page_error.update(|error| *error = Some(message)),
        }
    };

    let close_failure = move || set_failure.update(|message| *message = None);

    view! { cx,
        <main class="container py-4">
            <h3>"Schedule an event"</h3>
            <form on:submit=|ev| ev.prevent_default()>
                <div class="form-group mb-3">
                    <label for="event-name">"Name"</label>
                    <input
                        class="form-control"
                        type="text"
                        id="event-name"
                        name="event-name"
                        on:input=move |ev| input.update(|input| input.name = event_target_value(&ev))
                    />
                </div>
                <div class="form-group mb-3">
                    <label for="event-venue">"Venue"</label>
                    <input
                        class="form-control"
                        type="text"
                        id="event-venue"
                        name="event-venue"
                        on:input=move |ev| input.update(|input| input.venue = event_target_value(&ev))
                    />
                </div>
                <div class="form-group mb-3">
                    <label for="event-date">"Date"</label>
                    <input
                        class="form-control"
                        type="date"
                        id="event-date"
                        name="event-date"
                        on:input=move |ev| {
                            input.update(|input| input.starts_on = event_target_value(&ev));
                        }
                    />
                </div>
                <div class="form-group mb-3">
                    <label for="event-description">"Description"</label>
                    <textarea
                        class="form-control"
                        id="event-description"
                        name="event-description"
                        rows="3"
                        on:input=move |ev| {
                            input.update(|input| input.description = event_target_value(&ev));
                        }
                    ></textarea>
                </div>
                <ErrorText error=page_error.into()/>
                <button class="btn btn-primary" type="submit" on:click=submit>
                    "Create event"
                </button>
            </form>
            <AlertModal message=failure on_close=close_failure/>
        </main>
    }
}

#[cfg(test)]
mod test {
    use super::{build_request, EventInput};

    fn valid_input() -> EventInput {
        EventInput {
            name: "Opening night".to_owned(),
            venue: "Stadthalle".to_owned(),
            starts_on: "2026-09-12".to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn build_request_should_parse_the_date_input() {
        let request = build_request(42, &valid_input()).unwrap();
        assert_eq!(request.contract_id, 42);
        assert_eq!(request.starts_on.to_string(), "2026-09-12");
        assert_eq!(request.description, None);
    }

    #[test]
    fn build_request_should_reject_blank_date() {
        let mut input = valid_input();
        input.starts_on = String::new();
        assert!(build_request(42, &input).is_err());
    }
}
