use leptos::*;
use leptos_router::use_navigate;

use encore_common::{
    user::{CreateUserRequest, EntityKind},
    validate::{password_pair, NewUserValidator, RequestValidator},
};

use crate::{
    api::UnauthorizedApi,
    components::{error::ErrorText, modal::AlertModal},
    config, forms,
    pages::Page,
};

/// Raw form state before coercion and validation.
#[derive(Clone, Debug, Default)]
struct RegisterInput {
    username: String,
    password: String,
    confirm_password: String,
    name: String,
    surname: String,
    email: String,
    phone_number: String,
    type_of_entity: String,
    vat_id: String,
    bank_account: String,
}

/// Coerce the raw input into a create-user payload, or explain why it
/// cannot be submitted yet.
fn build_request(input: &RegisterInput) -> Result<CreateUserRequest, String> {
    password_pair(&input.password, &input.confirm_password)?;
    let request = CreateUserRequest {
        username: input.username.trim().to_owned(),
        password: input.password.clone(),
        name: input.name.trim().to_owned(),
        surname: input.surname.trim().to_owned(),
        email: input.email.trim().to_owned(),
        phone_number: forms::optional_text(&input.phone_number),
        type_of_entity: match input.type_of_entity.as_str() {
            "company" => EntityKind::Company,
            _ => EntityKind::Individual,
        },
        vat_id: forms::optional_text(&input.vat_id),
        bank_account: forms::optional_text(&input.bank_account),
    };
    NewUserValidator::validate(&request)?;
    Ok(request)
}

#[component]
pub fn Register(cx: Scope) -> impl IntoView {
    let input = create_rw_signal(cx, RegisterInput::default());
    let (page_error, set_page_error) = create_signal(cx, None::<String>);
    let (success, set_success) = create_signal(cx, None::<String>);

    let register_action = create_action(cx, move |request: &CreateUserRequest| {
        let request = request.clone();
        async move {
            let api = UnauthorizedApi::new(config::api_url());
            match api.register(&request).await {
                Ok(_id) => {
                    set_page_error.update(|error| *error = None);
                    set_success.update(|message| {
                        *message = Some("Account created. You can now sign in.".to_owned());
                    });
                }
                Err(error) => set_page_error.update(|message| *message = Some(error.to_string())),
            }
        }
    });

    let submit = move |_| match build_request(&input.get_untracked()) {
        Ok(request) => register_action.dispatch(request),
        Err(message) => set_page_error.update(|error| *error = Some(message)),
    };

    let close_success = move || {
        set_success.update(|message| *message = None);
        let navigate = use_navigate(cx);
        if let Err(error) = navigate(Page::Login.path(), Default::default()) {
            log::error!("{error}");
        }
    };

    let text_field = move |label: &'static str,
                           id: &'static str,
                           kind: &'static str,
                           apply: fn(&mut RegisterInput, String)| {
        view! { cx,
            <div class="form-group mb-3">
                <label for=id>{label}</label>
                <input
                    class="form-control"
                    type=kind
                    id=id
                    name=id
                    on:input=move |ev| input.update(|input| apply(input, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! { cx,
        <main class="container py-4">
            <h3>"Create your Encore account"</h3>
            <form on:submit=|ev| ev.prevent_default()>
                {text_field("Username", "username", "text", |input, value| input.username = value)}
                {text_field("Password", "password", "password", |input, value| input.password = value)}
                {text_field("Confirm password", "confirm-password", "password", |input, value| {
                    input.confirm_password = value;
                })}
                {text_field("First name", "name", "text", |input, value| input.name = value)}
                {text_field("Surname", "surname", "text", |input, value| input.surname = value)}
                {text_field("Email", "email", "email", |input, value| input.email = value)}
                {text_field("Phone number", "phone-number", "tel", |input, value| {
                    input.phone_number = value;
                })}
                <div class="form-group mb-3">
                    <label for="type-of-entity">"Entity type"</label>
                    <select
                        class="form-select"
                        id="type-of-entity"
                        name="type-of-entity"
                        on:input=move |ev| {
                            input.update(|input| input.type_of_entity = event_target_value(&ev));
                        }
                    >
                        <option value="individual" selected>"Individual"</option>
                        <option value="company">"Company"</option>
                    </select>
                </div>
                {text_field("VAT id (optional)", "vat-id", "text", |input, value| input.vat_id = value)}
                {text_field("Bank account (optional)", "bank-account", "text", |input, value| {
                    input.bank_account = value;
                })}
                <ErrorText error=page_error.into()/>
                <button class="btn btn-primary" type="submit" on:click=submit>"Register"</button>
            </form>
            <AlertModal message=success on_close=close_success/>
        </main>
    }
}

#[cfg(test)]
mod test {
    use super::{build_request, RegisterInput};
    use encore_common::user::EntityKind;

    fn valid_input() -> RegisterInput {
        RegisterInput {
            username: "alice".to_owned(),
            password: "correct horse".to_owned(),
            confirm_password: "correct horse".to_owned(),
            name: "Alice".to_owned(),
            surname: "Moreau".to_owned(),
            email: "alice@example.com".to_owned(),
            phone_number: String::new(),
            type_of_entity: "company".to_owned(),
            vat_id: " FR123456 ".to_owned(),
            bank_account: String::new(),
        }
    }

    #[test]
    fn build_request_should_coerce_optional_fields() {
        let request = build_request(&valid_input()).unwrap();
        assert_eq!(request.phone_number, None);
        assert_eq!(request.vat_id.as_deref(), Some("FR123456"));
        assert_eq!(request.type_of_entity, EntityKind::Company);
    }

    #[test]
    fn build_request_should_block_mismatched_passwords() {
        let mut input = valid_input();
        input.confirm_password = "different horse".to_owned();
        assert!(build_request(&input).is_err());
    }

    #[test]
    fn build_request_should_block_invalid_email() {
        let mut input = valid_input();
        input.email = "not-an-address".to_owned();
        assert!(build_request(&input).is_err());
    }
}
