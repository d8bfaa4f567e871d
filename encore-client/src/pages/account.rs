use leptos::*;
use leptos_router::use_navigate;

use encore_common::{
    user::{UpdateUserRequest, User},
    validate,
};

use crate::{
    components::{error::ErrorText, loading::Loading, modal::AlertModal},
    forms,
    pages::Page,
    session::{require_api, use_session},
};

/// Raw form state before coercion and validation.
#[derive(Clone, Debug, Default)]
struct AccountInput {
    name: String,
    surname: String,
    email: String,
    phone_number: String,
    vat_id: String,
    bank_account: String,
}

impl AccountInput {
    fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            vat_id: user.vat_id.clone().unwrap_or_default(),
            bank_account: user.bank_account.clone().unwrap_or_default(),
        }
    }
}

/// Coerce the raw input into an account-update payload, or explain why
/// it cannot be submitted yet. Every field is sent; the optional ones go
/// absent when blanked.
fn build_request(input: &AccountInput) -> Result<UpdateUserRequest, String> {
    if input.name.trim().is_empty() || input.surname.trim().is_empty() {
        return Err("Name and surname cannot be empty".to_owned());
    }
    validate::email(input.email.trim())?;
    Ok(UpdateUserRequest {
        name: Some(input.name.trim().to_owned()),
        surname: Some(input.surname.trim().to_owned()),
        email: Some(input.email.trim().to_owned()),
        phone_number: forms::optional_text(&input.phone_number),
        vat_id: forms::optional_text(&input.vat_id),
        bank_account: forms::optional_text(&input.bank_account),
    })
}

/// Account settings for the signed-in user; saves through `PATCH /user`
/// and keeps the session's cached user in sync with the response.
#[component]
pub fn Account(cx: Scope) -> impl IntoView {
    let session = use_session(cx);
    let input = create_rw_signal(cx, None::<AccountInput>);
    let (page_error, set_page_error) = create_signal(cx, None::<String>);
    let (saved, set_saved) = create_signal(cx, None::<String>);

    // Seed the form once the session has a user; edits are local after
    // that.
    create_effect(cx, move |_| {
        if let Some(user) = session.user() {
            if input.get_untracked().is_none() {
                input.set(Some(AccountInput::from_user(&user)));
            }
        }
    });

    let update_action = create_action(cx, move |request: &UpdateUserRequest| {
        let request = request.clone();
        async move {
            let result = async { require_api()?.update_user(&request).await }.await;
            match result {
                Ok(user) => {
                    set_page_error.update(|error| *error = None);
                    session.set_user(Some(user));
                    set_saved.update(|message| *message = Some("Account updated.".to_owned()));
                }
                Err(error) if error.is_unauthorized() => {
                    let navigate = use_navigate(cx);
                    if let Err(error) = navigate(Page::Login.path(), Default::default()) {
                        log::error!("{error}");
                    }
                }
                Err(error) => set_page_error.update(|message| *message = Some(error.to_string())),
            }
        }
    });

    let submit = move |_| {
        let Some(current) = input.get_untracked() else {
            return;
        };
        match build_request(&current) {
            Ok(request) => update_action.dispatch(request),
            Err(message) => set_page_error.update(|error| *error = Some(message)),
        }
    };

    let edit = move |apply: fn(&mut AccountInput, String), value: String| {
        input.update(|input| {
            if let Some(input) = input.as_mut() {
                apply(input, value);
            }
        });
    };

    let text_field = move |label: &'static str,
                           id: &'static str,
                           kind: &'static str,
                           read: fn(&AccountInput) -> String,
                           apply: fn(&mut AccountInput, String)| {
        view! { cx,
            <div class="form-group mb-3">
                <label for=id>{label}</label>
                <input
                    class="form-control"
                    type=kind
                    id=id
                    name=id
                    prop:value=move || input.with(|input| input.as_ref().map(read).unwrap_or_default())
                    on:input=move |ev| edit(apply, event_target_value(&ev))
                />
            </div>
        }
    };

    view! { cx,
        <main class="container py-4">
            <h3>"Your account"</h3>
            {move || match session.user() {
                None if session.is_loading() => view! { cx, <Loading/> }.into_view(cx),
                None => view! { cx, <p>"Sign in to manage your account."</p> }.into_view(cx),
                Some(user) => view! { cx,
                    <p>
                        <strong>{user.username.clone()}</strong>
                        " · "
                        {user.type_of_entity.as_str()}
                        " · "
                        {if user.is_active { "active" } else { "deactivated" }}
                    </p>
                }
                .into_view(cx),
            }}
            <form on:submit=|ev| ev.prevent_default()>
                {text_field("First name", "name", "text", |input| input.name.clone(), |input, value| {
                    input.name = value;
                })}
                {text_field("Surname", "surname", "text", |input| input.surname.clone(), |input, value| {
                    input.surname = value;
                })}
                {text_field("Email", "email", "email", |input| input.email.clone(), |input, value| {
                    input.email = value;
                })}
                {text_field("Phone number", "phone-number", "tel", |input| input.phone_number.clone(), |input, value| {
                    input.phone_number = value;
                })}
                {text_field("VAT id", "vat-id", "text", |input| input.vat_id.clone(), |input, value| {
                    input.vat_id = value;
                })}
                {text_field("Bank account", "bank-account", "text", |input| input.bank_account.clone(), |input, value| {
                    input.bank_account = value;
                })}
                <ErrorText error=page_error.into()/>
                <button class="btn btn-primary" type="submit" on:click=submit>"Save"</button>
            </form>
            <AlertModal message=saved on_close=move || set_saved.update(|message| *message = None)/>
        </main>
    }
}

#[cfg(test)]
mod test {
    use super::{build_request, AccountInput};

    fn valid_input() -> AccountInput {
        AccountInput {
            name: "Alice".to_owned(),
            surname: "Moreau".to_owned(),
            email: "alice@example.com".to_owned(),
            phone_number: String::new(),
            vat_id: "FR123456".to_owned(),
            bank_account: String::new(),
        }
    }

    #[test]
    fn build_request_should_blank_optional_fields_to_absent() {
        let request = build_request(&valid_input()).unwrap();
        assert_eq!(request.name.as_deref(), Some("Alice"));
        assert_eq!(request.phone_number, None);
        assert_eq!(request.vat_id.as_deref(), Some("FR123456"));
    }

    #[test]
    fn build_request_should_reject_blank_surname() {
        let mut input = valid_input();
        input.surname = "  ".to_owned();
        assert!(build_request(&input).is_err());
    }

    #[test]
    fn build_request_should_reject_malformed_email() {
        let mut input = valid_input();
        input.email = "nope".to_owned();
        assert!(build_request(&input).is_err());
    }
}
