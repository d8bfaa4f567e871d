use leptos::*;

use encore_common::auth::Credentials;

/// Username/password form shared by the login page. Dispatches the given
/// action and surfaces its error below the fields.
#[component]
pub fn CredentialsForm(
    cx: Scope,
    title: &'static str,
    action_label: &'static str,
    action: Action<Credentials, ()>,
    error: Signal<Option<String>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let (username, set_username) = create_signal(cx, String::new());
    let (password, set_password) = create_signal(cx, String::new());

    let dispatch = move || {
        action.dispatch(Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        });
    };

    view! { cx,
        <h3>{title}</h3>
        <form on:submit=|ev| ev.prevent_default()>
            <div class="form-group mb-3">
                <label for="username">"Username"</label>
                <input
                    class="form-control"
                    type="text"
                    id="username"
                    name="username"
                    required
                    prop:disabled=move || disabled.get()
                    on:input=move |ev| set_username.update(|value| *value = event_target_value(&ev))
                />
            </div>
            <div class="form-group mb-3">
                <label for="password">"Password"</label>
                <input
                    class="form-control"
                    type="password"
                    id="password"
                    name="password"
                    required
                    prop:disabled=move || disabled.get()
                    on:input=move |ev| set_password.update(|value| *value = event_target_value(&ev))
                />
            </div>
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! { cx, <p class="text-danger">{err}</p> }
                    })
            }}
            <button
                class="btn btn-primary"
                type="submit"
                prop:disabled=move || disabled.get()
                on:click=move |_| dispatch()
            >{action_label}</button>
        </form>
    }
}
