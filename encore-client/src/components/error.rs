use leptos::*;

/// Inline field- or page-level error text.
#[component]
pub fn ErrorText(cx: Scope, error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { cx, <p class="text-danger">{message}</p> })
    }
}
