use leptos::*;

/// Spinner shown while a page's hooks are still pending.
#[component]
pub fn Loading(cx: Scope) -> impl IntoView {
    view! { cx,
        <div class="d-flex justify-content-center my-5">
            <div class="spinner-border" role="status">
                <span class="visually-hidden">"Loading..."</span>
            </div>
        </div>
    }
}
