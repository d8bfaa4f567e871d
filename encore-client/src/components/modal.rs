use leptos::*;

/// Blocking outcome dialog for create/update calls. Renders whenever the
/// message signal holds text; the close button hands control back to the
/// caller, which decides what happens next (clear the message, navigate).
#[component]
pub fn AlertModal<F>(cx: Scope, message: ReadSignal<Option<String>>, on_close: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    move || {
        message.get().map(|body| {
            view! { cx,
                <div class="modal-backdrop fade show" style="display: block;"></div>
                <div class="modal fade show" tabindex="-1" style="display: block;">
                    <div class="modal-dialog modal-dialog-centered">
                        <div class="modal-content">
                            <div class="modal-header">
                                <h5 class="modal-title">"Encore"</h5>
                            </div>
                            <div class="modal-body">
                                <p>{body}</p>
                            </div>
                            <div class="modal-footer">
                                <button
                                    type="button"
                                    class="btn btn-secondary"
                                    on:click=move |_| on_close()
                                >"Close"</button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
