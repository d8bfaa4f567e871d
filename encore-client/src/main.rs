use leptos::*;

use encore_client::App;

fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("console logger was already installed");
    }
    mount_to_body(|cx| view! { cx, <App/> });
}
