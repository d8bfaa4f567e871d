use std::{cell::Cell, future::Future, rc::Rc};

use leptos::*;
use leptos_router::use_navigate;

use crate::{error::Error, pages::Page};

/// Observable state of one keyed resource request. Exactly one variant
/// holds at any observation point; `Idle` covers a key that has not
/// arrived yet, so views can gate on several hooks at once.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    /// True while the request is in flight or the key has not arrived.
    /// Callers OR these together to gate rendering.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Idle | Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Message form of [Error] kept by the hook; cheap to clone into views.
/// The unauthorized flag is what routes a page back to login.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchError {
    pub message: String,
    pub unauthorized: bool,
}

impl From<Error> for FetchError {
    fn from(error: Error) -> Self {
        Self {
            message: error.to_string(),
            unauthorized: error.is_unauthorized(),
        }
    }
}

/// Monotonic ticket issuer that keeps late responses from clobbering
/// newer state. Only the most recently issued ticket is honored; a
/// retired guard honors none.
#[derive(Clone, Default)]
pub struct RequestGuard {
    latest: Rc<Cell<u64>>,
}

impl RequestGuard {
    /// Hand out a ticket for a request about to be issued, superseding
    /// every earlier ticket.
    pub fn issue(&self) -> u64 {
        let ticket = self.latest.get().wrapping_add(1);
        self.latest.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    /// Invalidate all outstanding tickets. Called on unmount.
    pub fn retire(&self) {
        self.latest.set(self.latest.get().wrapping_add(1));
    }
}

/// Bind a keyed fetch to the component lifecycle. The fetch re-runs on
/// every change of `key` (including first mount); an empty key parks the
/// state at [FetchState::Idle]. Responses for a superseded key, and
/// responses arriving after unmount, are dropped (see [RequestGuard]) so
/// a slow earlier request can never overwrite a newer one.
pub fn use_resource<K, T, F, Fut>(
    cx: Scope,
    key: Signal<Option<K>>,
    fetch: F,
) -> ReadSignal<FetchState<T>>
where
    K: Clone + PartialEq + 'static,
    T: Clone + 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, Error>> + 'static,
{
    let (state, set_state) = create_signal(cx, FetchState::Idle);
    let guard = RequestGuard::default();
    on_cleanup(cx, {
        let guard = guard.clone();
        move || guard.retire()
    });
    create_effect(cx, move |_| {
        let Some(key) = key.get() else {
            set_state.set(FetchState::Idle);
            return;
        };
        let ticket = guard.issue();
        set_state.set(FetchState::Loading);
        let request = fetch(key);
        let task_guard = guard.clone();
        spawn_local(async move {
            let result = request.await;
            if !task_guard.is_current(ticket) {
                return;
            }
            match result {
                Ok(data) => set_state.set(FetchState::Loaded(data)),
                Err(error) => set_state.set(FetchState::Failed(error.into())),
            }
        });
    });
    state
}

/// Route back to the login page the moment a hook reports a rejected
/// session. All other failures stay on the page and render inline.
pub fn redirect_to_login_on_expiry<T>(cx: Scope, state: ReadSignal<FetchState<T>>)
where
    T: 'static,
{
    create_effect(cx, move |_| {
        let expired = state.with(|state| state.error().is_some_and(|error| error.unauthorized));
        if expired {
            let navigate = use_navigate(cx);
            if let Err(error) = navigate(Page::Login.path(), Default::default()) {
                log::error!("{error}");
            }
        }
    });
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use super::{FetchError, FetchState, RequestGuard};

    fn failed(message: &str) -> FetchState<&'static str> {
        FetchState::Failed(FetchError {
            message: message.to_owned(),
            unauthorized: false,
        })
    }

    #[test]
    fn guard_should_honor_only_the_latest_ticket() {
        let guard = RequestGuard::default();
        let first = guard.issue();
        let second = guard.issue();

        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn guard_should_honor_nothing_after_retire() {
        let guard = RequestGuard::default();
        let ticket = guard.issue();
        guard.retire();

        assert!(!guard.is_current(ticket));
    }

    /// Two keyed requests resolve out of issue order; the state must end
    /// up reflecting the later key.
    #[test]
    fn late_response_should_not_overwrite_newer_result() {
        let guard = RequestGuard::default();
        let state = RefCell::new(FetchState::<&str>::Loading);

        let first = guard.issue();
        let second = guard.issue();

        if guard.is_current(second) {
            *state.borrow_mut() = FetchState::Loaded("second key");
        }
        if guard.is_current(first) {
            *state.borrow_mut() = FetchState::Loaded("first key");
        }

        assert_eq!(*state.borrow(), FetchState::Loaded("second key"));
    }

    #[test]
    fn fetch_state_should_expose_exactly_one_interpretation() {
        assert!(FetchState::<&str>::Idle.is_pending());
        assert!(FetchState::<&str>::Loading.is_pending());

        let loaded = FetchState::Loaded("data");
        assert!(!loaded.is_pending());
        assert_eq!(loaded.data(), Some(&"data"));
        assert!(loaded.error().is_none());

        let state = failed("boom");
        assert!(!state.is_pending());
        assert!(state.data().is_none());
        assert_eq!(state.error().map(|error| error.message.as_str()), Some("boom"));
    }
}
