use std::future::Future;

use gloo_storage::{LocalStorage, Storage};
use leptos::*;

use encore_common::user::User;

use crate::{
    api::AuthorizedApi,
    config,
    error::{Error, Result},
};

const TOKEN_STORAGE_KEY: &str = "encore_token";

/// Durable home of the bearer token: browser local storage in the app,
/// an in-memory cell in tests.
pub trait TokenStore {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// Token persistence backed by the browser's local storage. The token is
/// the only durable client state the app keeps.
#[derive(Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn token(&self) -> Option<String> {
        LocalStorage::get(TOKEN_STORAGE_KEY).ok()
    }

    fn store(&self, token: &str) {
        if let Err(error) = LocalStorage::set(TOKEN_STORAGE_KEY, token) {
            log::error!("Could not persist the session token. {error}");
        }
    }

    fn clear(&self) {
        LocalStorage::delete(TOKEN_STORAGE_KEY);
    }
}

/// Reactive record of who is currently signed in. Provided once at the
/// root of the component tree; everything below reads it from context.
#[derive(Clone, Copy)]
pub struct Session {
    user: RwSignal<Option<User>>,
    loading: RwSignal<bool>,
}

impl Session {
    pub fn new(cx: Scope) -> Self {
        Self {
            user: create_rw_signal(cx, None),
            loading: create_rw_signal(cx, true),
        }
    }

    /// Currently signed-in user, if any. Reactive read.
    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    /// True only between startup and the first settlement of the token
    /// exchange; never true again afterwards. A later `None` user means
    /// signed out, not still loading.
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Replace the current user. Does not touch the loading flag.
    pub fn set_user(&self, user: Option<User>) {
        self.user.set(user);
    }

    /// Record an initialization outcome. The loading flag settles exactly
    /// once; later calls only replace the user.
    fn settle(&self, user: Option<User>) {
        self.user.set(user);
        if self.loading.get_untracked() {
            self.loading.set(false);
        }
    }

    /// Startup: exchange a persisted token for the current user. Settles
    /// immediately when no token is stored.
    pub fn initialize(&self, store: impl TokenStore + 'static) {
        let session = *self;
        let Some(token) = store.token() else {
            session.settle(None);
            return;
        };
        spawn_local(async move {
            let api = AuthorizedApi::new(config::api_url(), token);
            let outcome = resolve_current_user(&store, api.current_user()).await;
            session.settle(outcome);
        });
    }
}

/// Drive the "who am I" exchange and apply the token-retention policy: a
/// definitive rejection discards the stored token so a stale credential
/// cannot loop across reloads, while a transient failure keeps it for the
/// next attempt.
pub(crate) async fn resolve_current_user<F>(store: &impl TokenStore, who_am_i: F) -> Option<User>
where
    F: Future<Output = Result<User>>,
{
    match who_am_i.await {
        Ok(user) => Some(user),
        Err(Error::Unauthorized) => {
            store.clear();
            None
        }
        Err(error) => {
            log::error!("Could not restore the session. {error}");
            None
        }
    }
}

/// Apply a credential exchange to durable and session state. The token
/// is persisted as soon as the exchange succeeds; the user is cached once
/// the "who am I" call behind the fresh token resolves. A failed exchange
/// leaves no trace.
pub(crate) async fn complete_login<E, W, WFut>(
    session: Session,
    store: &impl TokenStore,
    exchange: E,
    who_am_i: W,
) -> Result<User>
where
    E: Future<Output = Result<AuthorizedApi>>,
    W: FnOnce(AuthorizedApi) -> WFut,
    WFut: Future<Output = Result<User>>,
{
    let api = exchange.await?;
    store.store(api.token());
    let user = who_am_i(api).await?;
    session.set_user(Some(user.clone()));
    Ok(user)
}

/// Drop the persisted token and the in-memory user. Safe to call when
/// already signed out.
pub fn sign_out(session: Session, store: &impl TokenStore) {
    store.clear();
    session.set_user(None);
}

/// Authorized API bound to the persisted token, if one exists.
pub fn authorized_api(store: &impl TokenStore) -> Option<AuthorizedApi> {
    store
        .token()
        .map(|token| AuthorizedApi::new(config::api_url(), token))
}

/// Authorized API for authenticated fetches, or the error that routes the
/// caller back to login.
pub fn require_api() -> Result<AuthorizedApi> {
    authorized_api(&BrowserTokenStore).ok_or(Error::Unauthorized)
}

pub fn provide_session(cx: Scope) -> Session {
    let session = Session::new(cx);
    provide_context(cx, session);
    session
}

/// Session context accessor for components below the root.
pub fn use_session(cx: Scope) -> Session {
    use_context::<Session>(cx).expect("session context provided at the app root")
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use leptos::{create_runtime, run_scope};

    use super::{complete_login, resolve_current_user, sign_out, Session, TokenStore};
    use crate::{api::AuthorizedApi, error::Error};
    use encore_common::user::{EntityKind, User};

    #[derive(Default)]
    struct MemoryTokenStore {
        token: RefCell<Option<String>>,
    }

    impl MemoryTokenStore {
        fn with_token(token: &str) -> Self {
            Self {
                token: RefCell::new(Some(token.to_owned())),
            }
        }
    }

    impl TokenStore for MemoryTokenStore {
        fn token(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn store(&self, token: &str) {
            *self.token.borrow_mut() = Some(token.to_owned());
        }

        fn clear(&self) {
            *self.token.borrow_mut() = None;
        }
    }

    fn test_user() -> User {
        User {
            id: 7,
            username: "alice".to_owned(),
            name: "Alice".to_owned(),
            surname: "Moreau".to_owned(),
            email: "alice@example.com".to_owned(),
            phone_number: None,
            type_of_entity: EntityKind::Individual,
            vat_id: None,
            bank_account: None,
            is_active: true,
        }
    }

    #[test]
    fn resolve_should_return_user_and_keep_token_when_accepted() {
        let store = MemoryTokenStore::with_token("valid-token");
        let user = test_user();
        let expected = user.clone();

        let outcome = block_on(resolve_current_user(&store, async move { Ok(user) }));

        assert_eq!(outcome, Some(expected));
        assert_eq!(store.token().as_deref(), Some("valid-token"));
    }

    #[test]
    fn resolve_should_discard_token_when_rejected() {
        let store = MemoryTokenStore::with_token("stale-token");

        let outcome = block_on(resolve_current_user(&store, async {
            Err(Error::Unauthorized)
        }));

        assert_eq!(outcome, None);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn resolve_should_keep_token_when_failure_is_transient() {
        let store = MemoryTokenStore::with_token("valid-token");

        let outcome = block_on(resolve_current_user(&store, async {
            Err(Error::Api {
                status: 500,
                message: "server fell over".to_owned(),
            })
        }));

        assert_eq!(outcome, None);
        assert_eq!(store.token().as_deref(), Some("valid-token"));
    }

    #[test]
    fn loading_should_settle_exactly_once() {
        run_scope(create_runtime(), |cx| {
            let session = Session::new(cx);
            assert!(session.is_loading());

            session.settle(Some(test_user()));
            assert!(!session.is_loading());

            session.set_user(None);
            assert!(!session.is_loading());

            session.settle(Some(test_user()));
            assert!(!session.is_loading());
        });
    }

    #[test]
    fn failed_login_should_store_no_token_and_no_user() {
        run_scope(create_runtime(), |cx| {
            let session = Session::new(cx);
            session.settle(None);
            let store = MemoryTokenStore::default();

            // "alice" submits the wrong password; the exchange rejects.
            let result = block_on(complete_login(
                session,
                &store,
                async {
                    Err(Error::Api {
                        status: 400,
                        message: "Invalid credentials".to_owned(),
                    })
                },
                |api| async move { api.current_user().await },
            ));

            assert!(result.is_err());
            assert_eq!(store.token(), None);
            assert_eq!(session.user(), None);
        });
    }

    #[test]
    fn successful_login_should_persist_token_and_cache_user() {
        run_scope(create_runtime(), |cx| {
            let session = Session::new(cx);
            session.settle(None);
            let store = MemoryTokenStore::default();
            let user = test_user();
            let expected = user.clone();

            let result = block_on(complete_login(
                session,
                &store,
                async { Ok(AuthorizedApi::new("http://backend.test", "fresh-token".to_owned())) },
                |_api| async move { Ok(user) },
            ));

            assert_eq!(result.ok(), Some(expected.clone()));
            assert_eq!(store.token().as_deref(), Some("fresh-token"));
            assert_eq!(session.user(), Some(expected));
        });
    }

    #[test]
    fn sign_out_should_be_idempotent() {
        run_scope(create_runtime(), |cx| {
            let session = Session::new(cx);
            let store = MemoryTokenStore::with_token("valid-token");
            session.settle(Some(test_user()));

            sign_out(session, &store);
            assert_eq!(store.token(), None);
            assert_eq!(session.user(), None);

            sign_out(session, &store);
            assert_eq!(store.token(), None);
            assert_eq!(session.user(), None);
        });
    }
}
