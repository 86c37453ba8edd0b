use super::{api, storage};
use crate::shared::api::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::storage::BrowserStorage;
use contracts::system::auth::AdminUser;
use contracts::system::permissions::{can, has_permission, Action};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<AdminUser>,
}

impl AuthState {
    /// Session kept in local storage from a previous visit
    pub fn restore() -> Self {
        let store = BrowserStorage::Local;
        Self {
            token: storage::load_token(&store),
            user: storage::load_user(&store),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Session and permission checks, provided by [`AuthProvider`]
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    enforce: StoredValue<bool>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    pub fn user(&self) -> Option<AdminUser> {
        self.state.with(|s| s.user.clone())
    }

    /// Every permission in `required` is held (always true with enforcement off)
    pub fn has_permission(&self, required: &[&str]) -> bool {
        let enforce = self.enforce.get_value();
        self.state.with(|s| has_permission(s.user.as_ref(), required, enforce))
    }

    pub fn can(&self, resource: &str, action: Action) -> bool {
        let enforce = self.enforce.get_value();
        self.state.with(|s| can(s.user.as_ref(), resource, action, enforce))
    }

    /// Reactive `can`, for props
    pub fn can_signal(&self, resource: &'static str, action: Action) -> Signal<bool> {
        let this = *self;
        Signal::derive(move || this.can(resource, action))
    }

    /// Sign in; `on_done` receives the error message on failure
    pub fn login(&self, client: ApiClient, email: String, password: String, on_done: impl FnOnce(Result<(), String>) + 'static) {
        let state = self.state;
        spawn_local(async move {
            match api::login(&client, email, password).await {
                Ok(response) => {
                    storage::save_session(&BrowserStorage::Local, &response.token, &response.user);
                    log::info!("Signed in as {}", response.user.email);
                    state.try_set(AuthState {
                        token: Some(response.token),
                        user: Some(response.user),
                    });
                    on_done(Ok(()));
                }
                Err(e) => {
                    log::warn!("Sign-in failed: {}", e);
                    on_done(Err(e.message));
                }
            }
        });
    }

    pub fn logout(&self) {
        storage::clear_session(&BrowserStorage::Local);
        self.state.set(AuthState::default());
    }
}

/// Restores the stored session and provides [`AuthContext`]
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let enforce = use_context::<AppConfig>()
        .map(|c| c.enable_permissions)
        .unwrap_or(true);

    provide_context(AuthContext {
        state: RwSignal::new(AuthState::restore()),
        enforce: StoredValue::new(enforce),
    });

    children()
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
