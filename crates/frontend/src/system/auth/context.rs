use contracts::system::auth::{AuthError, AuthUser, LoginRequest, Session};
use leptos::prelude::*;

use super::{api, storage};
use crate::shared::http::SESSION_EXPIRED_EVENT;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

impl AuthState {
    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_admin(&self) -> bool {
        self.user().map(|u| u.is_admin).unwrap_or(false)
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    // Сессия читается из localStorage один раз при старте
    let (auth_state, set_auth_state) = signal(AuthState {
        session: storage::load_session(),
    });

    // HTTP-слой сообщает об отклонённой сессии событием на window
    let handle = window_event_listener_untyped(SESSION_EXPIRED_EVENT, move |_| {
        log::info!("Session expired, returning to login");
        set_auth_state.set(AuthState::default());
    });
    on_cleanup(move || handle.remove());

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Вход: сессия сохраняется только для администратора
pub async fn do_login(
    email: &str,
    password: &str,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), AuthError> {
    let request = LoginRequest::new(email, password)?;
    let response = api::login(&request).await?;
    let session = Session::from_login(response)?;

    storage::save_session(&session);
    log::info!("Signed in as {}", session.user.display_name());
    set_auth_state.set(AuthState {
        session: Some(session),
    });
    Ok(())
}

/// Выход: локальная сессия сбрасывается даже при ошибке сервера
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::logout().await {
        log::warn!("Logout request failed: {}", e);
    }
    storage::clear_session();
    set_auth_state.set(AuthState::default());
}
