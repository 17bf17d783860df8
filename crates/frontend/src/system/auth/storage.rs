use contracts::system::auth::{AuthUser, Session};
use web_sys::window;

const TOKEN_KEY: &str = "cancheados_token";
const USER_KEY: &str = "cancheados_user";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save session to localStorage
pub fn save_session(session: &Session) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(TOKEN_KEY, &session.token);
        match serde_json::to_string(&session.user) {
            Ok(json) => {
                let _ = storage.set_item(USER_KEY, &json);
            }
            Err(e) => log::error!("Failed to store user: {}", e),
        }
    }
}

/// Get access token from localStorage
pub fn get_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn bearer() -> Option<String> {
    get_token().map(|token| format!("Bearer {}", token))
}

fn get_user() -> Option<AuthUser> {
    let raw = get_local_storage()?.get_item(USER_KEY).ok()??;
    serde_json::from_str(&raw)
        .map_err(|e| log::warn!("Stored user is unreadable: {}", e))
        .ok()
}

/// Восстановить сессию при старте; невалидные данные удаляются
pub fn load_session() -> Option<Session> {
    let session = Session::restore(get_token(), get_user());
    if session.is_none() {
        clear_session();
    }
    session
}

/// Clear token and user
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
