use crate::shared::storage::{read_json, write_json, BrowserStorage, KeyValueStore};
use contracts::system::auth::AdminUser;

const TOKEN_KEY: &str = "cpanel_admin_token";
const USER_KEY: &str = "cpanel_admin_user";

/// Persist the session of a signed-in admin
pub fn save_session(store: &impl KeyValueStore, token: &str, user: &AdminUser) {
    store.set(TOKEN_KEY, token);
    write_json(store, USER_KEY, user);
}

pub fn load_token(store: &impl KeyValueStore) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn load_user(store: &impl KeyValueStore) -> Option<AdminUser> {
    read_json(store, USER_KEY)
}

/// Remove token and user
pub fn clear_session(store: &impl KeyValueStore) {
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
}

/// Bearer token of the current session (local storage)
pub fn get_token() -> Option<String> {
    load_token(&BrowserStorage::Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    fn admin() -> AdminUser {
        AdminUser {
            id: 3,
            name: "Marta".into(),
            email: "marta@example.com".into(),
            role: "admin".into(),
            permissions: vec!["orders.view".into()],
        }
    }

    #[test]
    fn test_session_roundtrip() {
        let store = MemoryStorage::new();
        save_session(&store, "tok-123", &admin());

        assert_eq!(load_token(&store).as_deref(), Some("tok-123"));
        assert_eq!(load_user(&store), Some(admin()));
        assert!(store.contains("cpanel_admin_token"));
        assert!(store.contains("cpanel_admin_user"));
    }

    #[test]
    fn test_clear_session() {
        let store = MemoryStorage::new();
        save_session(&store, "tok-123", &admin());
        clear_session(&store);

        assert!(load_token(&store).is_none());
        assert!(load_user(&store).is_none());
    }

    #[test]
    fn test_empty_token_is_no_session() {
        let store = MemoryStorage::new();
        store.set("cpanel_admin_token", "");
        assert!(load_token(&store).is_none());
    }
}
