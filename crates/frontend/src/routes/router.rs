//! URL routing on top of the History API.
//!
//! Pages are addressed as `/{resource}`, `/{resource}/create` and
//! `/{resource}/{id}`; the current path and query live in [`AppRouter`]
//! signals, updated by `navigate`/`replace` and by browser back/forward.

use contracts::domain::common::EntityId;
use leptos::prelude::*;
use std::collections::BTreeMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    List { resource: String },
    Create { resource: String },
    Detail { resource: String, id: EntityId },
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            [resource] => Route::List {
                resource: resource.to_string(),
            },
            [resource, "create"] => Route::Create {
                resource: resource.to_string(),
            },
            [resource, id] => match id.parse::<EntityId>() {
                Ok(id) if id > 0 => Route::Detail {
                    resource: resource.to_string(),
                    id,
                },
                _ => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn resource(&self) -> Option<&str> {
        match self {
            Route::List { resource } | Route::Create { resource } | Route::Detail { resource, .. } => {
                Some(resource)
            }
            Route::Home | Route::NotFound => None,
        }
    }
}

/// Decode `?a=1&b=x` into a map; unparsable queries read as empty
pub fn parse_query(search: &str) -> BTreeMap<String, String> {
    let raw = search.trim_start_matches('?');
    if raw.is_empty() {
        return BTreeMap::new();
    }
    serde_qs::from_str(raw).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed query string {}: {}", raw, e);
        BTreeMap::new()
    })
}

/// Query string without `keys`, `""` when nothing remains
pub fn strip_query_params(search: &str, keys: &[&str]) -> String {
    let remaining: Vec<&str> = search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let name = pair.split('=').next().unwrap_or_default();
            !keys.contains(&name)
        })
        .collect();

    if remaining.is_empty() {
        String::new()
    } else {
        format!("?{}", remaining.join("&"))
    }
}

/// Current location, provided via context
#[derive(Clone, Copy)]
pub struct AppRouter {
    path: RwSignal<String>,
    search: RwSignal<String>,
    /// Bumped by `navigate` and back/forward, not by `replace`
    visits: RwSignal<u64>,
}

impl AppRouter {
    pub fn from_location() -> Self {
        let (path, search) = current_location();
        Self::at(path, search)
    }

    fn at(path: String, search: String) -> Self {
        Self {
            path: RwSignal::new(path),
            search: RwSignal::new(search),
            visits: RwSignal::new(0),
        }
    }

    /// Follow browser back/forward. Called once at startup.
    pub fn listen(&self) {
        let this = *self;
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let (path, search) = current_location();
            this.path.set(path);
            this.search.set(search);
            this.visits.update(|n| *n += 1);
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
            // the router lives as long as the app
            closure.forget();
        }
    }

    pub fn route(&self) -> Route {
        self.path.with(|p| Route::parse(p))
    }

    pub fn path(&self) -> String {
        self.path.get()
    }

    pub fn path_untracked(&self) -> String {
        self.path.get_untracked()
    }

    /// Subscribe to navigations, including those that only change the query string
    pub fn track_visits(&self) {
        self.visits.track();
    }

    pub fn search_untracked(&self) -> String {
        self.search.get_untracked()
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.search.with(|s| parse_query(s).remove(key))
    }

    pub fn query_untracked(&self, key: &str) -> Option<String> {
        self.search.with_untracked(|s| parse_query(s).remove(key))
    }

    pub fn navigate(&self, url: &str) {
        self.go(url, false);
    }

    /// Change the URL without a new history entry
    pub fn replace(&self, url: &str) {
        self.go(url, true);
    }

    fn go(&self, url: &str, replace: bool) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let result = if replace {
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
            } else {
                history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
            };
            if result.is_err() {
                log::error!("Failed to navigate to {}", url);
                return;
            }
        }
        self.apply(url, replace);
    }

    fn apply(&self, url: &str, replace: bool) {
        let (path, search) = match url.split_once('?') {
            Some((p, q)) => (p.to_string(), format!("?{}", q)),
            None => (url.to_string(), String::new()),
        };
        if self.path.get_untracked() != path {
            self.path.set(path);
        }
        if self.search.get_untracked() != search {
            self.search.set(search);
        }
        if !replace {
            self.visits.update(|n| *n += 1);
        }
    }
}

fn current_location() -> (String, String) {
    let location = web_sys::window().map(|w| w.location());
    let path = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let search = location.and_then(|l| l.search().ok()).unwrap_or_default();
    (path, search)
}

pub fn use_router() -> AppRouter {
    use_context::<AppRouter>().expect("AppRouter not found in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/products"), Route::List { resource: "products".into() });
        assert_eq!(Route::parse("/products/"), Route::List { resource: "products".into() });
        assert_eq!(Route::parse("/products/create"), Route::Create { resource: "products".into() });
        assert_eq!(Route::parse("/invoices/5?edit=true"), Route::Detail { resource: "invoices".into(), id: 5 });
        assert_eq!(Route::parse("/invoices/abc"), Route::NotFound);
        assert_eq!(Route::parse("/invoices/0"), Route::NotFound);
        assert_eq!(Route::parse("/a/b/c"), Route::NotFound);
    }

    #[test]
    fn test_replace_is_not_a_visit() {
        Owner::new().with(|| {
            let router = AppRouter::at("/products".to_string(), String::new());

            router.apply("/products?page=2", true);
            assert_eq!(router.search_untracked(), "?page=2");
            assert_eq!(router.visits.get_untracked(), 0);

            router.apply("/products?search=boots", false);
            assert_eq!(router.path_untracked(), "/products");
            assert_eq!(router.query_untracked("search").as_deref(), Some("boots"));
            assert_eq!(router.visits.get_untracked(), 1);
        });
    }

    #[test]
    fn test_parse_query() {
        let q = parse_query("?page=2&search=red%20shoes&edit=true");
        assert_eq!(q.get("page").map(String::as_str), Some("2"));
        assert_eq!(q.get("search").map(String::as_str), Some("red shoes"));
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_strip_query_params() {
        assert_eq!(strip_query_params("?edit=true", &["edit", "delete"]), "");
        assert_eq!(strip_query_params("?tab=lines&edit=true&x=1", &["edit", "delete"]), "?tab=lines&x=1");
        assert_eq!(strip_query_params("", &["edit"]), "");
    }
}
