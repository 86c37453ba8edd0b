//! State machines of the edit drawer and the delete confirmation.

use crate::routes::router::{parse_query, strip_query_params};

/// Edit drawer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open {
        error: Option<String>,
    },
    Submitting,
}

impl DrawerState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DrawerState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DrawerState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DrawerState::Open { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Closed → Open; no effect otherwise
    pub fn open(&mut self) {
        if *self == DrawerState::Closed {
            *self = DrawerState::Open { error: None };
        }
    }

    /// Open → Submitting; false if there is nothing to submit
    pub fn submit(&mut self) -> bool {
        match self {
            DrawerState::Open { .. } => {
                *self = DrawerState::Submitting;
                true
            }
            _ => false,
        }
    }

    pub fn succeed(&mut self) {
        if self.is_submitting() {
            *self = DrawerState::Closed;
        }
    }

    /// Submitting → Open with the error, the drawer stays up
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.is_submitting() {
            *self = DrawerState::Open {
                error: Some(message.into()),
            };
        }
    }

    /// Open → Closed (cancel button, Escape). Ignored while submitting.
    pub fn cancel(&mut self) -> bool {
        match self {
            DrawerState::Open { .. } => {
                *self = DrawerState::Closed;
                true
            }
            _ => false,
        }
    }
}

/// Delete confirmation modal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteModalState {
    #[default]
    Closed,
    Open {
        error: Option<String>,
    },
    Confirming,
}

impl DeleteModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DeleteModalState::Closed)
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, DeleteModalState::Confirming)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DeleteModalState::Open { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn open(&mut self) {
        if *self == DeleteModalState::Closed {
            *self = DeleteModalState::Open { error: None };
        }
    }

    pub fn confirm(&mut self) -> bool {
        match self {
            DeleteModalState::Open { .. } => {
                *self = DeleteModalState::Confirming;
                true
            }
            _ => false,
        }
    }

    pub fn succeed(&mut self) {
        if self.is_confirming() {
            *self = DeleteModalState::Closed;
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        if self.is_confirming() {
            *self = DeleteModalState::Open {
                error: Some(message.into()),
            };
        }
    }

    pub fn cancel(&mut self) -> bool {
        match self {
            DeleteModalState::Open { .. } => {
                *self = DeleteModalState::Closed;
                true
            }
            _ => false,
        }
    }
}

/// URL parameters that open the drawer / modal on arrival
pub const ACTION_PARAMS: &[&str] = &["edit", "delete"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionFlags {
    pub edit: bool,
    pub delete: bool,
}

impl ActionFlags {
    pub fn any(&self) -> bool {
        self.edit || self.delete
    }
}

/// Read `edit=true` / `delete=true` from `search`. When either is present,
/// also returns `path` with those two parameters removed (other parameters
/// are kept) for a replace navigation.
pub fn take_action_flags(path: &str, search: &str) -> (ActionFlags, Option<String>) {
    let query = parse_query(search);
    let is_set = |key: &str| {
        query
            .get(key)
            .map(|v| matches!(v.trim(), "true" | "1"))
            .unwrap_or(false)
    };
    let flags = ActionFlags {
        edit: is_set("edit"),
        delete: is_set("delete"),
    };

    let present = ACTION_PARAMS.iter().any(|k| query.contains_key(*k));
    let replacement = present.then(|| format!("{}{}", path, strip_query_params(search, ACTION_PARAMS)));
    (flags, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::router::Route;

    #[test]
    fn test_edit_flag_opens_drawer_and_is_stripped() {
        let url = "/invoices/5?edit=true";
        let (path, search) = url.split_once('?').map(|(p, q)| (p, format!("?{}", q))).unwrap();

        let (flags, replacement) = take_action_flags(path, &search);
        let mut drawer = DrawerState::default();
        if flags.edit {
            drawer.open();
        }

        assert!(drawer.is_open());
        assert!(!flags.delete);
        let replacement = replacement.unwrap();
        assert_eq!(replacement, "/invoices/5");
        assert!(!replacement.contains("edit=true"));
        assert_eq!(Route::parse(&replacement), Route::Detail { resource: "invoices".into(), id: 5 });
    }

    #[test]
    fn test_other_params_are_kept() {
        let (flags, replacement) = take_action_flags("/orders/9", "?tab=lines&delete=1");
        assert!(flags.delete && !flags.edit);
        assert_eq!(replacement.as_deref(), Some("/orders/9?tab=lines"));
    }

    #[test]
    fn test_no_flags_no_replacement() {
        let (flags, replacement) = take_action_flags("/orders/9", "?tab=lines");
        assert!(!flags.any());
        assert_eq!(replacement, None);
    }

    #[test]
    fn test_drawer_transitions() {
        let mut drawer = DrawerState::Closed;
        assert!(!drawer.submit());

        drawer.open();
        assert!(drawer.submit());
        assert!(drawer.is_submitting());

        // Escape is ignored while submitting
        assert!(!drawer.cancel());
        assert!(drawer.is_submitting());

        drawer.fail("Name is required");
        assert_eq!(drawer, DrawerState::Open { error: Some("Name is required".into()) });
        assert_eq!(drawer.error(), Some("Name is required"));

        assert!(drawer.submit());
        drawer.succeed();
        assert_eq!(drawer, DrawerState::Closed);

        drawer.open();
        assert!(drawer.cancel());
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_delete_modal_transitions() {
        let mut modal = DeleteModalState::default();
        modal.open();
        assert!(modal.confirm());
        assert!(!modal.cancel());

        modal.fail("Order has invoices");
        assert!(modal.is_open());
        assert_eq!(modal.error(), Some("Order has invoices"));

        assert!(modal.cancel());
        assert_eq!(modal, DeleteModalState::Closed);

        modal.open();
        modal.confirm();
        modal.succeed();
        assert!(!modal.is_open());
    }
}
