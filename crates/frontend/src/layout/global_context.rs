use leptos::prelude::*;

/// Shell UI state shared by the header and the sidebar
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub left_open: RwSignal<bool>,
    pub expanded_groups: RwSignal<Vec<&'static str>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            left_open: RwSignal::new(true),
            expanded_groups: RwSignal::new(vec!["catalog", "sales"]),
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    pub fn toggle_group(&self, group: &'static str) {
        self.expanded_groups.update(|groups| {
            if let Some(pos) = groups.iter().position(|g| *g == group) {
                groups.remove(pos);
            } else {
                groups.push(group);
            }
        });
    }

    pub fn is_expanded(&self, group: &str) -> bool {
        self.expanded_groups.with(|groups| groups.contains(&group))
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_group() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppGlobalContext::new();
            assert!(ctx.is_expanded("catalog"));
            ctx.toggle_group("catalog");
            assert!(!ctx.is_expanded("catalog"));
            ctx.toggle_group("partners");
            assert!(ctx.is_expanded("partners"));
        });
    }
}
