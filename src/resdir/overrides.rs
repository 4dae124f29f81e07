use crate::model::EntityId;
use std::collections::HashSet;

/// User-controlled pin and hide sets, session-scoped.
///
/// The pin set is ordered (first pinned, first kept) and duplicate-free.
/// Hiding is one-way for the session: there is no unhide. Whether hiding
/// should also unpin is an open product question; current behavior is that
/// it does not, so an id that is both pinned and hidden still surfaces
/// through the pinned segment.
#[derive(Debug, Clone, Default)]
pub struct OverrideSets {
    pinned: Vec<EntityId>,
    hidden: HashSet<EntityId>,
}

impl OverrideSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to the pin set. A no-op if already pinned.
    pub fn pin(&mut self, id: impl Into<EntityId>) {
        let id = id.into();
        if !self.pinned.contains(&id) {
            self.pinned.push(id);
        }
    }

    /// Removes from the pin set. A no-op if not pinned.
    pub fn unpin(&mut self, id: &str) {
        self.pinned.retain(|p| p != id);
    }

    /// Toggles pin membership; returns true if the id is pinned afterwards.
    pub fn toggle_pin(&mut self, id: impl Into<EntityId>) -> bool {
        let id = id.into();
        if self.pinned.contains(&id) {
            self.unpin(&id);
            false
        } else {
            self.pinned.push(id);
            true
        }
    }

    /// Dismisses an id from the filtered view for the rest of the session.
    pub fn hide(&mut self, id: impl Into<EntityId>) {
        self.hidden.insert(id.into());
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.iter().any(|p| p == id)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn pinned_ids(&self) -> &[EntityId] {
        &self.pinned
    }

    pub fn has_pins(&self) -> bool {
        !self.pinned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_is_idempotent_and_ordered() {
        let mut o = OverrideSets::new();
        o.pin("org-1");
        o.pin("org-2");
        o.pin("org-1");
        assert_eq!(o.pinned_ids(), ["org-1".to_string(), "org-2".to_string()]);
    }

    #[test]
    fn toggle_pin_flips_membership() {
        let mut o = OverrideSets::new();
        assert!(o.toggle_pin("org-1"));
        assert!(o.is_pinned("org-1"));
        assert!(!o.toggle_pin("org-1"));
        assert!(!o.is_pinned("org-1"));
    }

    #[test]
    fn hide_is_one_way_and_idempotent() {
        let mut o = OverrideSets::new();
        o.hide("org-9");
        o.hide("org-9");
        assert!(o.is_hidden("org-9"));
    }

    #[test]
    fn hiding_does_not_unpin() {
        let mut o = OverrideSets::new();
        o.pin("org-1");
        o.hide("org-1");
        assert!(o.is_pinned("org-1"));
        assert!(o.is_hidden("org-1"));
    }
}
