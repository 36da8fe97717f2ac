//! Selection and detail panel binding.
//!
//! The selection is a snapshot, not just an ID, so the detail panel renders
//! without a second request. It is a weak reference: after each applied fetch
//! it is refreshed from the new page, or cleared if its ID is gone.

use super::{Effect, ListState};
use crate::error::Result;
use crate::model::Entity;

impl<E: Entity> ListState<E> {
    pub(super) fn select(&mut self, entity: E) -> Vec<Effect<E::Filter>> {
        let id = entity.id().to_string();
        let unread = !entity.is_read();
        self.selection = Some(entity);

        // Once per distinct selection
        if self.mark_read_for.as_deref() == Some(id.as_str()) {
            return Vec::new();
        }
        self.mark_read_for = Some(id.clone());

        if unread {
            vec![Effect::MarkRead(id)]
        } else {
            Vec::new()
        }
    }

    pub(super) fn clear_selection(&mut self) {
        self.selection = None;
        self.mark_read_for = None;
    }

    /// Keep the selection pointing at a row of the freshly applied page
    pub(super) fn reconcile_selection(&mut self) {
        let Some(selected) = &self.selection else {
            return;
        };
        match self.items.iter().find(|e| e.id() == selected.id()) {
            Some(fresh) => self.selection = Some(fresh.clone()),
            None => {
                tracing::debug!(id = selected.id(), "selected entity left the page; clearing");
                self.clear_selection();
            }
        }
    }

    /// Patch the read flag locally. The next fetch overwrites it either way.
    pub(super) fn mark_read_completed(
        &mut self,
        id: String,
        result: Result<()>,
    ) -> Vec<Effect<E::Filter>> {
        if let Err(e) = result {
            if let Some(effects) = self.check_unauthorized(&e) {
                return effects;
            }
            tracing::debug!(id = %id, error = %e, "mark-read failed; leaving flag unchanged");
            return Vec::new();
        }

        if let Some(row) = self.items.iter_mut().find(|e| e.id() == id) {
            row.mark_read();
        }
        if let Some(selected) = self.selection.as_mut()
            && selected.id() == id
        {
            selected.mark_read();
        }
        Vec::new()
    }
}
