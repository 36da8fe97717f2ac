//! Filter and pagination transitions.
//!
//! Changing either always yields exactly one fetch for the new coordinates and
//! a timer restart, as a single state transition.

use super::{Effect, ListState};
use crate::model::Entity;

impl<E: Entity> ListState<E> {
    pub(super) fn set_filter(&mut self, filter: E::Filter) -> Vec<Effect<E::Filter>> {
        if filter == self.filter {
            return Vec::new();
        }
        self.filter = filter;
        self.pagination.current = 0;
        self.coordinates_changed()
    }

    pub(super) fn set_page(&mut self, index: u32, size: u32) -> Vec<Effect<E::Filter>> {
        if size == 0 {
            tracing::warn!("ignoring page size of 0");
            return Vec::new();
        }
        if index == self.pagination.current && size == self.pagination.page_size {
            return Vec::new();
        }
        self.pagination.current = index;
        self.pagination.page_size = size;
        self.coordinates_changed()
    }

    fn coordinates_changed(&mut self) -> Vec<Effect<E::Filter>> {
        if !self.mounted {
            return Vec::new();
        }
        vec![self.issue_fetch(), self.restart_polling()]
    }
}
