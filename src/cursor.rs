//! Selection cursor over the catalog's flattened track list.
//!
//! Directories are never part of the range: the cursor only ever points at
//! a track, or at nothing when the catalog has no tracks.

use crate::catalog::{Catalog, Track};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCursor {
    position: Option<usize>,
    len: usize,
}

impl SelectionCursor {
    /// A cursor on the first of `len` tracks, or on nothing if `len == 0`.
    pub fn new(len: usize) -> Self {
        Self {
            position: (len > 0).then_some(0),
            len,
        }
    }

    /// Re-seat the cursor after the catalog has been rebuilt.
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Move to the next track, wrapping to the first after the last.
    pub fn move_next(&mut self) {
        if let Some(p) = self.position {
            self.position = Some((p + 1) % self.len);
        }
    }

    /// Move to the previous track, wrapping to the last from the first.
    pub fn move_previous(&mut self) {
        if let Some(p) = self.position {
            self.position = Some(if p == 0 { self.len - 1 } else { p - 1 });
        }
    }

    pub fn first(&mut self) {
        if self.len > 0 {
            self.position = Some(0);
        }
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.position = Some(self.len - 1);
        }
    }

    /// Select `index` directly. Out-of-range indices leave the cursor alone.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.position = Some(index);
            true
        } else {
            false
        }
    }

    /// Select the first track named `name`.
    #[cfg(test)]
    pub fn select_by_name(&mut self, catalog: &Catalog, name: &str) -> bool {
        match catalog.position_of_name(name) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    pub fn current<'a>(&self, catalog: &'a Catalog) -> Option<&'a Track> {
        self.position.and_then(|p| catalog.track(p))
    }
}
