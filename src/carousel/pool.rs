use crate::{
    foundation::error::{SlideError, SlideResult},
    scene::object::{Disposable, SlideObject},
};

/// Which carousel slot an entry currently belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// Parked off screen, free to mutate.
    Staging,
    /// Displayed.
    Viewing,
    /// Sliding from staging to viewing.
    Entering,
    /// Sliding from viewing to exit.
    Exiting,
}

impl SlotState {
    /// Visible or mid-transition: resources must not change under it.
    pub fn is_on_screen(self) -> bool {
        !matches!(self, Self::Staging)
    }
}

/// A resource replacement requested through the carousel.
#[derive(Clone, Debug, PartialEq)]
pub enum Change<G, M> {
    /// Swap the geometry.
    Geometry(G),
    /// Swap the material.
    Material(M),
}

/// What happened to a requested [`Change`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Attached right away; the previous resource was disposed.
    Applied,
    /// Held until the object leaves the screen.
    Deferred,
}

/// Changes waiting for an entry to leave the screen. A later change of the
/// same kind supersedes an earlier one.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingChanges<G, M> {
    /// Buffered geometry, if any.
    pub geometry: Option<G>,
    /// Buffered material, if any.
    pub material: Option<M>,
}

impl<G, M> Default for PendingChanges<G, M> {
    fn default() -> Self {
        Self {
            geometry: None,
            material: None,
        }
    }
}

impl<G, M> PendingChanges<G, M> {
    /// Nothing buffered.
    pub fn is_empty(&self) -> bool {
        self.geometry.is_none() && self.material.is_none()
    }
}

/// One object in the pool together with its slot and buffered changes.
#[derive(Debug)]
pub struct PoolEntry<O: SlideObject> {
    /// The owned clone.
    pub object: O,
    /// Current slot.
    pub state: SlotState,
    /// Changes held back while on screen.
    pub pending: PendingChanges<O::Geometry, O::Material>,
}

impl<O: SlideObject> PoolEntry<O> {
    fn apply(&mut self, change: Change<O::Geometry, O::Material>) {
        match change {
            Change::Geometry(g) => self.object.replace_geometry(g).dispose(),
            Change::Material(m) => self.object.replace_material(m).dispose(),
        }
    }

    fn buffer(&mut self, change: Change<O::Geometry, O::Material>) {
        match change {
            Change::Geometry(g) => {
                if let Some(stale) = self.pending.geometry.replace(g) {
                    stale.dispose();
                }
            }
            Change::Material(m) => {
                if let Some(stale) = self.pending.material.replace(m) {
                    stale.dispose();
                }
            }
        }
    }

    /// Apply buffered changes. Returns how many were applied.
    fn flush(&mut self) -> usize {
        let mut applied = 0;
        if let Some(g) = self.pending.geometry.take() {
            self.apply(Change::Geometry(g));
            applied += 1;
        }
        if let Some(m) = self.pending.material.take() {
            self.apply(Change::Material(m));
            applied += 1;
        }
        applied
    }
}

/// Ordered, append-only pool of carousel objects.
#[derive(Debug)]
pub struct MeshPool<O: SlideObject> {
    entries: Vec<PoolEntry<O>>,
}

impl<O: SlideObject> Default for MeshPool<O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<O: SlideObject> MeshPool<O> {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `object` in `state`, returning its index.
    pub fn push(&mut self, object: O, state: SlotState) -> usize {
        self.entries.push(PoolEntry {
            object,
            state,
            pending: PendingChanges::default(),
        });
        self.entries.len() - 1
    }

    /// Bounds-checked entry access.
    pub fn get(&self, index: usize) -> SlideResult<&PoolEntry<O>> {
        let len = self.entries.len();
        self.entries
            .get(index)
            .ok_or_else(|| SlideError::out_of_range(index, len))
    }

    /// Bounds-checked mutable entry access.
    pub fn get_mut(&mut self, index: usize) -> SlideResult<&mut PoolEntry<O>> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or_else(|| SlideError::out_of_range(index, len))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PoolEntry<O>> {
        self.entries.iter()
    }

    /// Move an entry to another slot.
    pub fn set_state(&mut self, index: usize, state: SlotState) -> SlideResult<()> {
        self.get_mut(index)?.state = state;
        Ok(())
    }

    /// Apply `change` now if the entry is off screen, otherwise buffer it.
    pub fn apply_or_defer(
        &mut self,
        index: usize,
        change: Change<O::Geometry, O::Material>,
    ) -> SlideResult<ChangeOutcome> {
        let entry = self.get_mut(index)?;
        if entry.state.is_on_screen() {
            entry.buffer(change);
            Ok(ChangeOutcome::Deferred)
        } else {
            entry.apply(change);
            Ok(ChangeOutcome::Applied)
        }
    }

    /// Apply buffered changes on every off-screen entry. On-screen entries
    /// keep theirs for a later flush. Returns how many changes were applied.
    pub fn flush_pending(&mut self) -> usize {
        self.entries
            .iter_mut()
            .filter(|e| !e.state.is_on_screen() && !e.pending.is_empty())
            .map(PoolEntry::flush)
            .sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/pool.rs"]
mod tests;
