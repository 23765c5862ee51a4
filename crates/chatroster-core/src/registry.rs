use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::controller::{DestroyedController, EntityController};
use crate::error::RosterError;
use crate::handle::ForeignHandle;
use crate::snapshot::{BackendObject, OwnedSnapshot};

/// Handle -> controller map. The single source of truth for which entities
/// exist locally; all mutation goes through `upsert`, `remove`/`destroy`
/// and `clear_all`.
pub struct ControllerRegistry<C: EntityController> {
    controllers: HashMap<ForeignHandle, C>,
}

impl<C: EntityController> Default for ControllerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: EntityController> ControllerRegistry<C> {
    pub fn new() -> Self {
        Self {
            controllers: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn contains(&self, handle: ForeignHandle) -> bool {
        self.controllers.contains_key(&handle)
    }

    // ===== Mutations =====

    /// Create the controller for `handle` or replace its snapshot.
    ///
    /// # Panics
    /// If the snapshot belongs to another handle. Callers validate backend
    /// input before it reaches the registry, so a mismatch here is a bug.
    pub fn upsert(&mut self, handle: ForeignHandle, snapshot: OwnedSnapshot<C::Item>) -> &mut C {
        assert_eq!(
            snapshot.handle(),
            handle,
            "snapshot handle must match its registry key"
        );

        match self.controllers.entry(handle) {
            Entry::Occupied(entry) => {
                let controller = entry.into_mut();
                controller.replace_snapshot(snapshot);
                controller
            }
            Entry::Vacant(entry) => entry.insert(C::new(snapshot)),
        }
    }

    /// Destroy the controller for `handle`, if any. Returns whether it existed.
    pub fn remove(&mut self, handle: ForeignHandle) -> bool {
        self.destroy(handle).is_some()
    }

    /// Like [`remove`](Self::remove), but hands back the renderer references
    /// the controller held.
    pub fn destroy(&mut self, handle: ForeignHandle) -> Option<DestroyedController> {
        self.controllers.remove(&handle).map(C::destroy)
    }

    /// Destroy every controller, in ascending handle order.
    pub fn clear_all(&mut self) -> Vec<DestroyedController> {
        let mut drained: Vec<(ForeignHandle, C)> = self.controllers.drain().collect();
        drained.sort_by_key(|(handle, _)| *handle);
        drained
            .into_iter()
            .map(|(_, controller)| controller.destroy())
            .collect()
    }

    // ===== Getters =====

    pub fn get(&self, handle: ForeignHandle) -> Option<&C> {
        self.controllers.get(&handle)
    }

    pub fn get_mut(&mut self, handle: ForeignHandle) -> Option<&mut C> {
        self.controllers.get_mut(&handle)
    }

    /// Unordered iteration.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.controllers.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.controllers.values_mut()
    }

    pub fn sorted_handles(&self) -> Vec<ForeignHandle> {
        let mut handles: Vec<ForeignHandle> = self.controllers.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Check that every controller sits under its own handle and holds a
    /// snapshot for that handle.
    pub fn verify(&self) -> Result<(), RosterError> {
        for (key, controller) in &self.controllers {
            if controller.handle() != *key {
                return Err(RosterError::HandleMismatch {
                    key: *key,
                    snapshot: controller.handle(),
                });
            }
            let snapshot = controller.item().handle();
            if snapshot != *key {
                return Err(RosterError::HandleMismatch { key: *key, snapshot });
            }
        }
        Ok(())
    }
}
