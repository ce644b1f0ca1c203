//! Append-only entity pool
//!
//! Slots are addressed by index and never reused within a session. Retiring
//! an entity moves it out of its slot, leaving the slot empty; indices of
//! every other entity stay valid across growth.

use serde::{Deserialize, Serialize};

use super::entity::FallingEntity;
use crate::error::{SimError, SimResult};

fn out_of_bounds(index: usize, len: usize) -> SimError {
    log::warn!("Pool access out of bounds: index {} of {}", index, len);
    SimError::OutOfBounds { index, len }
}

/// Growable store of falling entities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPool {
    slots: Vec<Option<FallingEntity>>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of slots ever provisioned (live or retired)
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entities still sitting in their slot
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Grow to at least `target` slots, appending entities from `make`.
    ///
    /// Returns how many were appended. Allocation failure is reported
    /// before any slot is touched.
    pub fn top_up(
        &mut self,
        target: usize,
        mut make: impl FnMut() -> FallingEntity,
    ) -> SimResult<usize> {
        let current = self.slots.len();
        if target <= current {
            return Ok(0);
        }

        let additional = target - current;
        self.slots
            .try_reserve(additional)
            .map_err(|_| SimError::PoolExhausted {
                current,
                requested: target,
            })?;

        self.slots.extend((0..additional).map(|_| Some(make())));
        log::debug!("Entity pool grew {} -> {}", current, target);
        Ok(additional)
    }

    /// Checked read access. `Ok(None)` means the slot was retired.
    pub fn get(&self, index: usize) -> SimResult<Option<&FallingEntity>> {
        let len = self.slots.len();
        self.slots
            .get(index)
            .map(Option::as_ref)
            .ok_or_else(|| out_of_bounds(index, len))
    }

    /// Checked write access. `Ok(None)` means the slot was retired.
    pub fn get_mut(&mut self, index: usize) -> SimResult<Option<&mut FallingEntity>> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .map(Option::as_mut)
            .ok_or_else(|| out_of_bounds(index, len))
    }

    /// Move the entity out of its slot
    pub fn take(&mut self, index: usize) -> SimResult<FallingEntity> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(index, len))?;
        slot.take().ok_or_else(|| {
            log::warn!("Entity #{} already retired", index);
            SimError::AlreadyRetired { index }
        })
    }

    /// Live entities among the first `release_count` slots, with their index
    pub fn released(&self, release_count: usize) -> impl Iterator<Item = (usize, &FallingEntity)> {
        let end = release_count.min(self.slots.len());
        self.slots[..end]
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e)))
    }

    /// Mutable variant of [`EntityPool::released`]
    pub fn released_mut(
        &mut self,
        release_count: usize,
    ) -> impl Iterator<Item = (usize, &mut FallingEntity)> {
        let end = release_count.min(self.slots.len());
        self.slots[..end]
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|e| (i, e)))
    }
}
