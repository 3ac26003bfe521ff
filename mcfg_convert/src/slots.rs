//! Bidirectional slot mapping (`type → device` and `device → type`).
//!
//! Holds at most one device per slot and one slot per device: assigning
//! over an occupied slot evicts the previous occupant.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotMap {
    by_type: BTreeMap<i32, i32>,
    by_device: BTreeMap<i32, i32>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `device` at `slot`. Returns the device evicted from `slot`.
    pub fn assign(&mut self, slot: i32, device: i32) -> Option<i32> {
        if let Some(previous_slot) = self.by_device.insert(device, slot) {
            if previous_slot != slot {
                self.by_type.remove(&previous_slot);
            }
        }
        let evicted = self.by_type.insert(slot, device).filter(|d| *d != device);
        if let Some(d) = evicted {
            self.by_device.remove(&d);
        }
        evicted
    }

    pub fn device_at(&self, slot: i32) -> Option<i32> {
        self.by_type.get(&slot).copied()
    }

    pub fn slot_of(&self, device: i32) -> Option<i32> {
        self.by_device.get(&device).copied()
    }

    pub fn contains_slot(&self, slot: i32) -> bool {
        self.by_type.contains_key(&slot)
    }

    pub fn contains_device(&self, device: i32) -> bool {
        self.by_device.contains_key(&device)
    }

    /// `(slot, device)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.by_type.iter().map(|(s, d)| (*s, *d))
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
