//! Input/output slot allocator.
//!
//! Inputs are packed into three rows of eight: row 1 (slots 1–8), row 2
//! (9–16) and row 3 (17–24). Each row keeps a counter that advances on
//! every assignment. The torch-collision slot is a single forward
//! reference: branches may reserve a row-2 slot for it, and it is placed
//! once every branch has run.

use mcfg_common::consts::{
    ROW1_START, ROW2_START, ROW3_END, ROW3_START, ROW_CAPACITY, TORCH_COLLISION_FALLBACK_SLOT,
};
use mcfg_common::io::device::{Device, InputDevice, OutputDevice};
use static_assertions::const_assert;

use crate::error::{ConvertError, Row};
use crate::slots::SlotMap;

/// Row-1 counter value from which paired assignments spill into row 3.
pub const ROW1_PAIR_LIMIT: i32 = ROW1_START + ROW_CAPACITY - 1;

const_assert!(ROW1_PAIR_LIMIT < ROW2_START);

#[derive(Debug, Clone)]
pub struct SlotAllocator {
    row1: i32,
    row2: i32,
    row3: i32,
    pending_collision: i32,
    inputs: SlotMap,
    outputs: SlotMap,
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self {
            row1: ROW1_START,
            row2: ROW2_START,
            row3: ROW3_START,
            pending_collision: TORCH_COLLISION_FALLBACK_SLOT,
            inputs: SlotMap::new(),
            outputs: SlotMap::new(),
        }
    }

    /// Next free slot of `row`.
    pub fn next(&self, row: Row) -> i32 {
        match row {
            Row::One => self.row1,
            Row::Two => self.row2,
            Row::Three => self.row3,
        }
    }

    /// Row 1 can still take a paired assignment.
    pub fn row1_has_room(&self) -> bool {
        self.row1 < ROW1_PAIR_LIMIT
    }

    pub fn pending_collision(&self) -> i32 {
        self.pending_collision
    }

    /// Assign `device` to the next slot of `row` and advance the row.
    ///
    /// # Errors
    ///
    /// [`ConvertError::RowExhausted`] if the row has no slot left.
    pub fn assign(&mut self, row: Row, device: InputDevice) -> Result<i32, ConvertError> {
        let end = row_end(row);
        let counter = match row {
            Row::One => &mut self.row1,
            Row::Two => &mut self.row2,
            Row::Three => &mut self.row3,
        };
        if *counter > end {
            return Err(ConvertError::RowExhausted {
                row,
                device: device.code(),
            });
        }
        let slot = *counter;
        *counter += 1;
        self.place_input(slot, device);
        Ok(slot)
    }

    /// Like [`assign`](Self::assign), but a full row 1 or row 2 spills
    /// into row 3.
    pub fn assign_or_spill(&mut self, row: Row, device: InputDevice) -> Result<i32, ConvertError> {
        if row != Row::Three && !self.has_room(row) {
            tracing::debug!(%row, ?device, "row full, spilling into row 3");
            return self.assign(Row::Three, device);
        }
        self.assign(row, device)
    }

    /// `row` still has a free slot.
    pub fn has_room(&self, row: Row) -> bool {
        self.next(row) <= row_end(row)
    }

    /// Place `device` at a fixed input slot without touching row counters.
    pub fn assign_input_at(&mut self, slot: i32, device: InputDevice) {
        self.place_input(slot, device);
    }

    /// Place `device` at a fixed output slot.
    pub fn assign_output_at(&mut self, slot: i32, device: OutputDevice) {
        tracing::debug!(slot, ?device, "output assigned");
        self.outputs.assign(slot, device.code());
    }

    /// Reserve the next row-2 slot for the torch collision input.
    pub fn reserve_collision_slot(&mut self) -> i32 {
        self.pending_collision = self.row2;
        self.row2 += 1;
        tracing::debug!(slot = self.pending_collision, "torch collision slot reserved");
        self.pending_collision
    }

    /// Place the torch collision input at the reserved slot, or in row 3
    /// when the reservation ran past row 2.
    pub fn resolve_torch_collision(&mut self) -> Option<i32> {
        if self.pending_collision < ROW3_START {
            let slot = self.pending_collision;
            self.place_input(slot, InputDevice::TorchCollision);
            Some(slot)
        } else if self.row3 <= ROW3_END {
            self.assign(Row::Three, InputDevice::TorchCollision).ok()
        } else {
            tracing::warn!("no slot left for torch collision input");
            None
        }
    }

    pub fn inputs(&self) -> &SlotMap {
        &self.inputs
    }

    pub fn outputs(&self) -> &SlotMap {
        &self.outputs
    }

    /// Finished `(inputs, outputs)` mappings.
    pub fn into_maps(self) -> (SlotMap, SlotMap) {
        (self.inputs, self.outputs)
    }

    fn place_input(&mut self, slot: i32, device: InputDevice) {
        match self.inputs.assign(slot, device.code()) {
            Some(evicted) => tracing::debug!(slot, ?device, evicted, "input relabelled"),
            None => tracing::debug!(slot, ?device, "input assigned"),
        }
    }
}

/// Last slot of `row`.
const fn row_end(row: Row) -> i32 {
    match row {
        Row::One => ROW2_START - 1,
        Row::Two => ROW3_START - 1,
        Row::Three => ROW3_END,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_start_at_fixed_slots() {
        let a = SlotAllocator::new();
        assert_eq!(a.next(Row::One), 1);
        assert_eq!(a.next(Row::Two), 9);
        assert_eq!(a.next(Row::Three), 17);
        assert_eq!(a.pending_collision(), 16);
    }

    #[test]
    fn assign_advances_only_its_row() {
        let mut a = SlotAllocator::new();
        assert_eq!(a.assign(Row::One, InputDevice::Ncs1).unwrap(), 1);
        assert_eq!(a.assign(Row::Two, InputDevice::DriveDisabled).unwrap(), 9);
        assert_eq!(a.assign(Row::One, InputDevice::Ncs2).unwrap(), 2);
        assert_eq!(a.next(Row::One), 3);
        assert_eq!(a.next(Row::Two), 10);
        assert_eq!(a.next(Row::Three), 17);
    }

    #[test]
    fn row_capacity_is_enforced() {
        let mut a = SlotAllocator::new();
        for expected in 17..=24 {
            assert_eq!(a.assign(Row::Three, InputDevice::TiltPosOvertravel).unwrap(), expected);
        }
        assert!(matches!(
            a.assign(Row::Three, InputDevice::RotateHome),
            Err(ConvertError::RowExhausted { row: Row::Three, device: 17 })
        ));
    }

    #[test]
    fn row1_room_threshold() {
        let mut a = SlotAllocator::new();
        for _ in 0..6 {
            a.assign(Row::One, InputDevice::Ncs1).unwrap();
        }
        assert_eq!(a.next(Row::One), 7);
        assert!(a.row1_has_room());
        a.assign(Row::One, InputDevice::Ncs2).unwrap();
        assert!(!a.row1_has_room());
    }

    #[test]
    fn full_row2_spills_into_row3() {
        let mut a = SlotAllocator::new();
        for _ in 0..8 {
            a.assign(Row::Two, InputDevice::DriveDisabled).unwrap();
        }
        assert!(!a.has_room(Row::Two));
        assert_eq!(
            a.assign_or_spill(Row::Two, InputDevice::Tilt4NegOvertravel).unwrap(),
            17
        );
        assert_eq!(a.next(Row::Two), 17);
        assert_eq!(a.next(Row::Three), 18);
        // Rows with room are used as asked.
        assert_eq!(a.assign_or_spill(Row::One, InputDevice::Ncs1).unwrap(), 1);
    }

    #[test]
    fn unresolved_collision_falls_back_to_slot_16() {
        let mut a = SlotAllocator::new();
        assert_eq!(a.resolve_torch_collision(), Some(16));
        assert_eq!(a.inputs().device_at(16), Some(InputDevice::TorchCollision.code()));
    }

    #[test]
    fn reserved_collision_slot_is_consumed() {
        let mut a = SlotAllocator::new();
        a.assign(Row::Two, InputDevice::DriveDisabled).unwrap();
        assert_eq!(a.reserve_collision_slot(), 10);
        assert_eq!(a.assign(Row::Two, InputDevice::ParkHead2).unwrap(), 11);
        assert_eq!(a.resolve_torch_collision(), Some(10));
    }

    #[test]
    fn collision_past_row2_goes_to_row3() {
        let mut a = SlotAllocator::new();
        for _ in 0..8 {
            a.assign(Row::Two, InputDevice::DriveDisabled).unwrap();
        }
        assert_eq!(a.reserve_collision_slot(), 17);
        assert_eq!(a.resolve_torch_collision(), Some(17));
        assert_eq!(a.next(Row::Three), 18);
    }

    #[test]
    fn outputs_are_independent_of_rows() {
        let mut a = SlotAllocator::new();
        a.assign_output_at(24, OutputDevice::DriveEnable);
        assert_eq!(a.outputs().device_at(24), Some(OutputDevice::DriveEnable.code()));
        assert!(a.inputs().is_empty());
    }
}
