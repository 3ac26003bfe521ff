//! Slot allocation engine.
//!
//! Replaces tuning blocks from the selected profile and decides which input
//! and output slots the homing and simulated-operation devices occupy. The
//! step order is significant: later steps consume row counters left behind
//! by earlier ones, and the dual-transverse and bevel steps compete for the
//! same rows.

use mcfg_common::blocks;
use mcfg_common::consts::DRIVE_ENABLE_OUTPUT_SLOT;
use mcfg_common::document::ParameterDocument;
use mcfg_common::io::device::{Device, InputDevice, IoSection, OutputDevice};
use mcfg_common::io::key::IoKey;
use mcfg_common::profile::Profile;
use mcfg_common::topology::{MachineFeatures, Topology};
use tracing::{debug, info};

use crate::allocator::SlotAllocator;
use crate::error::{ConvertError, Row};
use crate::slots::SlotMap;

use InputDevice::*;

/// Desired slot mappings produced by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    pub inputs: SlotMap,
    pub outputs: SlotMap,
}

/// Run every allocation step against `doc`.
pub fn allocate(
    doc: &mut ParameterDocument,
    profile: &Profile,
    topology: &Topology,
) -> Result<Allocation, ConvertError> {
    let mut engine = SlotEngine::new(doc, profile, topology);
    engine.run()?;
    Ok(engine.finish())
}

/// One allocation pass over one document.
pub struct SlotEngine<'a> {
    doc: &'a mut ParameterDocument,
    profile: &'a Profile,
    topology: Topology,
    slots: SlotAllocator,
}

impl<'a> SlotEngine<'a> {
    pub fn new(doc: &'a mut ParameterDocument, profile: &'a Profile, topology: &Topology) -> Self {
        Self {
            doc,
            profile,
            topology: *topology,
            slots: SlotAllocator::new(),
        }
    }

    pub fn slots(&self) -> &SlotAllocator {
        &self.slots
    }

    pub fn finish(self) -> Allocation {
        let (inputs, outputs) = self.slots.into_maps();
        Allocation { inputs, outputs }
    }

    pub fn run(&mut self) -> Result<(), ConvertError> {
        info!(profile = %self.profile.id, "allocating slots");
        self.replace_speeds();
        self.apply_height_control()?;
        self.apply_dual_gantry();
        self.slots.assign(Row::Two, DriveDisabled)?;
        self.replace_xy_axes();
        self.assign_overtravels()?;
        self.apply_dual_transverse()?;
        self.apply_bevel()?;
        let collision = self.slots.resolve_torch_collision();
        debug!(?collision, "torch collision resolved");
        self.assign_cut_sense();
        self.assign_cut_control();
        self.slots
            .assign_output_at(DRIVE_ENABLE_OUTPUT_SLOT, OutputDevice::DriveEnable);
        info!(
            inputs = self.slots.inputs().len(),
            outputs = self.slots.outputs().len(),
            "slot allocation complete"
        );
        Ok(())
    }

    fn has(&self, feature: MachineFeatures) -> bool {
        self.topology.has(feature)
    }

    // ─── Block replacement ──────────────────────────────────────────

    pub fn replace_speeds(&mut self) {
        self.doc
            .replace_all(blocks::SPEEDS, &self.profile.speeds.params());
    }

    pub fn replace_xy_axes(&mut self) {
        let axis = self.profile.axis.params();
        self.doc.replace_all(blocks::AXIS0, &axis);
        self.doc.replace_all(blocks::AXIS1, &axis);
    }

    pub fn apply_dual_gantry(&mut self) {
        if self.has(MachineFeatures::DUAL_GANTRY) {
            debug!("replacing dual gantry parameters");
            self.doc
                .replace_all(blocks::DUAL_GANTRY, &self.profile.dual_gantry_params());
        }
    }

    // ─── Torch height control ───────────────────────────────────────

    /// THC units get their blocks replaced and one torch-ready input each;
    /// without THC, ArcGlide units get a ready-to-fire input each.
    pub fn apply_height_control(&mut self) -> Result<(), ConvertError> {
        let thc_count = self.topology.thc_count;
        let arc_glide_count = self.topology.arc_glide_count;

        if thc_count > 0 {
            debug!(thc_count, lifter = self.profile.is_lifter(), "replacing THC blocks");
            let thc_axis = self.profile.thc_axis.params();
            let axis = self.profile.axis.params();
            for n in 1..=thc_count {
                let header = blocks::thc(n);
                self.doc.replace_all(&header, &thc_axis);
                self.doc.replace_all(&header, &axis);
            }
            let machine = &self.profile.thc_machine;
            self.doc
                .replace_all(blocks::ANALOG_INPUT_CARD, &machine.analog_params());
            self.doc
                .replace_all(blocks::MACHINE, &machine.machine_params());
            for device in (1..=thc_count).filter_map(InputDevice::torch_ready) {
                self.slots.assign(Row::One, device)?;
            }
        } else if arc_glide_count > 0 {
            debug!(arc_glide_count, "assigning ArcGlide ready-to-fire inputs");
            for device in (1..=arc_glide_count).filter_map(InputDevice::ready_to_fire) {
                self.slots.assign(Row::One, device)?;
            }
        }
        Ok(())
    }

    // ─── X/Y overtravel ─────────────────────────────────────────────

    /// Rail-mounted X assigns X first, otherwise Y first.
    pub fn assign_overtravels(&mut self) -> Result<(), ConvertError> {
        let x = [(XNegOvertravel, Row::One), (XPosOvertravel, Row::Two)];
        let y = [(YNegOvertravel, Row::One), (YPosOvertravel, Row::Two)];
        let (first, second) = if self.rail_x() { (x, y) } else { (y, x) };
        for (device, row) in first.into_iter().chain(second) {
            self.slots.assign(row, device)?;
        }
        Ok(())
    }

    fn rail_x(&self) -> bool {
        self.has(MachineFeatures::RAIL_X_AXIS)
    }

    // ─── Dual transverse ────────────────────────────────────────────

    pub fn apply_dual_transverse(&mut self) -> Result<(), ConvertError> {
        if !self.has(MachineFeatures::DUAL_TRANSVERSE) {
            return Ok(());
        }
        self.doc
            .replace_all(blocks::AXIS6, &self.profile.axis.params());

        if self.has(MachineFeatures::ROTATING_TRANSVERSE) {
            debug!("rotating transverse");
            let bevel = &self.profile.bevel;
            self.doc
                .replace_all(blocks::MACHINE, &bevel.auto_home_params());
            self.doc.replace_all(blocks::AXIS6, &bevel.overrides());
            self.slots.assign(Row::One, Rotate2Home)?;
            self.slots.assign(Row::Two, DualHeadCollision)?;
        } else {
            debug!("linear dual transverse");
            let other = if self.rail_x() {
                YPosOvertravel
            } else {
                XPosOvertravel
            };
            self.slots.assign(Row::One, other)?;
            // Dual-head collision shares the first overtravel input of row 1.
            let shared = self.slots.next(Row::One) - 3;
            self.slots.assign_input_at(shared, DualHeadCollision);
            self.slots.reserve_collision_slot();
        }

        if self.slots.row1_has_room() {
            self.slots.assign(Row::One, ParkHead1)?;
            self.slots.assign_or_spill(Row::Two, ParkHead2)?;
        } else {
            self.slots.assign(Row::Three, ParkHead1)?;
            self.slots.assign(Row::Three, ParkHead2)?;
        }
        Ok(())
    }

    // ─── Bevel heads ────────────────────────────────────────────────

    pub fn apply_bevel(&mut self) -> Result<(), ConvertError> {
        if !self.topology.single_bevel() {
            return Ok(());
        }
        let bevel_axis = self.profile.bevel_axis_params();
        self.doc
            .replace_all(blocks::MACHINE, &self.profile.bevel.auto_home_params());
        self.doc.replace_all(blocks::ROTATE, &bevel_axis);
        self.doc.replace_all(blocks::TILT, &bevel_axis);

        let dual_tilt = self.has(MachineFeatures::DUAL_TILT);
        if dual_tilt {
            debug!("dual tilt head");
            self.assign_tilt_pair(
                [TiltPosOvertravel, TiltNegOvertravel],
                [Tilt2PosOvertravel, Tilt2NegOvertravel],
            )?;
        } else {
            debug!("rotate/tilt head");
            self.assign_rotate_tilt(TiltPosOvertravel, TiltNegOvertravel, RotateHome)?;
        }

        if self.topology.second_bevel() {
            if dual_tilt {
                debug!("second dual tilt head");
                self.doc.replace_all(blocks::DUAL_TILT, &bevel_axis);
                self.assign_tilt_pair(
                    [Tilt3PosOvertravel, Tilt3NegOvertravel],
                    [Tilt4PosOvertravel, Tilt4NegOvertravel],
                )?;
            } else {
                debug!("second rotate/tilt head");
                self.doc.replace_all(blocks::DUAL_ROTATE, &bevel_axis);
                self.assign_rotate_tilt(Tilt3PosOvertravel, Tilt3NegOvertravel, Rotate2Home)?;
            }
        }
        Ok(())
    }

    /// Two tilt axes: `[pos, neg]` each. Only the positive overtravels
    /// move to row 3 when row 1 is full; negatives spill there once row 2
    /// is full.
    fn assign_tilt_pair(
        &mut self,
        first: [InputDevice; 2],
        second: [InputDevice; 2],
    ) -> Result<(), ConvertError> {
        if self.slots.row1_has_room() {
            for [pos, neg] in [first, second] {
                self.slots.assign(Row::One, pos)?;
                self.slots.assign_or_spill(Row::Two, neg)?;
            }
        } else {
            self.slots.assign(Row::Three, first[0])?;
            self.slots.assign(Row::Three, second[0])?;
        }
        Ok(())
    }

    /// Tilt overtravels plus rotate home; reserves the torch collision slot
    /// when the head fits in rows 1/2.
    fn assign_rotate_tilt(
        &mut self,
        pos: InputDevice,
        neg: InputDevice,
        home: InputDevice,
    ) -> Result<(), ConvertError> {
        if self.slots.row1_has_room() {
            self.slots.assign(Row::One, pos)?;
            self.slots.assign_or_spill(Row::Two, neg)?;
            self.slots.assign(Row::One, home)?;
            self.slots.reserve_collision_slot();
        } else {
            self.slots.assign(Row::Three, pos)?;
            self.slots.assign(Row::Three, home)?;
        }
        Ok(())
    }

    // ─── Cut sense / cut control ────────────────────────────────────

    fn source_has(&self, section: IoSection, device: i32) -> bool {
        let key = IoKey::device_number(section, device).to_string();
        self.doc
            .get_value(blocks::IO, &key)
            .is_some_and(|slot| slot > 0)
    }

    /// Combined cut/mark sense wins over independent channels.
    pub fn assign_cut_sense(&mut self) {
        if self.source_has(IoSection::Input, CutMarkSense.code()) {
            self.slots
                .assign_input_at(self.profile.cut_sense_location, CutMarkSense);
            return;
        }
        for device in (1..=4).filter_map(InputDevice::cut_sense) {
            if !self.source_has(IoSection::Input, device.code()) {
                continue;
            }
            if let Some(slot) = self.profile.input_slot(device) {
                self.slots.assign_input_at(slot, device);
            }
        }
    }

    /// Combined cut/mark control wins over independent channels.
    pub fn assign_cut_control(&mut self) {
        if self.source_has(IoSection::Output, OutputDevice::CutMarkControl.code()) {
            self.slots.assign_output_at(
                self.profile.cut_control_location,
                OutputDevice::CutMarkControl,
            );
            return;
        }
        for device in (1..=4).filter_map(OutputDevice::cut_control) {
            if !self.source_has(IoSection::Output, device.code()) {
                continue;
            }
            if let Some(slot) = self.profile.output_slot(device) {
                self.slots.assign_output_at(slot, device);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcfg_common::profile::{ProfileCatalog, ProfileId};

    fn doc(machine: &str) -> ParameterDocument {
        ParameterDocument::parse(&format!("Checksum=0\r\n[Machine]\r\n{machine}")).unwrap()
    }

    fn topology(features: MachineFeatures) -> Topology {
        Topology {
            features,
            ..Topology::default()
        }
    }

    fn profile() -> &'static Profile {
        ProfileCatalog::get(ProfileId::DiagnosticBoards)
    }

    fn at(engine: &SlotEngine<'_>, slot: i32) -> Option<i32> {
        engine.slots().inputs().device_at(slot)
    }

    #[test]
    fn overtravels_non_rail_assign_y_first() {
        let mut d = doc("");
        let mut e = SlotEngine::new(&mut d, profile(), &Topology::default());
        e.assign_overtravels().unwrap();
        assert_eq!(at(&e, 1), Some(YNegOvertravel.code()));
        assert_eq!(at(&e, 9), Some(YPosOvertravel.code()));
        assert_eq!(at(&e, 2), Some(XNegOvertravel.code()));
        assert_eq!(at(&e, 10), Some(XPosOvertravel.code()));
    }

    #[test]
    fn overtravels_rail_assign_x_first() {
        let mut d = doc("");
        let mut e = SlotEngine::new(&mut d, profile(), &topology(MachineFeatures::RAIL_X_AXIS));
        e.assign_overtravels().unwrap();
        assert_eq!(at(&e, 1), Some(XNegOvertravel.code()));
        assert_eq!(at(&e, 2), Some(YNegOvertravel.code()));
    }

    #[test]
    fn arc_glide_used_only_without_thc() {
        let mut d = doc("");
        let t = Topology {
            thc_count: 1,
            arc_glide_count: 3,
            ..Topology::default()
        };
        let mut e = SlotEngine::new(&mut d, profile(), &t);
        e.apply_height_control().unwrap();
        assert_eq!(at(&e, 1), Some(Ncs1.code()));
        assert_eq!(at(&e, 2), None);

        let mut d = doc("");
        let t = Topology {
            arc_glide_count: 3,
            ..Topology::default()
        };
        let mut e = SlotEngine::new(&mut d, profile(), &t);
        e.apply_height_control().unwrap();
        for (slot, device) in [(1, ReadyToFire1), (2, ReadyToFire2), (3, ReadyToFire3)] {
            assert_eq!(at(&e, slot), Some(device.code()));
        }
        assert_eq!(e.slots().next(Row::One), 4);
    }

    #[test]
    fn linear_dual_transverse_relabels_first_overtravel() {
        let mut d = doc("");
        let t = topology(MachineFeatures::DUAL_BEVEL | MachineFeatures::DUAL_TRANSVERSE);
        let mut e = SlotEngine::new(&mut d, profile(), &t);
        e.slots.assign(Row::Two, DriveDisabled).unwrap();
        e.assign_overtravels().unwrap();
        e.apply_dual_transverse().unwrap();

        // X+ moved from slot 11 into row 1.
        assert_eq!(at(&e, 3), Some(XPosOvertravel.code()));
        assert_eq!(at(&e, 11), None);
        // Slot three behind the row-1 counter becomes dual-head collision.
        assert_eq!(at(&e, 1), Some(DualHeadCollision.code()));
        // Torch collision reserved the next row-2 slot; park head 2 follows it.
        assert_eq!(e.slots().pending_collision(), 12);
        assert_eq!(at(&e, 4), Some(ParkHead1.code()));
        assert_eq!(at(&e, 13), Some(ParkHead2.code()));
    }

    #[test]
    fn rotating_transverse_assigns_rotate2_home() {
        let mut d = doc("AutoHome=0\r\n");
        let t = topology(
            MachineFeatures::DUAL_BEVEL
                | MachineFeatures::DUAL_TRANSVERSE
                | MachineFeatures::ROTATING_TRANSVERSE,
        );
        let mut e = SlotEngine::new(&mut d, profile(), &t);
        e.apply_dual_transverse().unwrap();
        assert_eq!(at(&e, 1), Some(Rotate2Home.code()));
        assert_eq!(at(&e, 9), Some(DualHeadCollision.code()));
        assert_eq!(e.slots().pending_collision(), 16);
        drop(e);
        assert_eq!(d.get_value(blocks::MACHINE, blocks::AUTO_HOME), Some(1));
    }

    #[test]
    fn single_tilt_reserves_collision_slot() {
        let mut d = doc("");
        let mut e = SlotEngine::new(&mut d, profile(), &topology(MachineFeatures::BEVEL_AXIS));
        e.apply_bevel().unwrap();
        assert_eq!(at(&e, 1), Some(TiltPosOvertravel.code()));
        assert_eq!(at(&e, 9), Some(TiltNegOvertravel.code()));
        assert_eq!(at(&e, 2), Some(RotateHome.code()));
        assert_eq!(e.slots().pending_collision(), 10);
    }

    #[test]
    fn dual_tilt_fills_rows_in_pairs() {
        let mut d = doc("");
        let t = topology(MachineFeatures::BEVEL_AXIS | MachineFeatures::DUAL_TILT);
        let mut e = SlotEngine::new(&mut d, profile(), &t);
        e.apply_bevel().unwrap();
        assert_eq!(at(&e, 1), Some(TiltPosOvertravel.code()));
        assert_eq!(at(&e, 9), Some(TiltNegOvertravel.code()));
        assert_eq!(at(&e, 2), Some(Tilt2PosOvertravel.code()));
        assert_eq!(at(&e, 10), Some(Tilt2NegOvertravel.code()));
        assert_eq!(e.slots().pending_collision(), 16);
    }

    #[test]
    fn full_row1_pushes_bevel_into_row3() {
        let mut d = doc("");
        let mut e = SlotEngine::new(&mut d, profile(), &topology(MachineFeatures::BEVEL_AXIS));
        for _ in 0..7 {
            e.slots.assign(Row::One, Ncs1).unwrap();
        }
        e.apply_bevel().unwrap();
        assert_eq!(at(&e, 17), Some(TiltPosOvertravel.code()));
        assert_eq!(at(&e, 18), Some(RotateHome.code()));
        assert_eq!(e.slots().pending_collision(), 16);
    }

    #[test]
    fn second_rotate_head_uses_dual_rotate() {
        let mut d = ParameterDocument::parse(
            "Checksum=0\r\n[DualRotate]\r\nDriveType=0\r\n\r\n[DualTilt]\r\nDriveType=0\r\n",
        )
        .unwrap();
        let t = topology(MachineFeatures::BEVEL_AXIS | MachineFeatures::DUAL_BEVEL);
        let mut e = SlotEngine::new(&mut d, profile(), &t);
        e.apply_bevel().unwrap();
        assert_eq!(at(&e, 3), Some(Tilt3PosOvertravel.code()));
        assert_eq!(at(&e, 11), Some(Tilt3NegOvertravel.code()));
        assert_eq!(at(&e, 4), Some(Rotate2Home.code()));
        assert_eq!(e.slots().pending_collision(), 12);
        drop(e);
        let drive = profile().axis.drive_type;
        assert_eq!(d.get_value(blocks::DUAL_ROTATE, "DriveType="), Some(drive));
        assert_eq!(d.get_value(blocks::DUAL_TILT, "DriveType="), Some(0));
    }

    #[test]
    fn dual_tilt_heads_with_linear_transverse_spill_row2() {
        let mut d = doc("");
        let t = topology(
            MachineFeatures::BEVEL_AXIS
                | MachineFeatures::DUAL_BEVEL
                | MachineFeatures::DUAL_TRANSVERSE
                | MachineFeatures::DUAL_TILT,
        );
        let allocation = allocate(&mut d, profile(), &t).unwrap();
        let inputs = &allocation.inputs;

        // Row 2: 9 drive disabled, 10 Y+, 12 torch collision, 13 park head 2.
        assert_eq!(inputs.device_at(12), Some(TorchCollision.code()));
        assert_eq!(inputs.device_at(13), Some(ParkHead2.code()));
        assert_eq!(inputs.device_at(14), Some(TiltNegOvertravel.code()));
        assert_eq!(inputs.device_at(15), Some(Tilt2NegOvertravel.code()));
        assert_eq!(inputs.device_at(16), Some(Tilt3NegOvertravel.code()));
        assert_eq!(inputs.slot_of(Tilt4PosOvertravel.code()), Some(8));
        assert_eq!(inputs.slot_of(Tilt4NegOvertravel.code()), Some(17));
    }

    #[test]
    fn no_rotate_tilt_skips_bevel() {
        let mut d = doc("");
        let t = topology(
            MachineFeatures::BEVEL_AXIS
                | MachineFeatures::DUAL_BEVEL
                | MachineFeatures::NO_ROTATE_TILT,
        );
        let mut e = SlotEngine::new(&mut d, profile(), &t);
        e.apply_bevel().unwrap();
        assert!(e.slots().inputs().is_empty());
    }

    #[test]
    fn combined_cut_sense_wins() {
        let mut d = ParameterDocument::parse(
            "Checksum=0\r\n[I/O]\r\nInput1Number=5\r\nInput2Number=6\r\nOutput2Number=3\r\n",
        )
        .unwrap();
        let bench = ProfileCatalog::get(ProfileId::Bench);
        let mut e = SlotEngine::new(&mut d, bench, &Topology::default());
        e.assign_cut_sense();
        e.assign_cut_control();
        assert_eq!(at(&e, 40), Some(CutMarkSense.code()));
        assert!(!e.slots().inputs().contains_device(CutSense1.code()));
        assert_eq!(
            e.slots().outputs().device_at(40),
            Some(OutputDevice::CutControl1.code())
        );
    }

    #[test]
    fn independent_cut_sense_only_when_present() {
        let mut d = ParameterDocument::parse(
            "Checksum=0\r\n[I/O]\r\nInput2Number=0\r\nInput3Number=7\r\nInput5Number=8\r\n",
        )
        .unwrap();
        let mut e = SlotEngine::new(&mut d, profile(), &Topology::default());
        e.assign_cut_sense();
        assert_eq!(at(&e, 40), None);
        assert_eq!(at(&e, 41), Some(CutSense2.code()));
        assert_eq!(at(&e, 42), None);
        assert_eq!(at(&e, 43), Some(CutSense4.code()));
    }
}
