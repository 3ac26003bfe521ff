//! Installed-feature inference.
//!
//! Reads `[Machine]` and `[Axis6]` flags; a flag is set when its value is
//! greater than zero. Pure function of the document.

use bitflags::bitflags;
use serde::Serialize;

use crate::blocks;
use crate::consts::MAX_THC_UNITS;
use crate::document::ParameterDocument;

bitflags! {
    /// Machine features inferred from the document.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct MachineFeatures: u16 {
        const FRONT_PANEL         = 0x0001;
        const BEVEL_AXIS          = 0x0002;
        const DUAL_BEVEL          = 0x0004;
        /// Only set together with `DUAL_BEVEL`.
        const DUAL_TRANSVERSE     = 0x0008;
        const NO_ROTATE_TILT      = 0x0010;
        const ONE_ROTATE_TILT     = 0x0020;
        const DUAL_GANTRY         = 0x0040;
        const ROTATING_TRANSVERSE = 0x0080;
        /// X axis is the rail-mounted axis.
        const RAIL_X_AXIS         = 0x0100;
        const DUAL_TILT           = 0x0200;
    }
}

impl Default for MachineFeatures {
    fn default() -> Self {
        Self::empty()
    }
}

/// Machine topology: feature flags plus THC/ArcGlide unit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Topology {
    pub features: MachineFeatures,
    /// Sensor THC units, 0..=4.
    pub thc_count: i32,
    /// ArcGlide units, 0..=4.
    pub arc_glide_count: i32,
}

impl Topology {
    /// Infer the topology from `[Machine]` and `[Axis6]`.
    pub fn infer(doc: &ParameterDocument) -> Self {
        let flag = |header: &str, key: &str| doc.get_value(header, key).is_some_and(|v| v > 0);
        let count = |key: &str| {
            doc.get_value(blocks::MACHINE, key)
                .unwrap_or(0)
                .clamp(0, MAX_THC_UNITS)
        };

        let mut features = MachineFeatures::empty();
        let machine_flags = [
            (blocks::FRONT_PANEL_INSTALLED, MachineFeatures::FRONT_PANEL),
            (blocks::BEVEL_AXIS_INSTALLED, MachineFeatures::BEVEL_AXIS),
            (blocks::DUAL_BEVEL_INSTALLED, MachineFeatures::DUAL_BEVEL),
            (blocks::NO_ROTATE_TILT, MachineFeatures::NO_ROTATE_TILT),
            (blocks::ONE_ROTATE_TILT, MachineFeatures::ONE_ROTATE_TILT),
            (blocks::DUAL_GANTRY_INSTALLED, MachineFeatures::DUAL_GANTRY),
            (blocks::X_AXIS_ORIENTATION, MachineFeatures::RAIL_X_AXIS),
            (blocks::DUAL_TILT_MODE, MachineFeatures::DUAL_TILT),
        ];
        for (key, feature) in machine_flags {
            features.set(feature, flag(blocks::MACHINE, key));
        }
        features.set(
            MachineFeatures::DUAL_TRANSVERSE,
            flag(blocks::MACHINE, blocks::DUAL_TRANSVERSE_INSTALLED)
                && features.contains(MachineFeatures::DUAL_BEVEL),
        );
        features.set(
            MachineFeatures::ROTATING_TRANSVERSE,
            flag(blocks::AXIS6, blocks::ROTATING_TRANSVERSE),
        );

        let topology = Self {
            features,
            thc_count: count(blocks::SENSOR_THC_INSTALLED),
            arc_glide_count: count(blocks::ARC_GLIDE_THC_INSTALLED),
        };
        tracing::debug!(?topology, "topology inferred");
        topology
    }

    #[inline]
    pub fn has(&self, feature: MachineFeatures) -> bool {
        self.features.contains(feature)
    }

    /// A single bevel head is driven through `[Rotate]`/`[Tilt]`.
    pub fn single_bevel(&self) -> bool {
        self.has(MachineFeatures::BEVEL_AXIS)
            && (!self.has(MachineFeatures::DUAL_BEVEL)
                || !self.has(MachineFeatures::NO_ROTATE_TILT))
    }

    /// A second bevel head is driven through `[DualRotate]`/`[DualTilt]`.
    pub fn second_bevel(&self) -> bool {
        self.has(MachineFeatures::DUAL_BEVEL) && !self.has(MachineFeatures::ONE_ROTATE_TILT)
    }
}
