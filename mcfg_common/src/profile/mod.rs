//! Hardware-profile catalog.
//!
//! Three fixed profiles, each an immutable `'static` table. Selecting a
//! profile hands out a reference; nothing here is ever mutated.

pub mod defaults;
mod tables;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::ParamMap;
use crate::io::device::{InputDevice, OutputDevice};

use defaults::{
    AxisDefaults, BevelDefaults, DualGantryDefaults, SpeedDefaults, ThcAxisTable,
    ThcMachineDefaults,
};

/// Unknown profile identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hardware profile {0:?}, expected one of: diagnostic-boards, bench, edge-pro-ti")]
pub struct ProfileError(pub String);

// ─── ProfileId ──────────────────────────────────────────────────────

/// Identity of a built-in hardware profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileId {
    /// Diagnostic I/O boards.
    DiagnosticBoards,
    /// Bench / 6-axis test rig.
    Bench,
    /// EDGE Pro Ti control.
    EdgeProTi,
}

impl ProfileId {
    pub const ALL: [Self; 3] = [Self::DiagnosticBoards, Self::Bench, Self::EdgeProTi];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DiagnosticBoards => "diagnostic-boards",
            Self::Bench => "bench",
            Self::EdgeProTi => "edge-pro-ti",
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileId {
    type Err = ProfileError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProfileError(s.to_string()))
    }
}

// ─── Profile ────────────────────────────────────────────────────────

/// Default parameters for one hardware configuration.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub display_name: &'static str,
    pub axis: AxisDefaults,
    pub thc_axis: ThcAxisTable,
    pub thc_machine: ThcMachineDefaults,
    pub bevel: BevelDefaults,
    pub dual_gantry: DualGantryDefaults,
    pub speeds: SpeedDefaults,
    /// Slot expected for a combined cut/mark-sense input.
    pub cut_sense_location: i32,
    /// Slot expected for a combined cut/mark-control output.
    pub cut_control_location: i32,
    /// Fixed input slots: independent cut-sense channels.
    pub input_types: &'static [(InputDevice, i32)],
    /// Fixed output slots: independent cut-control channels and drive enable.
    pub output_types: &'static [(OutputDevice, i32)],
}

impl Profile {
    /// Profile drives THC units through an integrated lifter.
    pub const fn is_lifter(&self) -> bool {
        matches!(self.thc_axis, ThcAxisTable::Lifter(_))
    }

    /// Generic axis parameters with bevel servo-error/encoder overrides.
    pub fn bevel_axis_params(&self) -> ParamMap {
        let mut p = self.axis.params();
        p.extend(self.bevel.overrides());
        p
    }

    /// Generic axis parameters plus gantry skew tolerance.
    pub fn dual_gantry_params(&self) -> ParamMap {
        let mut p = self.axis.params();
        p.extend(self.dual_gantry.params());
        p
    }

    /// Fixed input slot for `device`, if the profile defines one.
    pub fn input_slot(&self, device: InputDevice) -> Option<i32> {
        self.input_types
            .iter()
            .find(|(d, _)| *d == device)
            .map(|(_, slot)| *slot)
    }

    /// Fixed output slot for `device`, if the profile defines one.
    pub fn output_slot(&self, device: OutputDevice) -> Option<i32> {
        self.output_types
            .iter()
            .find(|(d, _)| *d == device)
            .map(|(_, slot)| *slot)
    }
}

// ─── ProfileCatalog ─────────────────────────────────────────────────

/// Lookup over the built-in profiles.
pub struct ProfileCatalog;

impl ProfileCatalog {
    pub fn get(id: ProfileId) -> &'static Profile {
        match id {
            ProfileId::DiagnosticBoards => &tables::DIAGNOSTIC_BOARDS,
            ProfileId::Bench => &tables::BENCH,
            ProfileId::EdgeProTi => &tables::EDGE_PRO_TI,
        }
    }

    /// Resolve a profile by its identity string.
    pub fn by_name(name: &str) -> Result<&'static Profile, ProfileError> {
        name.parse().map(Self::get)
    }

    pub fn all() -> impl Iterator<Item = &'static Profile> {
        ProfileId::ALL.into_iter().map(Self::get)
    }
}
