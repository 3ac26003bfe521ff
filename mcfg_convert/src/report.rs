//! Conversion summary.

use mcfg_common::profile::ProfileId;
use mcfg_common::topology::Topology;
use serde::Serialize;

use crate::engine::Allocation;
use crate::reconcile::{DisabledPort, Relocation};
use crate::slots::SlotMap;

/// One slot → device mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub slot: i32,
    pub device: i32,
}

/// What a conversion run changed, serializable for `--report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub profile: ProfileId,
    pub topology: Topology,
    pub inputs: Vec<Assignment>,
    pub outputs: Vec<Assignment>,
    pub relocations: Vec<Relocation>,
    pub disabled_ports: Vec<DisabledPort>,
    pub warnings: Vec<String>,
}

impl ConversionReport {
    pub fn new(
        profile: ProfileId,
        topology: Topology,
        allocation: &Allocation,
        relocations: Vec<Relocation>,
        disabled_ports: Vec<DisabledPort>,
    ) -> Self {
        Self {
            profile,
            topology,
            inputs: assignments(&allocation.inputs),
            outputs: assignments(&allocation.outputs),
            relocations,
            disabled_ports,
            warnings: Vec::new(),
        }
    }

    /// Device assigned to input `slot`, if any.
    pub fn input_at(&self, slot: i32) -> Option<i32> {
        self.inputs.iter().find(|a| a.slot == slot).map(|a| a.device)
    }

    /// Device assigned to output `slot`, if any.
    pub fn output_at(&self, slot: i32) -> Option<i32> {
        self.outputs.iter().find(|a| a.slot == slot).map(|a| a.device)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn assignments(map: &SlotMap) -> Vec<Assignment> {
    map.iter()
        .map(|(slot, device)| Assignment { slot, device })
        .collect()
}
