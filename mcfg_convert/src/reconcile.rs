//! I/O reconciliation pass.
//!
//! Merges the desired slot mappings into the document's existing `[I/O]`
//! block. Pre-existing devices the converter did not place keep their slot
//! unless it is taken, in which case they move to the overflow region
//! starting at slot 49. Serial links in `[Link]` that need real hardware are
//! disabled.

use std::collections::BTreeMap;

use mcfg_common::blocks;
use mcfg_common::consts::{ALLOWED_PORT_TYPES, OVERFLOW_START};
use mcfg_common::document::{ParamMap, ParameterDocument};
use mcfg_common::io::device::IoSection;
use mcfg_common::io::key::{IoKey, IoKeyKind, PortKey};
use serde::Serialize;
use tracing::{debug, info};

use crate::engine::Allocation;
use crate::slots::SlotMap;

/// Pre-existing device moved out of a slot the converter claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub section: IoSection,
    pub device: i32,
    pub from: i32,
    pub to: i32,
}

/// Serial port disabled by the link reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisabledPort {
    pub port: i32,
    pub port_type: i32,
}

/// Merge `allocation` into `[I/O]`. No-op without an `[I/O]` block.
pub fn reconcile_io(doc: &mut ParameterDocument, allocation: &Allocation) -> Vec<Relocation> {
    if doc.find(blocks::IO).is_none() {
        debug!("no [I/O] block, nothing to reconcile");
        return Vec::new();
    }

    let entries: Vec<(IoKey, String, i32)> = doc
        .entries(blocks::IO)
        .into_iter()
        .filter_map(|(key, value)| IoKey::parse(&key).map(|k| (k, key, value)))
        .collect();
    let mut merged: ParamMap = doc.collect(blocks::IO);
    let mut relocations = Vec::new();

    for (section, wanted) in [
        (IoSection::Input, &allocation.inputs),
        (IoSection::Output, &allocation.outputs),
    ] {
        let existing: Vec<(IoKey, i32)> = entries
            .iter()
            .filter(|(k, _, _)| k.section == section)
            .map(|(k, _, v)| (*k, *v))
            .collect();

        for (key, _) in leading_polarity(&existing) {
            merged.insert(key.to_string(), 0);
        }

        let section_merge = merge_section(section, &existing, wanted);
        for (device, slot) in &section_merge.numbers {
            merged.insert(IoKey::device_number(section, *device).to_string(), *slot);
        }
        for (slot, device) in &section_merge.types {
            merged.insert(IoKey::slot_type(section, *slot).to_string(), *device);
        }
        relocations.extend(section_merge.relocations);
    }

    doc.replace_all(blocks::IO, &merged);
    info!(relocated = relocations.len(), "I/O block reconciled");
    relocations
}

/// Polarity lines preceding the first type line of a section.
fn leading_polarity(existing: &[(IoKey, i32)]) -> impl Iterator<Item = &(IoKey, i32)> {
    existing
        .iter()
        .take_while(|(k, _)| k.kind != IoKeyKind::Type)
        .filter(|(k, _)| k.kind == IoKeyKind::Logic)
}

#[derive(Debug, Default)]
struct SectionMerge {
    /// device → slot
    numbers: BTreeMap<i32, i32>,
    /// slot → device, 0 for a cleared slot
    types: BTreeMap<i32, i32>,
    relocations: Vec<Relocation>,
}

impl SectionMerge {
    fn occupied_by_other(&self, slot: i32, device: i32) -> bool {
        self.types.get(&slot).is_some_and(|d| *d != 0 && *d != device)
    }

    /// Clear `slot` unless something already claimed it.
    fn clear_unclaimed(&mut self, slot: i32) {
        if slot > 0 {
            self.types.entry(slot).or_insert(0);
        }
    }
}

fn merge_section(section: IoSection, existing: &[(IoKey, i32)], wanted: &SlotMap) -> SectionMerge {
    let mut merge = SectionMerge::default();
    for (slot, device) in wanted.iter() {
        merge.types.insert(slot, device);
        merge.numbers.insert(device, slot);
    }

    let mut overflow = OVERFLOW_START;
    let numbers = existing.iter().filter(|(k, _)| k.kind == IoKeyKind::Number);
    for &(key, slot) in numbers {
        let device = key.index;

        if let Some(new_slot) = wanted.slot_of(device) {
            if slot != new_slot {
                merge.clear_unclaimed(slot);
            }
            continue;
        }
        if slot <= 0 {
            continue;
        }

        if merge.occupied_by_other(slot, device) {
            while merge.occupied_by_other(overflow, device) {
                overflow += 1;
            }
            let to = overflow;
            overflow += 1;
            merge.numbers.insert(device, to);
            merge.types.insert(to, device);

            let stale = existing
                .iter()
                .filter(|(k, d)| k.kind == IoKeyKind::Type && *d == device && k.index != to)
                .map(|(k, _)| k.index)
                .collect::<Vec<_>>();
            for old in stale {
                merge.clear_unclaimed(old);
            }

            debug!(%section, device, from = slot, to, "device relocated to overflow slot");
            merge.relocations.push(Relocation {
                section,
                device,
                from: slot,
                to,
            });
        } else {
            merge.numbers.insert(device, slot);
            merge.types.insert(slot, device);
        }
    }
    merge
}

/// Zero serial ports whose type needs real hardware, along with the
/// `Port<type>Number=` entry named by the rejected type value.
pub fn reset_serial_ports(doc: &mut ParameterDocument) -> Vec<DisabledPort> {
    if doc.find(blocks::LINK).is_none() {
        return Vec::new();
    }

    let mut changes = ParamMap::new();
    let mut disabled = Vec::new();
    for (key, value) in doc.entries(blocks::LINK) {
        let Some(PortKey::Type(port)) = PortKey::parse(&key) else {
            continue;
        };
        if value <= 0 || ALLOWED_PORT_TYPES.contains(&value) {
            continue;
        }
        changes.insert(key, 0);
        changes.insert(PortKey::Number(value).to_string(), 0);
        debug!(port, port_type = value, "serial port disabled");
        disabled.push(DisabledPort {
            port,
            port_type: value,
        });
    }

    doc.replace_all(blocks::LINK, &changes);
    disabled
}
