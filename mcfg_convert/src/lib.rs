//! # MCFG Convert
//!
//! Retargets a machine configuration document to one of the built-in
//! drive/axis hardware profiles so the machine can run on diagnostic or
//! bench hardware.
//!
//! A conversion:
//! 1. infers the installed features from `[Machine]`/`[Axis6]`
//! 2. replaces tuning blocks from the profile and allocates homing and
//!    overtravel inputs into three rows of eight slots
//! 3. merges the new slot mapping into `[I/O]`, relocating displaced
//!    devices to slot 49 and beyond
//! 4. disables serial links that need real hardware
//!
//! ```rust,no_run
//! use mcfg_common::profile::ProfileId;
//! use mcfg_convert::session::ConversionSession;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), mcfg_convert::error::ConvertError> {
//! let mut session = ConversionSession::load(Path::new("machine.ini"))?;
//! session.select_profile(ProfileId::Bench);
//! let report = session.convert()?;
//! session.recompute_checksum();
//! session.save(Path::new("machine_converted.ini"))?;
//! println!("{} relocations", report.relocations.len());
//! # Ok(())
//! # }
//! ```

pub mod allocator;
pub mod config;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod report;
pub mod session;
pub mod slots;

use mcfg_common::document::ParameterDocument;
use mcfg_common::profile::Profile;
use mcfg_common::topology::Topology;
use tracing::info;

use error::ConvertError;
use report::ConversionReport;

/// Convert `doc` in place for `profile`.
///
/// On error `doc` may be partially converted and should be discarded;
/// [`session::ConversionSession`] handles that by working on a copy.
pub fn convert(doc: &mut ParameterDocument, profile: &Profile) -> Result<ConversionReport, ConvertError> {
    let topology = Topology::infer(doc);
    info!(
        features = ?topology.features,
        thc = topology.thc_count,
        arc_glide = topology.arc_glide_count,
        "topology inferred"
    );

    let allocation = engine::allocate(doc, profile, &topology)?;
    let relocations = reconcile::reconcile_io(doc, &allocation);
    let disabled_ports = reconcile::reset_serial_ports(doc);

    info!(
        inputs = allocation.inputs.len(),
        outputs = allocation.outputs.len(),
        relocated = relocations.len(),
        disabled_ports = disabled_ports.len(),
        "conversion complete"
    );
    Ok(ConversionReport::new(
        profile.id,
        topology,
        &allocation,
        relocations,
        disabled_ports,
    ))
}
