//! Prelude module for common re-exports.
//!
//! ```rust
//! use mcfg_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Document ───────────────────────────────────────────────────────
pub use crate::document::{DocumentError, ParamMap, ParameterDocument};
pub use crate::status::{Severity, StatusChannel};

// ─── I/O ────────────────────────────────────────────────────────────
pub use crate::io::device::{Device, InputDevice, IoSection, OutputDevice};
pub use crate::io::key::{IoKey, IoKeyKind, PortKey};

// ─── Profiles & topology ────────────────────────────────────────────
pub use crate::profile::{Profile, ProfileCatalog, ProfileError, ProfileId};
pub use crate::topology::{MachineFeatures, Topology};
