//! System-wide constants for the MCFG workspace.
//!
//! Single source of truth for the document format and I/O slot geometry.

use static_assertions::const_assert;

/// Fixed two-character line terminator of the document format.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Prefix of the mandatory first line.
pub const CHECKSUM_PREFIX: &str = "Checksum=";

/// Number of slots in one input row.
pub const ROW_CAPACITY: i32 = 8;

/// First slot of input row 1.
pub const ROW1_START: i32 = 1;

/// First slot of input row 2.
pub const ROW2_START: i32 = ROW1_START + ROW_CAPACITY;

/// First slot of input row 3.
pub const ROW3_START: i32 = ROW2_START + ROW_CAPACITY;

/// Last slot of input row 3.
pub const ROW3_END: i32 = ROW3_START + ROW_CAPACITY - 1;

/// Torch-collision slot used when no branch claims a dedicated one.
pub const TORCH_COLLISION_FALLBACK_SLOT: i32 = ROW2_START + ROW_CAPACITY - 1;

/// First slot of the overflow region for relocated devices.
pub const OVERFLOW_START: i32 = 49;

/// Output slot of the drive-enable output.
pub const DRIVE_ENABLE_OUTPUT_SLOT: i32 = 24;

/// Maximum number of THC or ArcGlide units.
pub const MAX_THC_UNITS: i32 = 4;

/// Serial port types that remain enabled after conversion.
pub const ALLOWED_PORT_TYPES: [i32; 4] = [1, 2, 5, 6];

const_assert!(ROW3_START == 17);
const_assert!(ROW3_END == 24);
const_assert!(TORCH_COLLISION_FALLBACK_SLOT == 16);
const_assert!(OVERFLOW_START > ROW3_END);
