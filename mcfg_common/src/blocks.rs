//! Block headers and block-level parameter keys.
//!
//! Keys keep their trailing `=`; lookups match the text before the first
//! `=` of a line exactly.

// ─── Block headers ──────────────────────────────────────────────────

pub const MACHINE: &str = "[Machine]";
pub const SPEEDS: &str = "[Speeds]";
pub const AXIS0: &str = "[Axis0]";
pub const AXIS1: &str = "[Axis1]";
pub const AXIS6: &str = "[Axis6]";
pub const ANALOG_INPUT_CARD: &str = "[AnalogInputCard]";
pub const ROTATE: &str = "[Rotate]";
pub const TILT: &str = "[Tilt]";
pub const DUAL_ROTATE: &str = "[DualRotate]";
pub const DUAL_TILT: &str = "[DualTilt]";
pub const DUAL_GANTRY: &str = "[DualGantry]";
pub const IO: &str = "[I/O]";
pub const LINK: &str = "[Link]";

/// Header of the `n`-th THC block, 1-based.
pub fn thc(n: i32) -> String {
    format!("[THC{n}]")
}

// ─── [Machine] keys ─────────────────────────────────────────────────

pub const FRONT_PANEL_INSTALLED: &str = "FrontPanelInstalled=";
pub const BEVEL_AXIS_INSTALLED: &str = "BevelAxisInstalled=";
pub const DUAL_BEVEL_INSTALLED: &str = "DualBevelInstalled=";
pub const DUAL_TRANSVERSE_INSTALLED: &str = "DualTransverseInstalled=";
pub const NO_ROTATE_TILT: &str = "NoRotateTilt=";
pub const ONE_ROTATE_TILT: &str = "OneRotateTilt=";
pub const DUAL_GANTRY_INSTALLED: &str = "DualGantryInstalled=";
pub const X_AXIS_ORIENTATION: &str = "XAxisOrientation=";
pub const DUAL_TILT_MODE: &str = "DualTiltMode=";
pub const SENSOR_THC_INSTALLED: &str = "SensorTHCInstalled=";
pub const ARC_GLIDE_THC_INSTALLED: &str = "ArcGlideTHCInstalled=";
pub const AUTO_HOME: &str = "AutoHome=";
pub const SPEED_POT_INSTALLED: &str = "SpeedPotInstalled=";

// ─── [Axis6] keys ───────────────────────────────────────────────────

pub const ROTATING_TRANSVERSE: &str = "RotatingTransverse=";

// ─── Shared axis keys ───────────────────────────────────────────────

pub const SERVO_ERROR_ENGLISH: &str = "ServoErrorTolerance(english)=";
pub const SERVO_ERROR_METRIC: &str = "ServoErrorTolerance(metric)=";
pub const ENCODER_COUNTS_ENGLISH: &str = "EncoderCounts(english)=";
pub const ENCODER_COUNTS_METRIC: &str = "EncoderCounts(metric)=";
