//! Device vocabulary (closed sets with fixed numeric codes).

use core::fmt;

use serde::{Deserialize, Serialize};

// ─── IoSection ──────────────────────────────────────────────────────

/// Section of the `[I/O]` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoSection {
    Input,
    Output,
}

impl IoSection {
    /// Key prefix used in the `[I/O]` block.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Output => "Output",
        }
    }
}

impl fmt::Display for IoSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Device with a fixed numeric code in one I/O section.
pub trait Device: Copy + fmt::Debug {
    const SECTION: IoSection;

    /// Numeric device code as stored in the document.
    fn code(self) -> i32;
}

// ─── InputDevice ────────────────────────────────────────────────────

/// Input functions the converter assigns to slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum InputDevice {
    CutMarkSense = 1,
    CutSense1 = 2,
    CutSense2 = 3,
    CutSense3 = 4,
    CutSense4 = 5,
    DriveDisabled = 6,
    XNegOvertravel = 7,
    XPosOvertravel = 8,
    YNegOvertravel = 9,
    YPosOvertravel = 10,
    TorchCollision = 11,
    DualHeadCollision = 14,
    ParkHead1 = 15,
    ParkHead2 = 16,
    RotateHome = 17,
    Rotate2Home = 18,
    TiltPosOvertravel = 19,
    TiltNegOvertravel = 20,
    Tilt2PosOvertravel = 21,
    Tilt2NegOvertravel = 22,
    Tilt3PosOvertravel = 23,
    Tilt3NegOvertravel = 24,
    Tilt4PosOvertravel = 25,
    Tilt4NegOvertravel = 26,
    Ncs1 = 47,
    Ncs2 = 52,
    Ncs3 = 57,
    Ncs4 = 62,
    ReadyToFire1 = 70,
    ReadyToFire2 = 71,
    ReadyToFire3 = 72,
    ReadyToFire4 = 73,
}

impl InputDevice {
    /// Torch-ready (nozzle contact sense) input of THC unit `n` (1-based).
    pub const fn torch_ready(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::Ncs1),
            2 => Some(Self::Ncs2),
            3 => Some(Self::Ncs3),
            4 => Some(Self::Ncs4),
            _ => None,
        }
    }

    /// Ready-to-fire input of ArcGlide unit `n` (1-based).
    pub const fn ready_to_fire(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::ReadyToFire1),
            2 => Some(Self::ReadyToFire2),
            3 => Some(Self::ReadyToFire3),
            4 => Some(Self::ReadyToFire4),
            _ => None,
        }
    }

    /// Independent cut-sense input `n` (1-based).
    pub const fn cut_sense(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::CutSense1),
            2 => Some(Self::CutSense2),
            3 => Some(Self::CutSense3),
            4 => Some(Self::CutSense4),
            _ => None,
        }
    }
}

impl Device for InputDevice {
    const SECTION: IoSection = IoSection::Input;

    fn code(self) -> i32 {
        self as i32
    }
}

// ─── OutputDevice ───────────────────────────────────────────────────

/// Output functions the converter assigns to slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum OutputDevice {
    CutMarkControl = 1,
    CutControl1 = 2,
    CutControl2 = 3,
    CutControl3 = 4,
    CutControl4 = 5,
    DriveEnable = 6,
}

impl OutputDevice {
    /// Independent cut-control output `n` (1-based).
    pub const fn cut_control(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::CutControl1),
            2 => Some(Self::CutControl2),
            3 => Some(Self::CutControl3),
            4 => Some(Self::CutControl4),
            _ => None,
        }
    }
}

impl Device for OutputDevice {
    const SECTION: IoSection = IoSection::Output;

    fn code(self) -> i32 {
        self as i32
    }
}
