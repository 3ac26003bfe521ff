//! Built-in profile data.
//!
//! Values are opaque hardware constants; several differ between profiles
//! only by vendor-specific magic numbers.

use super::defaults::{
    AxisDefaults, BevelDefaults, DualGantryDefaults, LifterDefaults, SpeedDefaults,
    ThcAxisDefaults, ThcAxisTable, ThcMachineDefaults, UnitPair,
};
use super::{Profile, ProfileId};
use crate::consts::DRIVE_ENABLE_OUTPUT_SLOT;
use crate::io::device::{InputDevice, OutputDevice};

const INPUT_TYPES: &[(InputDevice, i32)] = &[
    (InputDevice::CutSense1, 40),
    (InputDevice::CutSense2, 41),
    (InputDevice::CutSense3, 42),
    (InputDevice::CutSense4, 43),
];

const OUTPUT_TYPES: &[(OutputDevice, i32)] = &[
    (OutputDevice::CutControl1, 40),
    (OutputDevice::CutControl2, 41),
    (OutputDevice::CutControl3, 42),
    (OutputDevice::CutControl4, 43),
    (OutputDevice::DriveEnable, DRIVE_ENABLE_OUTPUT_SLOT),
];

// ─── Diagnostic boards ──────────────────────────────────────────────

pub(super) static DIAGNOSTIC_BOARDS: Profile = Profile {
    id: ProfileId::DiagnosticBoards,
    display_name: "Diagnostic Boards",
    axis: AxisDefaults {
        proportional_gain: [10, 10, 10, 10, 10],
        integral_gain: [0, 0, 0, 0, 0],
        derivative_gain: [0, 0, 0, 0, 0],
        feed_forward_gain: [0, 0, 0, 0, 0],
        velocity_gain: [0, 0, 0, 0, 0],
        servo_error: UnitPair::new(10, 254),
        encoder_counts: UnitPair::new(4000, 157),
        drive_type: 1,
        encoder_polarity: 0,
        dac_polarity: 0,
        overtravel_switches: 1,
        home_switches: 1,
        home_direction: 0,
    },
    thc_axis: ThcAxisTable::Generic(ThcAxisDefaults {
        slide_length: UnitPair::new(6, 152),
        use_hard_stop: 0,
        use_home_switch: 1,
    }),
    thc_machine: ThcMachineDefaults {
        analog1_input: 1,
        analog2_input: 2,
        speed_pot_installed: 0,
    },
    bevel: BevelDefaults {
        servo_error_degrees: 90,
        encoder_counts_per_rev: 4000,
        auto_home: 1,
    },
    dual_gantry: DualGantryDefaults {
        skew_error: UnitPair::new(1, 25),
    },
    speeds: SpeedDefaults {
        max_speed: UnitPair::new(1000, 25400),
        gain_speeds: [
            UnitPair::new(10, 254),
            UnitPair::new(50, 1270),
            UnitPair::new(100, 2540),
            UnitPair::new(500, 12700),
            UnitPair::new(1000, 25400),
        ],
        accelerations: [
            UnitPair::new(5, 127),
            UnitPair::new(10, 254),
            UnitPair::new(20, 508),
            UnitPair::new(40, 1016),
            UnitPair::new(80, 2032),
        ],
    },
    cut_sense_location: 40,
    cut_control_location: 40,
    input_types: INPUT_TYPES,
    output_types: OUTPUT_TYPES,
};

// ─── Bench / 6-axis ─────────────────────────────────────────────────

pub(super) static BENCH: Profile = Profile {
    id: ProfileId::Bench,
    display_name: "Bench / 6-Axis",
    axis: AxisDefaults {
        proportional_gain: [40, 40, 45, 50, 55],
        integral_gain: [2, 2, 3, 3, 4],
        derivative_gain: [120, 120, 130, 140, 150],
        feed_forward_gain: [60, 60, 65, 70, 75],
        velocity_gain: [0, 0, 0, 0, 0],
        servo_error: UnitPair::new(1, 25),
        encoder_counts: UnitPair::new(8000, 315),
        drive_type: 2,
        encoder_polarity: 1,
        dac_polarity: 0,
        overtravel_switches: 1,
        home_switches: 1,
        home_direction: 1,
    },
    thc_axis: ThcAxisTable::Generic(ThcAxisDefaults {
        slide_length: UnitPair::new(8, 203),
        use_hard_stop: 1,
        use_home_switch: 0,
    }),
    thc_machine: ThcMachineDefaults {
        analog1_input: 3,
        analog2_input: 4,
        speed_pot_installed: 1,
    },
    bevel: BevelDefaults {
        servo_error_degrees: 10,
        encoder_counts_per_rev: 16000,
        auto_home: 1,
    },
    dual_gantry: DualGantryDefaults {
        skew_error: UnitPair::new(1, 13),
    },
    speeds: SpeedDefaults {
        max_speed: UnitPair::new(600, 15240),
        gain_speeds: [
            UnitPair::new(5, 127),
            UnitPair::new(25, 635),
            UnitPair::new(100, 2540),
            UnitPair::new(300, 7620),
            UnitPair::new(600, 15240),
        ],
        accelerations: [
            UnitPair::new(3, 76),
            UnitPair::new(6, 152),
            UnitPair::new(12, 305),
            UnitPair::new(24, 610),
            UnitPair::new(48, 1219),
        ],
    },
    cut_sense_location: 40,
    cut_control_location: 41,
    input_types: INPUT_TYPES,
    output_types: OUTPUT_TYPES,
};

// ─── EDGE Pro Ti ────────────────────────────────────────────────────

pub(super) static EDGE_PRO_TI: Profile = Profile {
    id: ProfileId::EdgeProTi,
    display_name: "EDGE Pro Ti",
    axis: AxisDefaults {
        proportional_gain: [120, 120, 125, 130, 135],
        integral_gain: [8, 8, 9, 10, 10],
        derivative_gain: [600, 600, 620, 640, 660],
        feed_forward_gain: [300, 300, 310, 320, 330],
        velocity_gain: [20, 20, 22, 24, 26],
        servo_error: UnitPair::new(2, 51),
        encoder_counts: UnitPair::new(16384, 645),
        drive_type: 5,
        encoder_polarity: 0,
        dac_polarity: 1,
        overtravel_switches: 1,
        home_switches: 1,
        home_direction: 0,
    },
    thc_axis: ThcAxisTable::Lifter(LifterDefaults {
        axis: ThcAxisDefaults {
            slide_length: UnitPair::new(6, 152),
            use_hard_stop: 1,
            use_home_switch: 0,
        },
        lifter_type: 2,
        stall_current: 40,
    }),
    thc_machine: ThcMachineDefaults {
        analog1_input: 5,
        analog2_input: 6,
        speed_pot_installed: 0,
    },
    bevel: BevelDefaults {
        servo_error_degrees: 5,
        encoder_counts_per_rev: 65536,
        auto_home: 1,
    },
    dual_gantry: DualGantryDefaults {
        skew_error: UnitPair::new(1, 25),
    },
    speeds: SpeedDefaults {
        max_speed: UnitPair::new(1500, 38100),
        gain_speeds: [
            UnitPair::new(10, 254),
            UnitPair::new(75, 1905),
            UnitPair::new(250, 6350),
            UnitPair::new(750, 19050),
            UnitPair::new(1500, 38100),
        ],
        accelerations: [
            UnitPair::new(8, 203),
            UnitPair::new(15, 381),
            UnitPair::new(30, 762),
            UnitPair::new(60, 1524),
            UnitPair::new(120, 3048),
        ],
    },
    cut_sense_location: 41,
    cut_control_location: 42,
    input_types: INPUT_TYPES,
    output_types: OUTPUT_TYPES,
};
