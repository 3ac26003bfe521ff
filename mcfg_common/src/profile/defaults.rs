//! Typed default-parameter tables and their `[Block]` key layouts.
//!
//! Each table renders to a [`ParamMap`] suitable for
//! [`ParameterDocument::replace_all`](crate::document::ParameterDocument::replace_all).

use serde::Serialize;

use crate::blocks::{
    AUTO_HOME, ENCODER_COUNTS_ENGLISH, ENCODER_COUNTS_METRIC, SERVO_ERROR_ENGLISH,
    SERVO_ERROR_METRIC, SPEED_POT_INSTALLED,
};
use crate::document::ParamMap;

/// Number of gain/speed tuning sets.
pub const TUNING_SETS: usize = 5;

/// A value given in both unit systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitPair {
    pub english: i32,
    pub metric: i32,
}

impl UnitPair {
    pub const fn new(english: i32, metric: i32) -> Self {
        Self { english, metric }
    }

    /// Same value in both unit systems.
    pub const fn both(value: i32) -> Self {
        Self::new(value, value)
    }

    fn insert_into(&self, params: &mut ParamMap, base: &str) {
        params.insert(format!("{base}(english)="), self.english);
        params.insert(format!("{base}(metric)="), self.metric);
    }
}

fn insert_sets(params: &mut ParamMap, base: &str, values: &[i32; TUNING_SETS]) {
    for (i, v) in values.iter().enumerate() {
        params.insert(format!("{base}{}=", i + 1), *v);
    }
}

// ─── Generic axis ───────────────────────────────────────────────────

/// Servo tuning for a generic motion axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisDefaults {
    pub proportional_gain: [i32; TUNING_SETS],
    pub integral_gain: [i32; TUNING_SETS],
    pub derivative_gain: [i32; TUNING_SETS],
    pub feed_forward_gain: [i32; TUNING_SETS],
    pub velocity_gain: [i32; TUNING_SETS],
    pub servo_error: UnitPair,
    pub encoder_counts: UnitPair,
    pub drive_type: i32,
    pub encoder_polarity: i32,
    pub dac_polarity: i32,
    pub overtravel_switches: i32,
    pub home_switches: i32,
    pub home_direction: i32,
}

impl AxisDefaults {
    pub fn params(&self) -> ParamMap {
        let mut p = ParamMap::new();
        insert_sets(&mut p, "ProportionalGain", &self.proportional_gain);
        insert_sets(&mut p, "IntegralGain", &self.integral_gain);
        insert_sets(&mut p, "DerivativeGain", &self.derivative_gain);
        insert_sets(&mut p, "FeedForwardGain", &self.feed_forward_gain);
        insert_sets(&mut p, "VelocityGain", &self.velocity_gain);
        p.insert(SERVO_ERROR_ENGLISH.into(), self.servo_error.english);
        p.insert(SERVO_ERROR_METRIC.into(), self.servo_error.metric);
        p.insert(ENCODER_COUNTS_ENGLISH.into(), self.encoder_counts.english);
        p.insert(ENCODER_COUNTS_METRIC.into(), self.encoder_counts.metric);
        p.insert("DriveType=".into(), self.drive_type);
        p.insert("EncoderPolarity=".into(), self.encoder_polarity);
        p.insert("DacPolarity=".into(), self.dac_polarity);
        p.insert("OvertravelSwitches=".into(), self.overtravel_switches);
        p.insert("HomeSwitches=".into(), self.home_switches);
        p.insert("HomeDirection=".into(), self.home_direction);
        p
    }
}

// ─── THC axis ───────────────────────────────────────────────────────

/// Torch-height-control slide axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThcAxisDefaults {
    pub slide_length: UnitPair,
    pub use_hard_stop: i32,
    pub use_home_switch: i32,
}

impl ThcAxisDefaults {
    pub fn params(&self) -> ParamMap {
        let mut p = ParamMap::new();
        self.slide_length.insert_into(&mut p, "SlideLength");
        p.insert("UseHardStop=".into(), self.use_hard_stop);
        p.insert("UseHomeSwitch=".into(), self.use_home_switch);
        p
    }
}

/// Integrated lifter used in place of a THC slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifterDefaults {
    pub axis: ThcAxisDefaults,
    pub lifter_type: i32,
    pub stall_current: i32,
}

/// THC-axis table variant selected by the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ThcAxisTable {
    Generic(ThcAxisDefaults),
    Lifter(LifterDefaults),
}

impl ThcAxisTable {
    pub fn params(&self) -> ParamMap {
        match self {
            Self::Generic(t) => t.params(),
            Self::Lifter(l) => {
                let mut p = l.axis.params();
                p.insert("LifterType=".into(), l.lifter_type);
                p.insert("StallCurrent=".into(), l.stall_current);
                p
            }
        }
    }
}

// ─── THC analog / machine ───────────────────────────────────────────

/// Analog channel assignments and speed-pot installation for THC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThcMachineDefaults {
    pub analog1_input: i32,
    pub analog2_input: i32,
    pub speed_pot_installed: i32,
}

impl ThcMachineDefaults {
    /// `[AnalogInputCard]` parameters.
    pub fn analog_params(&self) -> ParamMap {
        ParamMap::from([
            ("Analog1Input=".into(), self.analog1_input),
            ("Analog2Input=".into(), self.analog2_input),
        ])
    }

    /// `[Machine]` parameters.
    pub fn machine_params(&self) -> ParamMap {
        ParamMap::from([(SPEED_POT_INSTALLED.into(), self.speed_pot_installed)])
    }
}

// ─── Bevel ──────────────────────────────────────────────────────────

/// Rotary bevel-head overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BevelDefaults {
    /// Servo error tolerance in degrees.
    pub servo_error_degrees: i32,
    /// Encoder counts per revolution.
    pub encoder_counts_per_rev: i32,
    pub auto_home: i32,
}

impl BevelDefaults {
    /// Servo-error and encoder overrides applied on top of axis defaults.
    pub fn overrides(&self) -> ParamMap {
        ParamMap::from([
            (SERVO_ERROR_ENGLISH.into(), self.servo_error_degrees),
            (SERVO_ERROR_METRIC.into(), self.servo_error_degrees),
            (ENCODER_COUNTS_ENGLISH.into(), self.encoder_counts_per_rev),
            (ENCODER_COUNTS_METRIC.into(), self.encoder_counts_per_rev),
        ])
    }

    /// `[Machine]` auto-home parameter.
    pub fn auto_home_params(&self) -> ParamMap {
        ParamMap::from([(AUTO_HOME.into(), self.auto_home)])
    }
}

// ─── Dual gantry ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DualGantryDefaults {
    pub skew_error: UnitPair,
}

impl DualGantryDefaults {
    pub fn params(&self) -> ParamMap {
        let mut p = ParamMap::new();
        self.skew_error.insert_into(&mut p, "SkewErrorTolerance");
        p
    }
}

// ─── Speeds ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeedDefaults {
    pub max_speed: UnitPair,
    pub gain_speeds: [UnitPair; TUNING_SETS],
    pub accelerations: [UnitPair; TUNING_SETS],
}

impl SpeedDefaults {
    pub fn params(&self) -> ParamMap {
        let mut p = ParamMap::new();
        self.max_speed.insert_into(&mut p, "MaxSpeed");
        for (i, v) in self.gain_speeds.iter().enumerate() {
            v.insert_into(&mut p, &format!("GainSpeed{}", i + 1));
        }
        for (i, v) in self.accelerations.iter().enumerate() {
            v.insert_into(&mut p, &format!("Acceleration{}", i + 1));
        }
        p
    }
}
