// src/models.rs

use crate::constants::SHUTTER_EV_OFFSET;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// --- Camera Parameters ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Iso {
    Iso100,
    Iso200,
    Iso400,
    Iso800,
    Iso1600,
    Iso3200,
    Iso6400,
}

impl Iso {
    pub const ALL: [Iso; 7] = [
        Iso::Iso100,
        Iso::Iso200,
        Iso::Iso400,
        Iso::Iso800,
        Iso::Iso1600,
        Iso::Iso3200,
        Iso::Iso6400,
    ];

    pub fn value(&self) -> u32 {
        match self {
            Iso::Iso100 => 100,
            Iso::Iso200 => 200,
            Iso::Iso400 => 400,
            Iso::Iso800 => 800,
            Iso::Iso1600 => 1600,
            Iso::Iso3200 => 3200,
            Iso::Iso6400 => 6400,
        }
    }

    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|iso| iso.value() == value)
    }
}

impl FromStr for Iso {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw
            .strip_prefix("ISO")
            .or_else(|| raw.strip_prefix("iso"))
            .unwrap_or(raw)
            .trim();
        raw.parse::<u32>()
            .ok()
            .and_then(Iso::from_value)
            .ok_or_else(|| format!("unsupported ISO value: {}", s))
    }
}

impl fmt::Display for Iso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Full-stop and third-stop f-numbers available on the kit lens range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Aperture {
    F3_5,
    F4,
    F4_5,
    F5,
    F5_6,
    F6_3,
    F7_1,
    F8,
    F9,
    F10,
    F11,
    F13,
    F14,
    F16,
    F18,
    F20,
    F22,
}

impl Aperture {
    pub const ALL: [Aperture; 17] = [
        Aperture::F3_5,
        Aperture::F4,
        Aperture::F4_5,
        Aperture::F5,
        Aperture::F5_6,
        Aperture::F6_3,
        Aperture::F7_1,
        Aperture::F8,
        Aperture::F9,
        Aperture::F10,
        Aperture::F11,
        Aperture::F13,
        Aperture::F14,
        Aperture::F16,
        Aperture::F18,
        Aperture::F20,
        Aperture::F22,
    ];

    pub fn f_number(&self) -> f64 {
        match self {
            Aperture::F3_5 => 3.5,
            Aperture::F4 => 4.0,
            Aperture::F4_5 => 4.5,
            Aperture::F5 => 5.0,
            Aperture::F5_6 => 5.6,
            Aperture::F6_3 => 6.3,
            Aperture::F7_1 => 7.1,
            Aperture::F8 => 8.0,
            Aperture::F9 => 9.0,
            Aperture::F10 => 10.0,
            Aperture::F11 => 11.0,
            Aperture::F13 => 13.0,
            Aperture::F14 => 14.0,
            Aperture::F16 => 16.0,
            Aperture::F18 => 18.0,
            Aperture::F20 => 20.0,
            Aperture::F22 => 22.0,
        }
    }
}

impl FromStr for Aperture {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw
            .strip_prefix("f/")
            .or_else(|| raw.strip_prefix("F/"))
            .unwrap_or(raw);
        let n: f64 = raw
            .parse()
            .map_err(|_| format!("unsupported aperture: {}", s))?;
        Aperture::ALL
            .into_iter()
            .find(|a| (a.f_number() - n).abs() < 1e-9)
            .ok_or_else(|| format!("unsupported aperture: {}", s))
    }
}

impl fmt::Display for Aperture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f/{}", self.f_number())
    }
}

/// Shutter speeds from 30s down to 1/4000s, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShutterSpeed {
    S30,
    S15,
    S8,
    S4,
    S2,
    S1,
    S1_2,
    S1_4,
    S1_8,
    S1_15,
    S1_30,
    S1_60,
    S1_125,
    S1_250,
    S1_500,
    S1_1000,
    S1_2000,
    S1_4000,
}

impl ShutterSpeed {
    pub const ALL: [ShutterSpeed; 18] = [
        ShutterSpeed::S30,
        ShutterSpeed::S15,
        ShutterSpeed::S8,
        ShutterSpeed::S4,
        ShutterSpeed::S2,
        ShutterSpeed::S1,
        ShutterSpeed::S1_2,
        ShutterSpeed::S1_4,
        ShutterSpeed::S1_8,
        ShutterSpeed::S1_15,
        ShutterSpeed::S1_30,
        ShutterSpeed::S1_60,
        ShutterSpeed::S1_125,
        ShutterSpeed::S1_250,
        ShutterSpeed::S1_500,
        ShutterSpeed::S1_1000,
        ShutterSpeed::S1_2000,
        ShutterSpeed::S1_4000,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            ShutterSpeed::S30 => "30",
            ShutterSpeed::S15 => "15",
            ShutterSpeed::S8 => "8",
            ShutterSpeed::S4 => "4",
            ShutterSpeed::S2 => "2",
            ShutterSpeed::S1 => "1",
            ShutterSpeed::S1_2 => "1/2",
            ShutterSpeed::S1_4 => "1/4",
            ShutterSpeed::S1_8 => "1/8",
            ShutterSpeed::S1_15 => "1/15",
            ShutterSpeed::S1_30 => "1/30",
            ShutterSpeed::S1_60 => "1/60",
            ShutterSpeed::S1_125 => "1/125",
            ShutterSpeed::S1_250 => "1/250",
            ShutterSpeed::S1_500 => "1/500",
            ShutterSpeed::S1_1000 => "1/1000",
            ShutterSpeed::S1_2000 => "1/2000",
            ShutterSpeed::S1_4000 => "1/4000",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.token() == token)
    }

    /// Position in the slowest-first ordering.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Each step faster admits one stop less light.
    pub fn ev(&self) -> f64 {
        (self.index() as i32 + SHUTTER_EV_OFFSET) as f64
    }
}

impl FromStr for ShutterSpeed {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_suffix('s').unwrap_or(raw);
        let raw = raw.strip_suffix('"').unwrap_or(raw);
        ShutterSpeed::from_token(raw).ok_or_else(|| format!("unsupported shutter speed: {}", s))
    }
}

impl fmt::Display for ShutterSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token() {
            t if t.contains('/') => write!(f, "{}s", t),
            t => write!(f, "{}\"", t),
        }
    }
}

/// A shooting situation the simulator can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Portrait,
    Landscape,
    LowLight,
    Action,
    Indoor,
    SunnyDay,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::Portrait,
        Scenario::Landscape,
        Scenario::LowLight,
        Scenario::Action,
        Scenario::Indoor,
        Scenario::SunnyDay,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Scenario::Portrait => "portrait",
            Scenario::Landscape => "landscape",
            Scenario::LowLight => "lowlight",
            Scenario::Action => "action",
            Scenario::Indoor => "indoor",
            Scenario::SunnyDay => "sunny",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Portrait => "Portrait",
            Scenario::Landscape => "Landscape",
            Scenario::LowLight => "Low Light",
            Scenario::Action => "Action",
            Scenario::Indoor => "Indoor",
            Scenario::SunnyDay => "Sunny Day",
        }
    }

    /// Target exposure value for the scene.
    pub fn base_ev(&self) -> f64 {
        match self {
            Scenario::Portrait => 12.0,
            Scenario::Landscape => 14.0,
            Scenario::LowLight => 6.0,
            Scenario::Action => 13.0,
            Scenario::Indoor => 8.0,
            Scenario::SunnyDay => 15.0,
        }
    }

    pub fn has_motion(&self) -> bool {
        matches!(self, Scenario::Action)
    }

    pub fn has_dof(&self) -> bool {
        !matches!(self, Scenario::Action)
    }
}

impl FromStr for Scenario {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_lowercase();
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.id() == raw)
            .ok_or_else(|| format!("unknown scenario: {}", s))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current simulator dial positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub iso: Iso,
    pub aperture: Aperture,
    pub shutter: ShutterSpeed,
    pub scenario: Scenario,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            iso: Iso::Iso800,
            aperture: Aperture::F5_6,
            shutter: ShutterSpeed::S1_60,
            scenario: Scenario::Portrait,
        }
    }
}

impl CameraSettings {
    /// Back to the starting dials; the chosen scenario is kept.
    pub fn reset(&mut self) {
        let defaults = CameraSettings::default();
        self.iso = defaults.iso;
        self.aperture = defaults.aperture;
        self.shutter = defaults.shutter;
    }
}

// --- Exposure Outputs ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureReading {
    pub exposure_value: f64,
    /// Positive means the settings under-expose the scene.
    pub exposure_diff: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureClass {
    Perfect,
    SlightlyUnder,
    VeryUnder,
    SlightlyOver,
    VeryOver,
}

impl ExposureClass {
    pub fn label(&self) -> &'static str {
        match self {
            ExposureClass::Perfect => "Perfect exposure!",
            ExposureClass::SlightlyUnder => "Slightly underexposed",
            ExposureClass::VeryUnder => "Very underexposed",
            ExposureClass::SlightlyOver => "Slightly overexposed",
            ExposureClass::VeryOver => "Very overexposed",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ExposureClass::Perfect => Severity::Good,
            ExposureClass::SlightlyUnder | ExposureClass::SlightlyOver => Severity::Warning,
            ExposureClass::VeryUnder | ExposureClass::VeryOver => Severity::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualEffects {
    /// Percent, 0..=100, 50 is neutral.
    pub brightness: f64,
    pub noise_level: f64,
    /// 0.0 at the widest aperture, 1.0 at the narrowest. None when the
    /// scenario does not care about depth of field.
    pub depth_of_field_factor: Option<f64>,
    pub has_motion_blur: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorReading {
    pub settings: CameraSettings,
    pub reading: ExposureReading,
    pub class: ExposureClass,
    pub effects: VisualEffects,
    pub meter_position: f64,
}

// --- Progress Models ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProgress {
    pub started: bool,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// The persisted learner record. Serialized whole under one storage key.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub lessons: BTreeMap<String, LessonProgress>,
    pub challenges: BTreeMap<String, ChallengeProgress>,
    /// Minutes.
    pub simulator_practice_time: f64,
    pub total_points: u64,
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutter_ev_runs_from_minus_five_to_twelve() {
        assert_eq!(ShutterSpeed::S30.ev(), -5.0);
        assert_eq!(ShutterSpeed::S1.ev(), 0.0);
        assert_eq!(ShutterSpeed::S1_60.ev(), 6.0);
        assert_eq!(ShutterSpeed::S1_250.index(), 13);
        assert_eq!(ShutterSpeed::S1_4000.ev(), 12.0);
    }

    #[test]
    fn shutter_ev_increases_with_each_faster_step() {
        for pair in ShutterSpeed::ALL.windows(2) {
            assert_eq!(pair[1].ev() - pair[0].ev(), 1.0);
        }
    }

    #[test]
    fn parses_camera_parameters() {
        assert_eq!("800".parse::<Iso>(), Ok(Iso::Iso800));
        assert_eq!("ISO 3200".parse::<Iso>(), Ok(Iso::Iso3200));
        assert!("500".parse::<Iso>().is_err());

        assert_eq!("f/5.6".parse::<Aperture>(), Ok(Aperture::F5_6));
        assert_eq!("8".parse::<Aperture>(), Ok(Aperture::F8));
        assert!("f/1.8".parse::<Aperture>().is_err());
        assert!("Auto".parse::<Aperture>().is_err());

        assert_eq!("1/125".parse::<ShutterSpeed>(), Ok(ShutterSpeed::S1_125));
        assert_eq!("30s".parse::<ShutterSpeed>(), Ok(ShutterSpeed::S30));
        assert!("1/50".parse::<ShutterSpeed>().is_err());

        assert_eq!("Sunny".parse::<Scenario>(), Ok(Scenario::SunnyDay));
        assert!("macro".parse::<Scenario>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for a in Aperture::ALL {
            assert_eq!(a.to_string().parse::<Aperture>(), Ok(a));
        }
        for s in ShutterSpeed::ALL {
            assert_eq!(s.to_string().parse::<ShutterSpeed>(), Ok(s));
        }
        assert_eq!(Aperture::F4.to_string(), "f/4");
        assert_eq!(ShutterSpeed::S1_60.to_string(), "1/60s");
    }

    #[test]
    fn only_action_tracks_motion() {
        for sc in Scenario::ALL {
            assert_eq!(sc.has_motion(), sc == Scenario::Action);
            assert_eq!(sc.has_dof(), sc != Scenario::Action);
        }
    }

    #[test]
    fn reset_keeps_scenario() {
        let mut settings = CameraSettings {
            iso: Iso::Iso6400,
            aperture: Aperture::F22,
            shutter: ShutterSpeed::S30,
            scenario: Scenario::LowLight,
        };
        settings.reset();
        assert_eq!(settings.iso, Iso::Iso800);
        assert_eq!(settings.aperture, Aperture::F5_6);
        assert_eq!(settings.shutter, ShutterSpeed::S1_60);
        assert_eq!(settings.scenario, Scenario::LowLight);
    }

    #[test]
    fn persisted_shape_uses_camel_case_keys() {
        let state = ProgressState {
            simulator_practice_time: 12.5,
            total_points: 150,
            streak: 3,
            last_visit: NaiveDate::from_ymd_opt(2026, 10, 18),
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["simulatorPracticeTime"], 12.5);
        assert_eq!(json["totalPoints"], 150);
        assert_eq!(json["streak"], 3);
        assert_eq!(json["lastVisit"], "2026-10-18");
        assert!(json["lessons"].as_object().unwrap().is_empty());
    }
}
