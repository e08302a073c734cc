// src/curriculum.rs

use crate::models::{CameraSettings, Scenario, SimulatorReading};
use serde::Deserialize;
use std::fmt;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LessonCategory {
    Foundation,
    Portrait,
    Landscape,
    Lowlight,
    Action,
}

impl fmt::Display for LessonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LessonCategory::Foundation => "foundation",
            LessonCategory::Portrait => "portrait",
            LessonCategory::Landscape => "landscape",
            LessonCategory::Lowlight => "lowlight",
            LessonCategory::Action => "action",
        })
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ChallengeDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChallengeDifficulty::Beginner => "beginner",
            ChallengeDifficulty::Intermediate => "intermediate",
            ChallengeDifficulty::Advanced => "advanced",
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: LessonCategory,
    pub order: u32,
}

/// Free-form recommendations as printed on the lesson cards. Values may be
/// ranges ("100-400") or "Auto", so they stay as text.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedSettings {
    pub mode: Option<String>,
    pub iso: Option<String>,
    pub aperture: Option<String>,
    pub shutter_speed: Option<String>,
    pub focus_mode: Option<String>,
}

impl SuggestedSettings {
    /// Pins the settings to simulator dials. None unless ISO, aperture and
    /// shutter are all single values the simulator knows.
    pub fn to_camera_settings(&self, scenario: Scenario) -> Option<CameraSettings> {
        Some(CameraSettings {
            iso: self.iso.as_deref()?.parse().ok()?,
            aperture: self.aperture.as_deref()?.parse().ok()?,
            shutter: self.shutter_speed.as_deref()?.parse().ok()?,
            scenario,
        })
    }

    pub fn exposure_for(&self, scenario: Scenario) -> Option<SimulatorReading> {
        self.to_camera_settings(scenario).map(|s| s.evaluate())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: ChallengeDifficulty,
    pub category: String,
    pub objectives: Vec<String>,
    pub suggested_settings: SuggestedSettings,
    pub tips: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheatSheetItem {
    pub scenario: String,
    pub mode: String,
    pub iso: String,
    pub aperture: String,
    pub shutter_speed: String,
    pub notes: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CheatSheet {
    pub id: String,
    pub title: String,
    pub category: String,
    pub items: Vec<CheatSheetItem>,
}

/// One before/after pair for the comparison viewer.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ModeComparison {
    pub id: String,
    pub title: String,
    pub category: String,
    pub auto_description: String,
    pub manual_description: String,
    pub auto_settings: SuggestedSettings,
    pub manual_settings: SuggestedSettings,
    pub lesson: String,
}

impl ModeComparison {
    pub fn scenario(&self) -> Option<Scenario> {
        self.category.parse().ok()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    pub lessons: Vec<Lesson>,
    pub challenges: Vec<Challenge>,
    pub cheat_sheets: Vec<CheatSheet>,
    pub mode_comparisons: Vec<ModeComparison>,
}

impl Curriculum {
    /// The catalog shipped with the binary.
    pub fn builtin() -> serde_json::Result<Self> {
        let mut curriculum: Curriculum =
            serde_json::from_str(include_str!("data/curriculum.json"))?;
        curriculum.lessons.sort_by_key(|l| l.order);
        Ok(curriculum)
    }

    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn cheat_sheet(&self, id: &str) -> Option<&CheatSheet> {
        self.cheat_sheets.iter().find(|s| s.id == id)
    }

    pub fn comparison(&self, id: &str) -> Option<&ModeComparison> {
        self.mode_comparisons.iter().find(|c| c.id == id)
    }

    pub fn lessons_by_category(&self, category: LessonCategory) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|l| l.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_LESSONS;
    use crate::models::{Aperture, ExposureClass, Iso, ShutterSpeed};

    #[test]
    fn builtin_catalog_matches_lesson_count() {
        let c = Curriculum::builtin().unwrap();
        assert_eq!(c.lessons.len(), TOTAL_LESSONS);
        assert_eq!(c.challenges.len(), 6);
        assert_eq!(c.cheat_sheets.len(), 3);
        assert_eq!(c.mode_comparisons.len(), 5);
        assert_eq!(c.lessons_by_category(LessonCategory::Foundation).len(), 6);
    }

    #[test]
    fn lessons_are_in_course_order() {
        let c = Curriculum::builtin().unwrap();
        let orders: Vec<u32> = c.lessons.iter().map(|l| l.order).collect();
        assert_eq!(orders, (1..=10).collect::<Vec<_>>());
        assert_eq!(c.lessons[0].id, "getting-started");
    }

    #[test]
    fn lookups_by_id() {
        let c = Curriculum::builtin().unwrap();
        assert_eq!(c.lesson("exposure-triangle").unwrap().duration, "20 min");
        assert_eq!(
            c.challenge("challenge-panning").unwrap().difficulty,
            ChallengeDifficulty::Advanced
        );
        assert_eq!(c.cheat_sheet("action-settings").unwrap().items.len(), 5);
        assert!(c.lesson("nope").is_none());
    }

    #[test]
    fn comparison_sides_pin_to_simulator_dials() {
        let c = Curriculum::builtin().unwrap();
        let cmp = c.comparison("portrait-bokeh").unwrap();
        let scenario = cmp.scenario().unwrap();
        assert_eq!(scenario, Scenario::Portrait);

        let auto = cmp.auto_settings.to_camera_settings(scenario).unwrap();
        assert_eq!(auto.iso, Iso::Iso400);
        assert_eq!(auto.aperture, Aperture::F8);
        assert_eq!(auto.shutter, ShutterSpeed::S1_125);

        // 1/500 (9) + f/4 (4) - ISO 200 (1) = 12, right on the portrait target.
        let manual = cmp.manual_settings.exposure_for(scenario).unwrap();
        assert_eq!(manual.class, ExposureClass::Perfect);
    }

    #[test]
    fn off_scale_settings_do_not_evaluate() {
        let c = Curriculum::builtin().unwrap();
        // 1/50 is not on the simulator's shutter dial.
        let cmp = c.comparison("lowlight-indoor").unwrap();
        assert!(cmp.manual_settings.exposure_for(Scenario::LowLight).is_none());

        let ranged = SuggestedSettings {
            iso: Some("100-400".into()),
            aperture: Some("f/4".into()),
            shutter_speed: Some("1/125".into()),
            ..Default::default()
        };
        assert!(ranged.to_camera_settings(Scenario::Portrait).is_none());
    }
}
