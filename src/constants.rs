// src/constants.rs

// --- Storage ---
pub const STORAGE_KEY: &str = "canon-1500d-progress";
pub const DB_FILE_NAME: &str = "camera_trainer.db";
pub const APP_DIR_NAME: &str = "camera-trainer";

// --- Exposure Math ---
pub const ISO_BASE: f64 = 100.0;
pub const SHUTTER_EV_OFFSET: i32 = -5; // "30" sits at index 0 -> EV -5
pub const SHUTTER_FALLBACK_EV: f64 = 6.0; // Value for "1/60"

// --- Visual Effects ---
pub const BRIGHTNESS_MID: f64 = 50.0;
pub const BRIGHTNESS_PER_EV: f64 = 15.0;
pub const BRIGHTNESS_MIN: f64 = 0.0;
pub const BRIGHTNESS_MAX: f64 = 100.0;

pub const METER_MIN: f64 = 5.0; // Percent
pub const METER_MAX: f64 = 95.0; // Percent

pub const NOISE_ISO_THRESHOLD: u32 = 1600;
pub const NOISE_ISO_STEP: f64 = 100.0;
pub const NOISE_OPACITY_SCALE: f64 = 0.1;
pub const NOISE_OPACITY_MAX: f64 = 0.4;
pub const NOISE_WARNING_LEVEL: f64 = 0.5;

pub const DOF_APERTURE_MIN: f64 = 3.5;
pub const DOF_APERTURE_SPAN: f64 = 18.5; // 22 - 3.5
pub const BACKGROUND_BLUR_MAX_PX: f64 = 10.0;

// Shutter index of 1/250; anything slower blurs moving subjects.
pub const MOTION_BLUR_SHUTTER_INDEX: usize = 13;

// --- Exposure Feedback ---
pub const PERFECT_TOLERANCE: f64 = 0.5; // EV
pub const SEVERE_DEVIATION: f64 = 2.0; // EV

// --- Progress / Gamification ---
pub const LESSON_POINTS: u64 = 100;
pub const CHALLENGE_POINTS: u64 = 50;
pub const TOTAL_LESSONS: usize = 10; // 6 foundations + 4 scenarios
