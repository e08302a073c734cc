// src/exposure.rs

use crate::constants::*;
use crate::models::{
    Aperture, CameraSettings, ExposureClass, ExposureReading, Iso, Scenario, ShutterSpeed,
    SimulatorReading, VisualEffects,
};
use log::debug;

// --- EV Lookups ---

/// EV contribution of a shutter token such as "1/60" or "30".
/// Unknown tokens fall back to the value for "1/60".
pub fn ev_from_shutter(token: &str) -> f64 {
    match ShutterSpeed::from_token(token) {
        Some(s) => s.ev(),
        None => {
            debug!("Unknown shutter token {:?}, using 1/60 fallback", token);
            SHUTTER_FALLBACK_EV
        }
    }
}

pub fn ev_from_aperture(f_number: f64) -> f64 {
    (f_number * f_number).log2()
}

pub fn ev_from_iso(iso: f64) -> f64 {
    (iso / ISO_BASE).log2()
}

// --- Public Interface ---

pub fn compute_exposure(
    iso: Iso,
    aperture: Aperture,
    shutter: ShutterSpeed,
    scenario_base_ev: f64,
) -> ExposureReading {
    let exposure_value =
        shutter.ev() + ev_from_aperture(aperture.f_number()) - ev_from_iso(iso.value() as f64);
    ExposureReading {
        exposure_value,
        exposure_diff: exposure_value - scenario_base_ev,
    }
}

pub fn classify_exposure(exposure_diff: f64) -> ExposureClass {
    if exposure_diff.abs() < PERFECT_TOLERANCE {
        ExposureClass::Perfect
    } else if exposure_diff > SEVERE_DEVIATION {
        ExposureClass::VeryUnder
    } else if exposure_diff > PERFECT_TOLERANCE {
        ExposureClass::SlightlyUnder
    } else if exposure_diff < -SEVERE_DEVIATION {
        ExposureClass::VeryOver
    } else {
        ExposureClass::SlightlyOver
    }
}

pub fn compute_visual_effects(
    iso: Iso,
    aperture: Aperture,
    shutter: ShutterSpeed,
    scenario: Scenario,
    exposure_diff: f64,
) -> VisualEffects {
    let brightness = (BRIGHTNESS_MID - exposure_diff * BRIGHTNESS_PER_EV)
        .clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);

    let noise_level = if iso.value() >= NOISE_ISO_THRESHOLD {
        (iso.value() - NOISE_ISO_THRESHOLD) as f64 / NOISE_ISO_STEP
    } else {
        0.0
    };

    let depth_of_field_factor = scenario
        .has_dof()
        .then(|| (aperture.f_number() - DOF_APERTURE_MIN) / DOF_APERTURE_SPAN);

    let has_motion_blur = scenario.has_motion() && shutter.index() < MOTION_BLUR_SHUTTER_INDEX;

    VisualEffects {
        brightness,
        noise_level,
        depth_of_field_factor,
        has_motion_blur,
    }
}

/// Needle position on the exposure meter, in percent of its width.
pub fn meter_position(exposure_diff: f64) -> f64 {
    (BRIGHTNESS_MID + exposure_diff * BRIGHTNESS_PER_EV).clamp(METER_MIN, METER_MAX)
}

impl VisualEffects {
    /// Opacity of the grain overlay.
    pub fn noise_opacity(&self) -> f64 {
        (self.noise_level * NOISE_OPACITY_SCALE).min(NOISE_OPACITY_MAX)
    }

    pub fn has_noise_warning(&self) -> bool {
        self.noise_level > NOISE_WARNING_LEVEL
    }

    /// Background blur radius; wide apertures blur the most.
    pub fn background_blur_px(&self) -> Option<f64> {
        self.depth_of_field_factor
            .map(|dof| (1.0 - dof) * BACKGROUND_BLUR_MAX_PX)
    }
}

impl CameraSettings {
    /// Everything the simulator shows for the current dials.
    pub fn evaluate(&self) -> SimulatorReading {
        let reading = compute_exposure(
            self.iso,
            self.aperture,
            self.shutter,
            self.scenario.base_ev(),
        );
        let class = classify_exposure(reading.exposure_diff);
        let effects = compute_visual_effects(
            self.iso,
            self.aperture,
            self.shutter,
            self.scenario,
            reading.exposure_diff,
        );
        debug!(
            "[Simulator] ISO {} {} {} ({}): EV {:.2}, diff {:+.2} -> {:?}",
            self.iso,
            self.aperture,
            self.shutter,
            self.scenario.id(),
            reading.exposure_value,
            reading.exposure_diff,
            class
        );
        SimulatorReading {
            settings: *self,
            reading,
            class,
            effects,
            meter_position: meter_position(reading.exposure_diff),
        }
    }
}
