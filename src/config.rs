use serde::Deserialize;

use crate::error::Result;

/// Tuning constants and page element ids. Every field has a default so an
/// empty document is a valid config.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ShowcaseConfig {
    /// Position divergence (seconds) above which one track is snapped to the other.
    #[serde(default = "default_drift_threshold")]
    pub drift_threshold_secs: f64,
    /// Master level forced by the meter unlock when the level is still zero.
    #[serde(default = "default_audible_floor")]
    pub audible_floor: f64,
    /// Mix ratio restored by the reset action.
    #[serde(default = "default_mix_ratio")]
    pub default_mix_ratio: f64,
    #[serde(default)]
    pub ids: ElementIds,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ElementIds {
    pub video_primary: String,
    pub video_secondary: String,
    pub video_primary_input: String,
    pub video_secondary_input: String,
    pub audio_before: String,
    pub audio_after: String,
    pub audio_region: String,
    pub audio_fader: String,
    pub snap_before: String,
    pub snap_after: String,
    pub reset: String,
    pub meter_before: String,
    pub meter_after: String,
    pub meter_region: String,
    pub meter_fader: String,
    pub meter_unlock: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            video_primary: "video-before".into(),
            video_secondary: "video-after".into(),
            video_primary_input: "video-before-file".into(),
            video_secondary_input: "video-after-file".into(),
            audio_before: "audio-before".into(),
            audio_after: "audio-after".into(),
            audio_region: "audio-demo".into(),
            audio_fader: "audio-fader".into(),
            snap_before: "audio-snap-before".into(),
            snap_after: "audio-snap-after".into(),
            reset: "audio-reset".into(),
            meter_before: "meter-before".into(),
            meter_after: "meter-after".into(),
            meter_region: "meter-demo".into(),
            meter_fader: "meter-fader".into(),
            meter_unlock: "meter-enable-audio".into(),
        }
    }
}

fn default_drift_threshold() -> f64 {
    0.08
}

fn default_audible_floor() -> f64 {
    0.6
}

fn default_mix_ratio() -> f64 {
    0.5
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            drift_threshold_secs: default_drift_threshold(),
            audible_floor: default_audible_floor(),
            default_mix_ratio: default_mix_ratio(),
            ids: ElementIds::default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let mut cfg: ShowcaseConfig = toml::from_str(txt)?;
        cfg.audible_floor = cfg.audible_floor.clamp(0.0, 1.0);
        cfg.default_mix_ratio = cfg.default_mix_ratio.clamp(0.0, 1.0);
        cfg.drift_threshold_secs = cfg.drift_threshold_secs.max(0.0);
        Ok(cfg)
    }
}
