//! Game settings and tuning
//!
//! Loaded from JSON by the shell; every field falls back to the stock value.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Run tuning ===
    /// Scroll speed without boost (px per tick)
    pub base_speed: f32,
    /// Distance needed to reach the hospital
    pub max_distance: f32,
    /// Effective speed multiplier while boosted
    pub boost_multiplier: f32,
    /// Boost length after a speed pickup (ms)
    pub boost_duration_ms: f32,

    // === Spawning (wall-clock) ===
    pub obstacle_interval_ms: f64,
    pub power_up_interval_ms: f64,

    // === Visual effects ===
    /// Particle cap preset
    pub quality: QualityPreset,
    /// Particle bursts on hits and pickups
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            max_distance: 1000.0,
            boost_multiplier: 1.5,
            boost_duration_ms: 5000.0,

            obstacle_interval_ms: 1200.0,
            power_up_interval_ms: 4000.0,

            quality: QualityPreset::Medium,
            particles: true,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse settings from JSON; missing or unusable fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Replace non-finite or non-positive tuning values with the stock ones
    pub fn sanitized(mut self) -> Self {
        let stock = Self::default();
        fn fix_f32(name: &str, value: &mut f32, stock: f32) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Ignoring invalid {name} = {value}, using {stock}");
                *value = stock;
            }
        }
        fn fix_f64(name: &str, value: &mut f64, stock: f64) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Ignoring invalid {name} = {value}, using {stock}");
                *value = stock;
            }
        }

        fix_f32("base_speed", &mut self.base_speed, stock.base_speed);
        fix_f32("max_distance", &mut self.max_distance, stock.max_distance);
        fix_f32("boost_multiplier", &mut self.boost_multiplier, stock.boost_multiplier);
        fix_f32("boost_duration_ms", &mut self.boost_duration_ms, stock.boost_duration_ms);
        fix_f64(
            "obstacle_interval_ms",
            &mut self.obstacle_interval_ms,
            stock.obstacle_interval_ms,
        );
        fix_f64(
            "power_up_interval_ms",
            &mut self.power_up_interval_ms,
            stock.power_up_interval_ms,
        );
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }
}
