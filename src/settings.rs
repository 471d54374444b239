//! Runtime configuration for steering and flocking.
//!
//! [`MovementSettings`] gathers every tunable weight, radius and threshold.
//! Its defaults mirror the constants in [`crate::constants`]; a JSON document
//! can override any subset of fields because missing fields fall back to the
//! defaults.
//!
//! ```
//! use flock_steer::MovementSettings;
//! let settings = MovementSettings::from_json_str(r#"{ "tick_hz": 60 }"#).unwrap();
//! assert_eq!(settings.tick_hz, 60);
//! assert_eq!(settings.arrive_threshold, 5.0);
//! ```

use std::fs;
use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::SettingsError;

/// Tunables for the steering blend and the tick integrator.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Fixed tick rate in hertz. Velocities are expressed per tick.
    pub tick_hz: u32,
    /// Mass used for every agent when converting force to acceleration.
    pub agent_mass: f32,
    /// Cap on any single behaviour force and on the blended force.
    pub max_force: f32,
    /// Separation weight while moving.
    pub move_separation_weight: f32,
    /// Arrive weight while moving.
    pub move_arrive_weight: f32,
    /// Cohesion weight while moving.
    pub move_cohesion_weight: f32,
    /// Alignment weight while moving.
    pub move_align_weight: f32,
    /// Separation weight while settling.
    pub settle_separation_weight: f32,
    /// Distance to target below which a moving agent has arrived.
    pub arrive_threshold: f32,
    /// Buffer added to the selection radius for separation while moving.
    pub move_separation_buffer: f32,
    /// Buffer added to the selection radius for separation while settling.
    pub settle_separation_buffer: f32,
    /// Neighbourhood radius for cohesion.
    pub cohesion_radius: f32,
    /// Neighbourhood radius for alignment.
    pub align_radius: f32,
    /// Radius inside which arrive decelerates.
    pub slowing_radius: f32,
    /// Gap used by the adjacency query.
    pub adjacency_gap: f32,
    /// Fraction of max speed below which a settling agent stops.
    pub settle_stop_tolerance: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            tick_hz: TICK_HZ,
            agent_mass: AGENT_MASS,
            max_force: MAX_FORCE,
            move_separation_weight: MOVE_SEPARATION_FORCE_SCALE,
            move_arrive_weight: MOVE_ARRIVE_FORCE_SCALE,
            move_cohesion_weight: MOVE_COHESION_FORCE_SCALE,
            move_align_weight: MOVE_ALIGN_FORCE_SCALE,
            settle_separation_weight: SETTLE_SEPARATION_FORCE_SCALE,
            arrive_threshold: ARRIVE_THRESHOLD_DIST,
            move_separation_buffer: MOVE_SEPARATION_BUFFER_DIST,
            settle_separation_buffer: SETTLE_SEPARATION_BUFFER_DIST,
            cohesion_radius: COHESION_NEIGHBOUR_RADIUS,
            align_radius: ALIGN_NEIGHBOUR_RADIUS,
            slowing_radius: ARRIVE_SLOWING_RADIUS,
            adjacency_gap: ADJACENCY_SEP_DIST,
            settle_stop_tolerance: SETTLE_STOP_TOLERANCE,
        }
    }
}

impl MovementSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON and
    /// [`SettingsError::Invalid`] when a value fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a JSON settings file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// the errors of [`MovementSettings::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&text)?;
        log::info!("loaded movement settings from {}", path.display());
        Ok(settings)
    }

    /// Checks that every field holds a value the integrator can run with.
    ///
    /// # Errors
    /// Returns [`SettingsError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_hz == 0 {
            return Err(SettingsError::Invalid {
                field: "tick_hz",
                reason: "must be at least 1",
            });
        }
        for (field, value) in [
            ("agent_mass", self.agent_mass),
            ("max_force", self.max_force),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be finite and positive",
                });
            }
        }
        for (field, value) in [
            ("move_separation_weight", self.move_separation_weight),
            ("move_arrive_weight", self.move_arrive_weight),
            ("move_cohesion_weight", self.move_cohesion_weight),
            ("move_align_weight", self.move_align_weight),
            ("settle_separation_weight", self.settle_separation_weight),
            ("arrive_threshold", self.arrive_threshold),
            ("move_separation_buffer", self.move_separation_buffer),
            ("settle_separation_buffer", self.settle_separation_buffer),
            ("cohesion_radius", self.cohesion_radius),
            ("align_radius", self.align_radius),
            ("slowing_radius", self.slowing_radius),
            ("adjacency_gap", self.adjacency_gap),
            ("settle_stop_tolerance", self.settle_stop_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }
        Ok(())
    }

    /// Per-tick velocity cap for an agent with the given max speed.
    ///
    /// # Examples
    /// ```
    /// use flock_steer::MovementSettings;
    /// assert_eq!(MovementSettings::default().max_step(30.0), 1.0);
    /// ```
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Tick rates are small integers well within f32 precision."
    )]
    pub fn max_step(&self, max_speed: f32) -> f32 {
        max_speed / self.tick_hz as f32
    }
}
